//! Settings and configuration utilities.
//!
//! Process-level settings (API token, API URL) come from the environment,
//! falling back to `$HOME/.wip-check/settings.json`:
//!
//! ```json
//! { "env": { "GITHUB_TOKEN": "ghs_...", "GITHUB_API_URL": "https://api.github.com" } }
//! ```

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Settings loaded from `$HOME/.wip-check/settings.json`.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Environment variable fallbacks.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        let settings_path = Self::settings_path()?;
        Self::load_from_path(&settings_path)
    }

    /// Loads settings from a specific path; a missing file yields empty settings.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str::<Settings>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".wip-check").join("settings.json"))
    }
}

/// Returns an environment variable with fallback to the settings file.
pub fn get_env_var(key: &str) -> Result<String> {
    if let Ok(value) = env::var(key) {
        return Ok(value);
    }

    let settings = Settings::load()
        .with_context(|| format!("Environment variable not found: {key}"))?;
    settings
        .env
        .get(key)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Environment variable not found: {key}"))
}

/// Tries several environment variables in order with fallback to settings.
pub fn get_env_vars(keys: &[&str]) -> Result<String> {
    keys.iter()
        .find_map(|key| get_env_var(key).ok())
        .ok_or_else(|| anyhow::anyhow!("None of the environment variables found: {keys:?}"))
}
