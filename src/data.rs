//! Data processing and serialization.

use anyhow::Result;
use serde::Serialize;

pub mod yaml;

pub use yaml::*;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// YAML format.
    #[default]
    Yaml,
    /// JSON format.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(()),
        }
    }
}

impl OutputFormat {
    /// Serializes `data` in this format.
    pub fn render<T: Serialize>(self, data: &T) -> Result<String> {
        match self {
            OutputFormat::Yaml => to_yaml(data),
            OutputFormat::Json => to_json(data),
        }
    }
}
