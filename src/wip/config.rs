//! Repository configuration: which terms to look for, and where.
//!
//! The configuration file lives at [`CONFIG_PATH`] and may hold a single
//! mapping or a list of mappings:
//!
//! ```yaml
//! - terms: [rfc]
//!   locations: title
//! - terms:
//!     - wip
//!     - 🚧
//!   locations: [title, label, commit]
//! ```
//!
//! Anything that cannot be read or understood falls back to
//! [`Configuration::default`]; configuration problems never fail an event.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::{info, warn};

use super::location::Location;
use crate::data::parse_structured_text;
use crate::github::{GitHubApi, RepoRef};

/// Repository-relative path of the configuration file.
pub const CONFIG_PATH: &str = ".github/apps/wip.yml";

/// Terms used when a configuration does not provide any.
pub const DEFAULT_TERMS: [&str; 7] = [
    "wip",
    "work in progress",
    "work-in-progress",
    "do not merge",
    "do-not-merge",
    "rfc",
    "🚧",
];

/// Locations used when a configuration does not provide any.
pub const DEFAULT_LOCATIONS: [Location; 2] = [Location::Title, Location::Label];

/// One set of terms and the locations they are searched in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Terms in priority order.
    pub terms: Vec<String>,
    /// Enabled locations.
    pub locations: Vec<Location>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            terms: default_terms(),
            locations: default_locations(),
        }
    }
}

impl Configuration {
    /// Returns whether `location` is enabled.
    #[must_use]
    pub fn enables(&self, location: &Location) -> bool {
        self.locations.contains(location)
    }
}

/// Configurations for one event and where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSet {
    /// Configurations in declaration order.
    pub configs: Vec<Configuration>,
    /// `true` when read from the repository, `false` for the defaults.
    pub manual: bool,
}

impl ConfigSet {
    /// The compiled-in default configuration.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            configs: vec![Configuration::default()],
            manual: false,
        }
    }

    /// Returns whether any configuration searches commit subjects.
    #[must_use]
    pub fn needs_commits(&self) -> bool {
        self.configs
            .iter()
            .any(|config| config.enables(&Location::Commit))
    }
}

fn default_terms() -> Vec<String> {
    DEFAULT_TERMS.iter().map(|term| (*term).to_string()).collect()
}

fn default_locations() -> Vec<Location> {
    DEFAULT_LOCATIONS.to_vec()
}

/// Fetches and normalizes the repository configuration.
pub async fn load(api: &dyn GitHubApi, repo: &RepoRef) -> ConfigSet {
    let value = api
        .fetch_file(repo, CONFIG_PATH)
        .await
        .as_deref()
        .and_then(parse_structured_text);

    normalize(value)
}

/// Turns a parsed configuration document into validated configurations.
pub fn normalize(value: Option<Value>) -> ConfigSet {
    let entries = match value.map(untag) {
        None | Some(Value::Null) => None,
        Some(Value::Mapping(mapping)) => Some(vec![mapping]),
        Some(Value::Sequence(items)) => collect_mappings(items),
        Some(other) => {
            warn!(
                config = ?other,
                "Invalid configuration, expected a mapping or a list of mappings"
            );
            None
        }
    };

    let Some(entries) = entries else {
        let defaults = ConfigSet::defaults();
        info!(configs = ?defaults.configs, "Use default configuration");
        return defaults;
    };

    let configs: Vec<Configuration> = entries.iter().map(normalize_entry).collect();
    info!(configs = ?configs, "Use manual configuration");

    ConfigSet {
        configs,
        manual: true,
    }
}

/// Accepts a list only when it is non-empty and every element is a mapping.
fn collect_mappings(items: Vec<Value>) -> Option<Vec<Mapping>> {
    if items.is_empty() {
        warn!("Invalid configuration, the list of configurations is empty");
        return None;
    }

    let mut mappings = Vec::with_capacity(items.len());
    for item in items {
        match untag(item) {
            Value::Mapping(mapping) => mappings.push(mapping),
            other => {
                warn!(entry = ?other, "Invalid configuration entry, expected a mapping");
                return None;
            }
        }
    }
    Some(mappings)
}

fn normalize_entry(entry: &Mapping) -> Configuration {
    let terms = normalize_field(entry.get("terms")).unwrap_or_else(default_terms);
    let locations = normalize_field(entry.get("locations"))
        .map(|values| values.into_iter().map(Location::from).collect())
        .unwrap_or_else(default_locations);

    Configuration { terms, locations }
}

/// Normalizes one field to a list of strings.
///
/// Returns `None` when the field is missing, falsy, or an empty list so the
/// caller substitutes the default. A single value becomes a one-element list.
fn normalize_field(value: Option<&Value>) -> Option<Vec<String>> {
    let value = value.map(|v| untag(v.clone()))?;
    if is_falsy(&value) {
        return None;
    }

    match value {
        Value::Sequence(items) if items.is_empty() => None,
        Value::Sequence(items) => Some(items.iter().map(coerce_to_string).collect()),
        scalar => Some(vec![coerce_to_string(&scalar)]),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0 || f.is_nan()),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => items
            .iter()
            .map(coerce_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Mapping(_) => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
        Value::Tagged(tagged) => coerce_to_string(&tagged.value),
    }
}

/// Formats a number the way a template string would: whole floats drop the
/// fraction and infinities are spelled out.
fn number_to_string(n: &serde_yaml::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_infinite() => {
            if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
        }
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

fn untag(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}
