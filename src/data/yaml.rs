//! YAML and JSON processing utilities.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_yaml::Value;
use tracing::debug;

/// Parses arbitrary YAML text into a generic value.
///
/// Parsing is lenient: malformed text yields `None` instead of an error, and
/// an empty document yields `Some(Value::Null)`.
pub fn parse_structured_text(text: &str) -> Option<Value> {
    match serde_yaml::from_str::<Value>(text) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "Failed to parse structured text");
            None
        }
    }
}

/// Serializes a data structure to a YAML string.
pub fn to_yaml<T: Serialize>(data: &T) -> Result<String> {
    serde_yaml::to_string(data).context("Failed to serialize to YAML")
}

/// Serializes a data structure to a pretty-printed JSON string.
pub fn to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize to JSON")
}
