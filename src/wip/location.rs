//! Places on a pull request where markers are searched for.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A searchable part of a pull request.
///
/// Values that are not recognised are kept verbatim so a configuration can be
/// echoed back unchanged, but they never match any data source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Location {
    /// Pull request title.
    Title,
    /// Label names.
    Label,
    /// First line of each commit message.
    Commit,
    /// Anything else a user wrote in the configuration.
    Other(String),
}

impl Location {
    /// Returns the configuration spelling of this location.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Location::Title => "title",
            Location::Label => "label",
            Location::Commit => "commit",
            Location::Other(other) => other,
        }
    }
}

impl From<&str> for Location {
    fn from(value: &str) -> Self {
        match value {
            "title" => Location::Title,
            "label" => Location::Label,
            "commit" => Location::Commit,
            other => Location::Other(other.to_string()),
        }
    }
}

impl From<String> for Location {
    fn from(value: String) -> Self {
        match value.as_str() {
            "title" | "label" | "commit" => Location::from(value.as_str()),
            _ => Location::Other(value),
        }
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        match location {
            Location::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
