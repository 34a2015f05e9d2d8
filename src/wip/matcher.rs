//! Term matching against pull request locations.
//!
//! Matching is case-insensitive substring search: a term matches a candidate
//! string when the lowercased term occurs anywhere in the lowercased
//! candidate. A candidate equal to the term is the degenerate case of this.
//! Terms are used as written, so surrounding spaces are part of the needle.
//! Terms that are empty or whitespace-only never match.

use serde::{Deserialize, Serialize};

use super::config::Configuration;
use super::location::Location;

/// Data available for one location.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    /// The pull request title.
    Title(&'a str),
    /// Label names.
    Label(&'a [String]),
    /// Commit subjects, `None` when they were not fetched.
    Commit(Option<&'a [String]>),
}

impl Candidate<'_> {
    /// Returns the location this data belongs to.
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Candidate::Title(_) => Location::Title,
            Candidate::Label(_) => Location::Label,
            Candidate::Commit(_) => Location::Commit,
        }
    }

    fn texts(&self) -> Option<Vec<&str>> {
        match self {
            Candidate::Title(title) => Some(vec![*title]),
            Candidate::Label(labels) => Some(labels.iter().map(String::as_str).collect()),
            Candidate::Commit(subjects) => {
                subjects.map(|subjects| subjects.iter().map(String::as_str).collect())
            }
        }
    }
}

/// A successful match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Where the term was found.
    pub location: Location,
    /// The full string that was tested.
    pub text: String,
    /// The configured term that matched.
    #[serde(rename = "match")]
    pub term: String,
}

/// A term matcher bound to one configuration.
#[derive(Debug, Clone)]
pub struct Matcher {
    locations: Vec<Location>,
    /// `(configured term, lowercased needle)` in priority order.
    terms: Vec<(String, String)>,
}

impl Matcher {
    /// Binds a matcher to a set of locations and terms.
    pub fn new(locations: &[Location], terms: &[String]) -> Self {
        let terms = terms
            .iter()
            .filter_map(|term| {
                (!term.trim().is_empty()).then(|| (term.clone(), term.to_lowercase()))
            })
            .collect();

        Self {
            locations: locations.to_vec(),
            terms,
        }
    }

    /// Binds a matcher to a configuration.
    pub fn for_config(config: &Configuration) -> Self {
        Self::new(&config.locations, &config.terms)
    }

    /// Tests one location's data.
    ///
    /// Candidate strings are scanned in order and, for each, terms are tried
    /// in priority order; the first hit wins. Returns `None` when the location
    /// is disabled, the data is absent, or nothing matches.
    pub fn test(&self, candidate: Candidate<'_>) -> Option<MatchResult> {
        let location = candidate.location();
        if !self.locations.contains(&location) {
            return None;
        }

        for text in candidate.texts()? {
            let haystack = text.to_lowercase();
            if let Some((term, _)) = self
                .terms
                .iter()
                .find(|(_, needle)| haystack.contains(needle.as_str()))
            {
                return Some(MatchResult {
                    location,
                    text: text.to_string(),
                    term: term.clone(),
                });
            }
        }

        None
    }
}
