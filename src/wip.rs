//! Work-in-progress status engine.
//!
//! A pull request is a work in progress when one of the configured terms
//! appears in one of the configured locations, unless its body contains the
//! override phrase. The resolved [`Status`] is published as a `WIP` check run
//! when it differs from the one already on the head commit.

pub mod config;
pub mod handler;
pub mod local;
pub mod location;
pub mod matcher;
pub mod output;
pub mod status;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{ConfigSet, Configuration, CONFIG_PATH, DEFAULT_TERMS};
pub use handler::{dispatch_event, handle_event, EventOutcome};
pub use local::LocalSource;
pub use location::Location;
pub use matcher::{Candidate, MatchResult, Matcher};
pub use status::{has_change, resolve, update, Status, CHECK_NAME, OVERRIDE_PHRASE};
