//! # wip-check
//!
//! Marks GitHub pull requests as work in progress with a `WIP` check run.
//!
//! A pull request is a work in progress when a configured term such as `wip`
//! or `do not merge` appears in its title, labels, or commit subjects. Writing
//! `@wip ready for review` in the pull request body overrides the terms.
//!
//! ## Quick Start
//!
//! ```rust
//! use wip_check::wip::{status, ConfigSet};
//!
//! let status = status::evaluate(ConfigSet::defaults(), "[WIP] add parser", &[], None);
//! assert!(status.wip);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod data;
pub mod github;
pub mod utils;
pub mod wip;

pub use crate::cli::Cli;

/// The current version of wip-check.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
