//! Evaluate command — resolves a status offline.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::parse_format;
use crate::github::payload::{Head, Label};
use crate::github::{PullRequest, RepoRef};
use crate::wip::{self, LocalSource};

/// Evaluate command options.
#[derive(Parser)]
pub struct EvaluateCommand {
    /// Pull request title.
    #[arg(long, default_value = "")]
    pub title: String,

    /// Pull request body.
    #[arg(long)]
    pub body: Option<String>,

    /// Label name; may be repeated.
    #[arg(long = "label", value_name = "NAME")]
    pub labels: Vec<String>,

    /// Commit subject; may be repeated.
    #[arg(long = "commit", value_name = "SUBJECT")]
    pub commits: Vec<String>,

    /// Configuration file to use instead of the defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format: yaml (default), json.
    #[arg(long, default_value = "yaml")]
    pub format: String,
}

impl EvaluateCommand {
    /// Executes the evaluate command.
    pub async fn execute(self) -> Result<()> {
        let format = parse_format(&self.format)?;
        let config = match &self.config {
            Some(path) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?,
            ),
            None => None,
        };

        let source = LocalSource::new(config, self.commits.clone());
        let pr = self.pull_request();
        let status = wip::resolve(&source, &RepoRef::new("local", "local"), &pr).await?;

        println!("{}", format.render(&status)?.trim_end());
        Ok(())
    }

    fn pull_request(&self) -> PullRequest {
        PullRequest {
            number: 0,
            title: Some(self.title.clone()),
            body: self.body.clone(),
            labels: self
                .labels
                .iter()
                .map(|name| Label { name: name.clone() })
                .collect(),
            head: Head {
                sha: String::new(),
            },
        }
    }
}
