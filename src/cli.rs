//! CLI interface for wip-check.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::data::OutputFormat;

pub mod config;
pub mod evaluate;
pub mod event;

/// wip-check: Work-in-progress check runs for GitHub pull requests.
#[derive(Parser)]
#[command(name = "wip-check")]
#[command(about = "Work-in-progress check runs for GitHub pull requests", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Handles a pull_request webhook payload against the GitHub API.
    Event(event::EventCommand),
    /// Resolves the status of a pull request described on the command line.
    Evaluate(evaluate::EvaluateCommand),
    /// Configuration information.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Event(event_cmd) => event_cmd.execute().await,
            Commands::Evaluate(evaluate_cmd) => evaluate_cmd.execute().await,
            Commands::Config(config_cmd) => config_cmd.execute(),
        }
    }
}

/// Parses a `--format` value, rejecting unknown formats.
pub(crate) fn parse_format(format: &str) -> Result<OutputFormat> {
    format
        .parse()
        .map_err(|()| anyhow::anyhow!("Unknown output format {format:?}, expected yaml or json"))
}
