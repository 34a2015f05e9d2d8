//! Event command — handles one `pull_request` webhook delivery.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use super::parse_format;
use crate::github::{GitHubClient, PullRequestEvent};
use crate::wip::{self, EventOutcome};

/// Event command options.
#[derive(Parser)]
pub struct EventCommand {
    /// Path to the webhook payload JSON (e.g. `$GITHUB_EVENT_PATH`).
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub payload: PathBuf,

    /// Resolves and prints the status without publishing a check run.
    #[arg(long)]
    pub dry_run: bool,

    /// Output format: yaml (default), json.
    #[arg(long, default_value = "yaml")]
    pub format: String,
}

impl EventCommand {
    /// Executes the event command.
    pub async fn execute(self) -> Result<()> {
        let format = parse_format(&self.format)?;
        let content = fs::read_to_string(&self.payload)
            .with_context(|| format!("Failed to read payload: {}", self.payload.display()))?;
        let event: PullRequestEvent = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse payload: {}", self.payload.display()))?;

        let client = GitHubClient::from_env()?;

        if self.dry_run {
            let status = wip::resolve(&client, &event.repo_ref(), &event.pull_request).await?;
            println!("{}", format.render(&status)?.trim_end());
            return Ok(());
        }

        match wip::dispatch_event(&client, &event).await {
            EventOutcome::Published(status) | EventOutcome::Unchanged(status) => {
                println!("{}", format.render(&status)?.trim_end());
            }
            EventOutcome::Ignored(action) => {
                info!(action = %action, "Nothing to do for this action");
            }
            EventOutcome::Failed(message) => {
                eprintln!("warning: event not handled: {message}");
            }
        }

        Ok(())
    }
}
