//! Entry point for `pull_request` webhook deliveries.

use anyhow::{Context, Result};
use tracing::{error, info};

use super::status::{self, Status};
use crate::github::{GitHubApi, PullRequestEvent};

/// `pull_request` actions that can change the status.
pub const HANDLED_ACTIONS: [&str; 5] = ["opened", "edited", "labeled", "unlabeled", "synchronize"];

/// What handling an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// A new check run was published.
    Published(Status),
    /// The existing check run already reflects the status.
    Unchanged(Status),
    /// The action does not affect the status.
    Ignored(String),
    /// Handling failed; the error was logged and discarded.
    Failed(String),
}

/// Resolves, compares, and publishes the status for one event.
pub async fn handle_event(api: &dyn GitHubApi, event: &PullRequestEvent) -> Result<EventOutcome> {
    if !HANDLED_ACTIONS.contains(&event.action.as_str()) {
        info!(action = %event.action, "Ignoring pull_request action");
        return Ok(EventOutcome::Ignored(event.action.clone()));
    }

    let repo = event.repo_ref();
    let pr = &event.pull_request;

    let next = status::resolve(api, &repo, pr)
        .await
        .with_context(|| format!("Failed to resolve status of {repo}#{}", pr.number))?;
    info!(
        pr = pr.number,
        wip = next.wip,
        overridden = next.is_override(),
        "Next status"
    );

    let changed = status::has_change(api, &repo, &pr.head.sha, &next).await?;
    let label = if next.wip {
        "work in progress"
    } else {
        "ready for review"
    };

    if !changed {
        info!(pr = pr.number, "Status not changed: {label}");
        return Ok(EventOutcome::Unchanged(next));
    }

    status::update(api, &repo, &pr.head.sha, &next).await?;
    info!(pr = pr.number, "Status changed: {label}");
    Ok(EventOutcome::Published(next))
}

/// Handles an event, logging and discarding any error.
///
/// Webhook redelivery is not guaranteed, so a failed event is reported as
/// [`EventOutcome::Failed`] rather than propagated.
pub async fn dispatch_event(api: &dyn GitHubApi, event: &PullRequestEvent) -> EventOutcome {
    match handle_event(api, event).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let message = format!("{e:#}");
            error!(
                action = %event.action,
                pr = event.pull_request.number,
                error = %message,
                "Failed to handle pull_request event"
            );
            EventOutcome::Failed(message)
        }
    }
}
