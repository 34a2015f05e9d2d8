//! Check-run rendering.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::config::CONFIG_PATH;
use super::location::Location;
use super::status::{Status, CHECK_NAME, OVERRIDE_PHRASE};
use crate::data::to_yaml;
use crate::github::{CheckRunConclusion, CheckRunOutput, CheckRunRequest, CheckRunStatus};

/// Title of a work-in-progress check run.
pub const TITLE_WIP: &str = "Work in progress";
/// Title of a ready check run.
pub const TITLE_READY: &str = "Ready for review";
/// Title of a ready check run forced by the override phrase.
///
/// Must contain "override": the change detector recognises earlier overrides by it.
pub const TITLE_OVERRIDE: &str = "Ready for review (override)";

/// Builds the check-run request publishing `status` on `head_sha`.
pub fn check_run_request(head_sha: &str, status: &Status, now: DateTime<Utc>) -> CheckRunRequest {
    let (run_status, conclusion, started_at, completed_at) = if status.wip {
        (CheckRunStatus::InProgress, None, Some(now), None)
    } else {
        (
            CheckRunStatus::Completed,
            Some(CheckRunConclusion::Success),
            None,
            Some(now),
        )
    };

    CheckRunRequest {
        name: CHECK_NAME.to_string(),
        head_sha: head_sha.to_string(),
        status: run_status,
        conclusion,
        started_at,
        completed_at,
        output: render(status),
    }
}

/// Renders the output block for `status`.
pub fn render(status: &Status) -> CheckRunOutput {
    if status.is_override() {
        return CheckRunOutput {
            title: TITLE_OVERRIDE.to_string(),
            summary: format!(
                "The status has been manually overridden by `{OVERRIDE_PHRASE}` in the pull request body."
            ),
            text: None,
        };
    }

    let (title, summary) = match &status.matched {
        Some(matched) => (
            TITLE_WIP,
            format!(
                "The {} \"{}\" contains \"{}\".",
                describe(&matched.location),
                matched.text,
                matched.term
            ),
        ),
        None => (
            TITLE_READY,
            "No match found based on configuration.".to_string(),
        ),
    };

    CheckRunOutput {
        title: title.to_string(),
        summary,
        text: configuration_text(status),
    }
}

fn describe(location: &Location) -> &str {
    match location {
        Location::Commit => "commit subject",
        other => other.as_str(),
    }
}

fn configuration_text(status: &Status) -> Option<String> {
    let configs = status.configs.as_ref()?;
    let yaml = match to_yaml(configs) {
        Ok(yaml) => yaml,
        Err(e) => {
            debug!(error = %e, "Failed to render configuration");
            return None;
        }
    };

    let source = if status.manual.unwrap_or(false) {
        format!("Using configuration from `{CONFIG_PATH}`:")
    } else {
        format!("Using the default configuration. Add `{CONFIG_PATH}` to customize it:")
    };

    Some(format!("{source}\n\n```yaml\n{}\n```", yaml.trim_end()))
}
