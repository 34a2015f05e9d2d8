//! Check-run request body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckRunStatus {
    /// Waiting to start.
    Queued,
    /// Running; no conclusion yet.
    InProgress,
    /// Finished with a conclusion.
    Completed,
}

/// Final result of a completed check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckRunConclusion {
    /// Passed.
    Success,
    /// Failed.
    Failure,
    /// Neither passed nor failed.
    Neutral,
    /// Cancelled before completion.
    Cancelled,
    /// Skipped.
    Skipped,
    /// Timed out.
    TimedOut,
    /// Needs a manual action.
    ActionRequired,
}

/// Output block shown on the check-run page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRunOutput {
    /// Headline.
    pub title: String,
    /// Markdown summary.
    pub summary: String,
    /// Optional markdown details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Body of `POST /repos/{owner}/{repo}/check-runs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRunRequest {
    /// Check name.
    pub name: String,
    /// Commit the run is attached to.
    pub head_sha: String,
    /// Lifecycle state.
    pub status: CheckRunStatus,
    /// Conclusion, required when `status` is `completed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<CheckRunConclusion>,
    /// When the run started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// When the run completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Output block.
    pub output: CheckRunOutput,
}
