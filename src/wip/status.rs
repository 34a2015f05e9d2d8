//! Review-readiness resolution and check-run reconciliation.

use std::sync::LazyLock;

use anyhow::Result;
use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::{self, ConfigSet, Configuration};
use super::matcher::{Candidate, MatchResult, Matcher};
use super::output;
use crate::github::{GitHubApi, PullRequest, RepoRef};

/// Name of the published check run.
pub const CHECK_NAME: &str = "WIP";

/// Phrase in a pull request body that forces the ready state.
pub const OVERRIDE_PHRASE: &str = "@wip ready for review";

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static OVERRIDE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?i){}", regex::escape(OVERRIDE_PHRASE))).unwrap());

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static OVERRIDE_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new("(?i)override").unwrap());

/// Resolved review-readiness of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Whether the pull request is a work in progress.
    pub wip: bool,
    /// Set when the override phrase forced the ready state.
    #[serde(rename = "override", default, skip_serializing_if = "Option::is_none")]
    pub overridden: Option<bool>,
    /// Configurations that were evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configs: Option<Vec<Configuration>>,
    /// Whether the configurations came from the repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual: Option<bool>,
    /// The match that made the pull request a work in progress.
    #[serde(flatten)]
    pub matched: Option<MatchResult>,
}

impl Status {
    /// The ready state forced by the override phrase.
    #[must_use]
    pub fn overridden() -> Self {
        Self {
            wip: false,
            overridden: Some(true),
            configs: None,
            manual: None,
            matched: None,
        }
    }

    /// Returns whether the override phrase forced this status.
    #[must_use]
    pub fn is_override(&self) -> bool {
        self.overridden.unwrap_or(false)
    }
}

/// Returns whether `body` contains the override phrase, in any case.
#[must_use]
pub fn has_override_phrase(body: &str) -> bool {
    OVERRIDE_PATTERN.is_match(body)
}

/// Resolves the status of a pull request.
///
/// Configuration problems fall back to the defaults. The only error returned
/// is a failure to list commits when some configuration needs them.
pub async fn resolve(api: &dyn GitHubApi, repo: &RepoRef, pr: &PullRequest) -> Result<Status> {
    if has_override_phrase(pr.body.as_deref().unwrap_or("")) {
        info!(pr = pr.number, "Override phrase found in pull request body");
        return Ok(Status::overridden());
    }

    let set = config::load(api, repo).await;
    let subjects = if set.needs_commits() {
        Some(api.list_commit_subjects(repo, pr.number).await?)
    } else {
        None
    };

    Ok(evaluate(
        set,
        pr.title.as_deref().unwrap_or(""),
        &pr.label_names(),
        subjects.as_deref(),
    ))
}

/// Evaluates configurations in order; the first configuration that matches wins.
pub fn evaluate(
    set: ConfigSet,
    title: &str,
    labels: &[String],
    subjects: Option<&[String]>,
) -> Status {
    let matched = set.configs.iter().find_map(|config| {
        let matcher = Matcher::for_config(config);
        matcher
            .test(Candidate::Title(title))
            .or_else(|| matcher.test(Candidate::Label(labels)))
            .or_else(|| matcher.test(Candidate::Commit(subjects)))
    });

    Status {
        wip: matched.is_some(),
        overridden: None,
        configs: Some(set.configs),
        manual: Some(set.manual),
        matched,
    }
}

/// Returns whether `next` differs from the check run last published on `head_sha`.
///
/// Only the first existing check run is inspected.
pub async fn has_change(
    api: &dyn GitHubApi,
    repo: &RepoRef,
    head_sha: &str,
    next: &Status,
) -> Result<bool> {
    let runs = api.list_check_runs(repo, head_sha, CHECK_NAME).await?;
    info!(count = runs.len(), head_sha, "Found existing check runs");

    let Some(prior) = runs.first() else {
        return Ok(true);
    };
    debug!(conclusion = ?prior.conclusion, title = ?prior.output.title, "Found check run");

    let prior_wip = prior.conclusion.as_deref() != Some("success");
    let prior_override = prior
        .output
        .title
        .as_deref()
        .is_some_and(|title| OVERRIDE_MARKER.is_match(title));

    Ok(prior_wip != next.wip || prior_override != next.is_override())
}

/// Publishes `status` as a new check run on `head_sha`.
pub async fn update(
    api: &dyn GitHubApi,
    repo: &RepoRef,
    head_sha: &str,
    status: &Status,
) -> Result<()> {
    let request = output::check_run_request(head_sha, status, Utc::now());
    debug!(request = ?request, "Check run request");
    api.create_check_run(repo, &request).await
}
