//! GitHub collaborator interface.
//!
//! The engine in [`crate::wip`] never talks to the network directly. Every
//! external read or write goes through [`GitHubApi`], which is implemented by
//! the REST [`GitHubClient`] in production and by in-memory doubles in tests
//! and in the offline `evaluate` command.

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod check_run;
pub mod client;
pub mod error;
pub mod payload;

pub use check_run::{CheckRunConclusion, CheckRunOutput, CheckRunRequest, CheckRunStatus};
pub use client::GitHubClient;
pub use error::GitHubError;
pub use payload::{PullRequest, PullRequestEvent};

/// Boxed future returned by [`GitHubApi`] methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Owner and name of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    /// Account or organisation login.
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepoRef {
    /// Creates a repository reference.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// The parts of a previously published check run the change detector reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRunSummary {
    /// Conclusion, absent while the run is still in progress.
    #[serde(default)]
    pub conclusion: Option<String>,
    /// Output block of the run.
    #[serde(default)]
    pub output: CheckRunSummaryOutput,
}

/// Output block of a previously published check run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRunSummaryOutput {
    /// Output title.
    #[serde(default)]
    pub title: Option<String>,
}

/// External operations the status engine depends on.
pub trait GitHubApi: Send + Sync {
    /// Returns the decoded text of a repository file, or `None` on any failure.
    fn fetch_file<'a>(&'a self, repo: &'a RepoRef, path: &'a str) -> ApiFuture<'a, Option<String>>;

    /// Returns the first line of each commit message on a pull request.
    fn list_commit_subjects<'a>(
        &'a self,
        repo: &'a RepoRef,
        pull_number: u64,
    ) -> ApiFuture<'a, Result<Vec<String>>>;

    /// Lists existing check runs with the given name on a commit.
    fn list_check_runs<'a>(
        &'a self,
        repo: &'a RepoRef,
        head_sha: &'a str,
        check_name: &'a str,
    ) -> ApiFuture<'a, Result<Vec<CheckRunSummary>>>;

    /// Publishes a new check run.
    fn create_check_run<'a>(
        &'a self,
        repo: &'a RepoRef,
        request: &'a CheckRunRequest,
    ) -> ApiFuture<'a, Result<()>>;
}
