//! Shared test utilities for the `wip` module.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;

use crate::github::payload::{Head, Label};
use crate::github::{
    ApiFuture, CheckRunRequest, CheckRunSummary, GitHubApi, PullRequest, RepoRef,
};

/// In-memory GitHub double that records every call.
///
/// Commit listing and publishing can be made to fail so tests can check
/// which errors propagate and which are swallowed.
#[derive(Default)]
pub(crate) struct MockGitHub {
    config: Option<String>,
    subjects: Vec<String>,
    subjects_error: Option<String>,
    check_runs: Vec<CheckRunSummary>,
    publish_error: Option<String>,
    fetched_paths: Mutex<Vec<String>>,
    commit_calls: AtomicUsize,
    published: Mutex<Vec<CheckRunRequest>>,
}

impl MockGitHub {
    /// Creates a mock with no configuration file, commits, or check runs.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Serves `text` as the configuration file.
    pub(crate) fn with_config(mut self, text: &str) -> Self {
        self.config = Some(text.to_string());
        self
    }

    /// Returns `subjects` from commit listing.
    pub(crate) fn with_subjects(mut self, subjects: &[&str]) -> Self {
        self.subjects = subjects.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Makes commit listing fail with `message`.
    pub(crate) fn with_failing_subjects(mut self, message: &str) -> Self {
        self.subjects_error = Some(message.to_string());
        self
    }

    /// Returns `runs` from check-run listing.
    pub(crate) fn with_check_runs(mut self, runs: Vec<CheckRunSummary>) -> Self {
        self.check_runs = runs;
        self
    }

    /// Makes publishing fail with `message`.
    pub(crate) fn with_failing_publish(mut self, message: &str) -> Self {
        self.publish_error = Some(message.to_string());
        self
    }

    /// Paths requested through `fetch_file`.
    pub(crate) fn fetched_paths(&self) -> Vec<String> {
        self.fetched_paths.lock().unwrap().clone()
    }

    /// Number of commit-listing calls.
    pub(crate) fn commit_calls(&self) -> usize {
        self.commit_calls.load(Ordering::SeqCst)
    }

    /// Check runs published so far.
    pub(crate) fn published(&self) -> Vec<CheckRunRequest> {
        self.published.lock().unwrap().clone()
    }
}

impl GitHubApi for MockGitHub {
    fn fetch_file<'a>(&'a self, _repo: &'a RepoRef, path: &'a str) -> ApiFuture<'a, Option<String>> {
        self.fetched_paths.lock().unwrap().push(path.to_string());
        let config = self.config.clone();
        Box::pin(async move { config })
    }

    fn list_commit_subjects<'a>(
        &'a self,
        _repo: &'a RepoRef,
        _pull_number: u64,
    ) -> ApiFuture<'a, Result<Vec<String>>> {
        self.commit_calls.fetch_add(1, Ordering::SeqCst);
        let result = match &self.subjects_error {
            Some(message) => Err(anyhow::anyhow!("{message}")),
            None => Ok(self.subjects.clone()),
        };
        Box::pin(async move { result })
    }

    fn list_check_runs<'a>(
        &'a self,
        _repo: &'a RepoRef,
        _head_sha: &'a str,
        _check_name: &'a str,
    ) -> ApiFuture<'a, Result<Vec<CheckRunSummary>>> {
        let runs: Result<Vec<CheckRunSummary>> = Ok(self.check_runs.clone());
        Box::pin(async move { runs })
    }

    fn create_check_run<'a>(
        &'a self,
        _repo: &'a RepoRef,
        request: &'a CheckRunRequest,
    ) -> ApiFuture<'a, Result<()>> {
        let result = match &self.publish_error {
            Some(message) => Err(anyhow::anyhow!("{message}")),
            None => {
                self.published.lock().unwrap().push(request.clone());
                Ok(())
            }
        };
        Box::pin(async move { result })
    }
}

/// Builds a pull request with the given title and labels and no body.
pub(crate) fn pull_request(title: &str, labels: &[&str]) -> PullRequest {
    PullRequest {
        number: 42,
        title: Some(title.to_string()),
        body: None,
        labels: labels
            .iter()
            .map(|name| Label {
                name: (*name).to_string(),
            })
            .collect(),
        head: Head {
            sha: "0123456789abcdef".to_string(),
        },
    }
}
