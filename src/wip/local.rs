//! Offline data source for evaluating a pull request without the API.

use anyhow::Result;

use super::config::CONFIG_PATH;
use crate::github::{ApiFuture, CheckRunRequest, CheckRunSummary, GitHubApi, RepoRef};

/// A [`GitHubApi`] backed by local data.
///
/// Reads are answered from memory; there are never existing check runs, and
/// publishing is refused.
#[derive(Debug, Clone, Default)]
pub struct LocalSource {
    config: Option<String>,
    subjects: Vec<String>,
}

impl LocalSource {
    /// Creates a source serving `config` as the configuration file and
    /// `subjects` as commit subjects.
    pub fn new(config: Option<String>, subjects: Vec<String>) -> Self {
        Self { config, subjects }
    }
}

impl GitHubApi for LocalSource {
    fn fetch_file<'a>(&'a self, _repo: &'a RepoRef, path: &'a str) -> ApiFuture<'a, Option<String>> {
        Box::pin(async move {
            if path == CONFIG_PATH {
                self.config.clone()
            } else {
                None
            }
        })
    }

    fn list_commit_subjects<'a>(
        &'a self,
        _repo: &'a RepoRef,
        _pull_number: u64,
    ) -> ApiFuture<'a, Result<Vec<String>>> {
        let subjects: Result<Vec<String>> = Ok(self.subjects.clone());
        Box::pin(async move { subjects })
    }

    fn list_check_runs<'a>(
        &'a self,
        _repo: &'a RepoRef,
        _head_sha: &'a str,
        _check_name: &'a str,
    ) -> ApiFuture<'a, Result<Vec<CheckRunSummary>>> {
        let runs: Result<Vec<CheckRunSummary>> = Ok(Vec::new());
        Box::pin(async move { runs })
    }

    fn create_check_run<'a>(
        &'a self,
        repo: &'a RepoRef,
        _request: &'a CheckRunRequest,
    ) -> ApiFuture<'a, Result<()>> {
        let refused: Result<()> = Err(anyhow::anyhow!(
            "Cannot publish check runs for {repo} offline"
        ));
        Box::pin(async move { refused })
    }
}
