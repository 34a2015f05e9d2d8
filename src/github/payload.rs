//! Webhook payload types for `pull_request` events.

use serde::{Deserialize, Serialize};

use super::RepoRef;

/// A `pull_request` webhook delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestEvent {
    /// Event action, e.g. `opened` or `labeled`.
    pub action: String,
    /// The pull request the event refers to.
    pub pull_request: PullRequest,
    /// Repository the pull request belongs to.
    pub repository: Repository,
}

impl PullRequestEvent {
    /// Returns the repository as a [`RepoRef`].
    pub fn repo_ref(&self) -> RepoRef {
        RepoRef::new(&self.repository.owner.login, &self.repository.name)
    }
}

/// Pull request fields used by the status engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// Pull request number.
    pub number: u64,
    /// Title, possibly null.
    #[serde(default)]
    pub title: Option<String>,
    /// Description body, null when empty.
    #[serde(default)]
    pub body: Option<String>,
    /// Applied labels.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Head commit of the pull request.
    pub head: Head,
}

impl PullRequest {
    /// Returns the label names in payload order.
    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|label| label.name.clone()).collect()
    }
}

/// Pull request label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// Label name.
    pub name: String,
}

/// Head reference of a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Head {
    /// Commit SHA.
    pub sha: String,
}

/// Repository section of a webhook payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name.
    pub name: String,
    /// Owning account.
    pub owner: Owner,
}

/// Owner of a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    /// Account login.
    pub login: String,
}
