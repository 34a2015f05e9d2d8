//! GitHub REST client implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use super::{ApiFuture, CheckRunRequest, CheckRunSummary, GitHubApi, GitHubError, RepoRef};
use crate::utils::settings::{get_env_var, get_env_vars};

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// HTTP request timeout for GitHub API calls.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum page size the commits endpoint accepts.
const COMMITS_PER_PAGE: &str = "100";

const USER_AGENT: &str = concat!("wip-check/", env!("CARGO_PKG_VERSION"));

/// `GET /repos/{owner}/{repo}/contents/{path}` response.
#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
}

/// Entry of `GET /repos/{owner}/{repo}/pulls/{number}/commits`.
#[derive(Deserialize)]
struct CommitEntry {
    commit: CommitDetail,
}

#[derive(Deserialize)]
struct CommitDetail {
    message: String,
}

/// `GET /repos/{owner}/{repo}/commits/{ref}/check-runs` response.
#[derive(Deserialize)]
struct CheckRunList {
    check_runs: Vec<CheckRunSummary>,
}

/// GitHub REST API client.
pub struct GitHubClient {
    /// HTTP client for API requests.
    client: Client,
    /// API root, e.g. `https://api.github.com`.
    base_url: Url,
    /// Bearer token (installation or personal access token).
    token: String,
}

impl GitHubClient {
    /// Creates a client for the given API root.
    pub fn new(base_url: &str, token: String) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| GitHubError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(GitHubError::InvalidBaseUrl(base_url.to_string()).into());
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: parsed,
            token,
        })
    }

    /// Creates a client from `GITHUB_TOKEN`/`GH_TOKEN` and `GITHUB_API_URL`.
    pub fn from_env() -> Result<Self> {
        let token =
            get_env_vars(&["GITHUB_TOKEN", "GH_TOKEN"]).map_err(|_| GitHubError::TokenNotFound)?;
        let base_url =
            get_env_var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        debug!(base_url = %base_url, "Creating GitHub client from environment");
        Self::new(&base_url, token)
    }

    /// Appends percent-encoded path segments to the API root.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GitHubError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| GitHubError::NetworkError(e.to_string()))?;

        check_error_response(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "Sending GitHub API request");
        let response = self.send(self.client.get(url)).await?;
        let body = response
            .json::<T>()
            .await
            .map_err(|e| GitHubError::InvalidResponseFormat(e.to_string()))?;
        Ok(body)
    }

    async fn try_fetch_file(&self, repo: &RepoRef, path: &str) -> Result<Option<String>> {
        let mut segments = vec!["repos", repo.owner.as_str(), repo.name.as_str(), "contents"];
        segments.extend(path.split('/').filter(|s| !s.is_empty() && *s != "."));
        let url = self.endpoint(&segments)?;

        let body: ContentResponse = self.get_json(url).await?;
        let content = match body.content {
            Some(content) if !content.is_empty() => content,
            _ => return Ok(None),
        };
        if let Some(encoding) = body.encoding.as_deref() {
            if encoding != "base64" {
                return Err(GitHubError::ContentDecodeFailed(format!(
                    "unsupported encoding {encoding:?}"
                ))
                .into());
            }
        }

        decode_content(&content).map(Some)
    }

    async fn try_list_commit_subjects(&self, repo: &RepoRef, pull_number: u64) -> Result<Vec<String>> {
        let number = pull_number.to_string();
        let mut url = self.endpoint(&[
            "repos",
            repo.owner.as_str(),
            repo.name.as_str(),
            "pulls",
            number.as_str(),
            "commits",
        ])?;
        url.query_pairs_mut().append_pair("per_page", COMMITS_PER_PAGE);

        let commits: Vec<CommitEntry> = self.get_json(url).await?;
        Ok(commits
            .into_iter()
            .map(|entry| first_line(&entry.commit.message).to_string())
            .collect())
    }

    async fn try_list_check_runs(
        &self,
        repo: &RepoRef,
        head_sha: &str,
        check_name: &str,
    ) -> Result<Vec<CheckRunSummary>> {
        let mut url = self.endpoint(&[
            "repos",
            repo.owner.as_str(),
            repo.name.as_str(),
            "commits",
            head_sha,
            "check-runs",
        ])?;
        url.query_pairs_mut().append_pair("check_name", check_name);

        let list: CheckRunList = self
            .get_json(url)
            .await
            .with_context(|| format!("Failed to list check runs for {repo}@{head_sha}"))?;
        Ok(list.check_runs)
    }

    async fn try_create_check_run(&self, repo: &RepoRef, request: &CheckRunRequest) -> Result<()> {
        let url = self.endpoint(&["repos", repo.owner.as_str(), repo.name.as_str(), "check-runs"])?;

        info!(
            repo = %repo,
            head_sha = %request.head_sha,
            status = ?request.status,
            title = %request.output.title,
            "Creating check run"
        );

        self.send(self.client.post(url).json(request))
            .await
            .with_context(|| format!("Failed to create check run for {repo}"))?;
        Ok(())
    }
}

/// Decodes base64 file content as returned by the contents API.
///
/// The API wraps the encoded text at 60 columns, so whitespace is stripped first.
fn decode_content(content: &str) -> Result<String> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| GitHubError::ContentDecodeFailed(e.to_string()))?;
    let text =
        String::from_utf8(bytes).map_err(|e| GitHubError::ContentDecodeFailed(e.to_string()))?;
    Ok(text)
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

/// Checks an HTTP response for error status and returns a structured error
/// if non-success.
async fn check_error_response(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_else(|e| {
        debug!("Failed to read error response body: {e}");
        String::new()
    });
    Err(GitHubError::ApiRequestFailed { status, body }.into())
}

impl GitHubApi for GitHubClient {
    fn fetch_file<'a>(&'a self, repo: &'a RepoRef, path: &'a str) -> ApiFuture<'a, Option<String>> {
        Box::pin(async move {
            match self.try_fetch_file(repo, path).await {
                Ok(content) => content,
                Err(e) => {
                    debug!(repo = %repo, path, error = %e, "Failed to fetch repository file");
                    None
                }
            }
        })
    }

    fn list_commit_subjects<'a>(
        &'a self,
        repo: &'a RepoRef,
        pull_number: u64,
    ) -> ApiFuture<'a, Result<Vec<String>>> {
        Box::pin(async move {
            self.try_list_commit_subjects(repo, pull_number)
                .await
                .with_context(|| format!("Failed to list commits of {repo}#{pull_number}"))
        })
    }

    fn list_check_runs<'a>(
        &'a self,
        repo: &'a RepoRef,
        head_sha: &'a str,
        check_name: &'a str,
    ) -> ApiFuture<'a, Result<Vec<CheckRunSummary>>> {
        Box::pin(self.try_list_check_runs(repo, head_sha, check_name))
    }

    fn create_check_run<'a>(
        &'a self,
        repo: &'a RepoRef,
        request: &'a CheckRunRequest,
    ) -> ApiFuture<'a, Result<()>> {
        Box::pin(self.try_create_check_run(repo, request))
    }
}
