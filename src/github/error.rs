//! GitHub-specific error handling.

use thiserror::Error;

/// GitHub REST API errors.
#[derive(Error, Debug)]
pub enum GitHubError {
    /// No token found in the environment or settings file.
    #[error("GitHub token not found. Set GITHUB_TOKEN or GH_TOKEN environment variable")]
    TokenNotFound,

    /// The configured API base URL cannot be used.
    #[error("Invalid GitHub API URL: {0}")]
    InvalidBaseUrl(String),

    /// Network connectivity error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The API answered with a non-success status.
    #[error("GitHub API request failed: HTTP {status}: {body}")]
    ApiRequestFailed {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("Invalid response format from GitHub API: {0}")]
    InvalidResponseFormat(String),

    /// A file was found but its content could not be decoded as text.
    #[error("Failed to decode file content: {0}")]
    ContentDecodeFailed(String),
}
