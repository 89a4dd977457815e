//! GitLab API error types.

use thiserror::Error;

/// Errors that can occur while talking to the GitLab API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build GitLab HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request could not be sent or its response could not be read.
    #[error("GitLab request '{operation}' failed: {source}")]
    Request {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    /// GitLab answered with a status other than the expected one.
    #[error("GitLab request '{operation}' returned HTTP {status}: {body}")]
    UnexpectedStatus {
        operation: String,
        status: u16,
        body: String,
    },

    /// The response body did not match the expected JSON shape.
    #[error("GitLab request '{operation}' returned malformed JSON: {source}")]
    MalformedResponse {
        operation: String,
        #[source]
        source: serde_json::Error,
    },
}
