//! Upstream failure types.

use axum::body::Bytes;
use axum::http::{HeaderValue, StatusCode};
use thiserror::Error;

use crate::upstream::endpoint::Endpoint;

/// Errors from a single upstream call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Google answered with something other than 200.
    #[error("{endpoint} returned {status}")]
    Status {
        endpoint: Endpoint,
        status: StatusCode,
        body: Bytes,
        content_type: Option<HeaderValue>,
    },

    /// The per-endpoint deadline elapsed.
    #[error("{endpoint} timed out after {}s", .endpoint.timeout().as_secs())]
    Timeout { endpoint: Endpoint },

    /// Connection, TLS or protocol failure.
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    /// A 200 whose body does not parse as JSON.
    #[error("{endpoint} returned a body that is not JSON: {source}")]
    InvalidJson {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    /// `.` and `..` cannot be sent as a path segment; no such Drive file exists.
    #[error("File not found: {0}")]
    InvalidFileId(String),

    #[error("invalid upstream URL: {0}")]
    InvalidUrl(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl UpstreamError {
    /// Classify a reqwest failure for `endpoint`.
    pub fn from_reqwest(endpoint: Endpoint, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            UpstreamError::Timeout { endpoint }
        } else {
            UpstreamError::Transport { endpoint, source }
        }
    }
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
