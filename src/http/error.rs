//! Client-facing errors.
//!
//! Local errors are JSON `{"detail": ...}`. Upstream non-200 answers are
//! relayed with the same status and body bytes.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::security::bearer::MISSING_BEARER_MESSAGE;
use crate::upstream::UpstreamError;

/// Everything a relay handler can fail with.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{}", MISSING_BEARER_MESSAGE)]
    MissingBearer,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl RelayError {
    /// Status code the caller will see.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingBearer => StatusCode::UNAUTHORIZED,
            RelayError::Upstream(err) => match err {
                UpstreamError::Status { status, .. } => *status,
                UpstreamError::InvalidFileId(_) => StatusCode::NOT_FOUND,
                UpstreamError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                UpstreamError::Transport { .. } | UpstreamError::InvalidJson { .. } => {
                    StatusCode::BAD_GATEWAY
                }
                UpstreamError::InvalidUrl(_) | UpstreamError::Client(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

fn detail(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            RelayError::Upstream(UpstreamError::Status {
                body, content_type, ..
            }) => {
                let mut response = (status, body).into_response();
                match content_type {
                    Some(value) => {
                        response.headers_mut().insert(header::CONTENT_TYPE, value);
                    }
                    None => {
                        response.headers_mut().remove(header::CONTENT_TYPE);
                    }
                }
                response
            }
            RelayError::Upstream(
                err @ (UpstreamError::InvalidUrl(_) | UpstreamError::Client(_)),
            ) => {
                tracing::error!(error = %err, "Relay misconfigured");
                detail(status, "Internal relay error".to_string())
            }
            other => detail(status, other.to_string()),
        }
    }
}
