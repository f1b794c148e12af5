//! Success responses relayed to the caller.
//!
//! # Design Decisions
//! - JSON bodies are relayed as the upstream bytes, never re-serialized
//! - Media downloads stream; no buffering of the whole file
//! - Only representation headers (type, length) are copied from upstream

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};

/// A JSON document already validated upstream-side.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Bytes);

impl IntoResponse for JsonBody {
    fn into_response(self) -> Response {
        (
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            self.0,
        )
            .into_response()
    }
}

/// Turn a 200 media response into a streamed passthrough.
pub fn media_response(upstream: reqwest::Response) -> Response {
    let mut headers = HeaderMap::new();
    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));
    headers.insert(header::CONTENT_TYPE, content_type);
    if let Some(length) = upstream.headers().get(header::CONTENT_LENGTH) {
        headers.insert(header::CONTENT_LENGTH, length.clone());
    }

    (headers, Body::from_stream(upstream.bytes_stream())).into_response()
}
