//! Route handlers.
//!
//! Every protected handler takes `BearerToken` first so the 401 path never
//! touches the network.

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use serde_json::{json, Value};

use crate::http::error::RelayError;
use crate::http::response::{media_response, JsonBody};
use crate::http::server::AppState;
use crate::security::BearerToken;
use crate::upstream::ListFilesQuery;

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// `GET /me`
pub async fn me(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<JsonBody, RelayError> {
    let body = state.google.userinfo(&token).await?;
    Ok(JsonBody(body))
}

/// `GET /drive/files`
pub async fn list_files(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<ListFilesQuery>,
) -> Result<JsonBody, RelayError> {
    let body = state.google.list_files(&token, &query).await?;
    Ok(JsonBody(body))
}

/// `GET /drive/files/{file_id}`
pub async fn get_file_meta(
    State(state): State<AppState>,
    token: BearerToken,
    Path(file_id): Path<String>,
) -> Result<JsonBody, RelayError> {
    let body = state.google.file_metadata(&token, &file_id).await?;
    Ok(JsonBody(body))
}

/// `GET /drive/files/{file_id}/download`
pub async fn download_file(
    State(state): State<AppState>,
    token: BearerToken,
    Path(file_id): Path<String>,
) -> Result<Response, RelayError> {
    let upstream = state.google.download(&token, &file_id).await?;
    Ok(media_response(upstream))
}
