//! HTTP handlers for search.

use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stayhub_core::AppError;

/// Query string for `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search term, matched as a prefix.
    pub q: Option<String>,
}

/// `GET /search?q=term`
///
/// Proxies a prefix query to the engine and returns its JSON unchanged.
///
/// # Errors
///
/// 400 when `q` is missing or empty, 502 when the engine fails.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, AppError> {
    let term = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::bad_request("Query parameter 'q' is required"))?;

    let results = state
        .index
        .search(term)
        .await
        .map_err(|e| AppError::bad_gateway("Search engine unavailable").with_source(e.into()))?;

    Ok(Json(results))
}

/// Generic confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// `GET /health`
pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "ok".to_string(),
    })
}
