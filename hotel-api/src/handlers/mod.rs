//! HTTP handlers.

pub mod amenities;
pub mod hotels;

use crate::models::MessageResponse;
use axum::Json;

/// `GET /health`
pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "ok".to_string(),
    })
}
