//! Amenity CRUD handlers.

use crate::models::{Amenity, AmenityRequest};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use stayhub_core::{AppError, AuthUser, RequireAdmin};
use uuid::Uuid;

/// `POST /amenities`
///
/// # Errors
///
/// 409 if the name is taken.
pub async fn create_amenity(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(req): Json<AmenityRequest>,
) -> Result<(StatusCode, Json<Amenity>), AppError> {
    let amenity = Amenity {
        id: Uuid::new_v4(),
        name: req.name,
        created_at: Utc::now(),
    };

    let created = state.amenities.create(&amenity).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /amenities`
///
/// # Errors
///
/// 500 on storage failure.
pub async fn list_amenities(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<Amenity>>, AppError> {
    Ok(Json(state.amenities.list().await?))
}

/// `GET /amenities/:id`
///
/// # Errors
///
/// 404 if the amenity does not exist.
pub async fn get_amenity(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Amenity>, AppError> {
    let amenity = state
        .amenities
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Amenity", id))?;
    Ok(Json(amenity))
}

/// `PUT /amenities/:id`
///
/// # Errors
///
/// 404 if absent, 409 if the new name is taken.
pub async fn update_amenity(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<AmenityRequest>,
) -> Result<Json<Amenity>, AppError> {
    let renamed = state
        .amenities
        .rename(id, &req.name)
        .await?
        .ok_or_else(|| AppError::not_found("Amenity", id))?;
    Ok(Json(renamed))
}

/// `DELETE /amenities/:id`
///
/// # Errors
///
/// 404 if the amenity does not exist.
pub async fn delete_amenity(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.amenities.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Amenity", id))
    }
}
