//! HTTP handlers for reservations.

use crate::clients::ClientError;
use crate::models::{CreateReservationRequest, MessageResponse, Reservation};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use stayhub_core::{AppError, AuthUser};
use uuid::Uuid;

fn upstream_error(err: &ClientError) -> AppError {
    AppError::bad_gateway(err.to_string())
}

/// `POST /reservations`
///
/// The user id always comes from the verified token; a body-supplied id
/// would let one user book on another's behalf. Both existence probes
/// run before the insert and there is no compensation afterwards.
///
/// # Errors
///
/// 400 when `to_date` is not after `from_date`, 422 when the user or
/// hotel does not exist, 502 when a probe cannot be completed.
pub async fn create_reservation(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    if req.to_date <= req.from_date {
        return Err(AppError::bad_request("to_date must be after from_date"));
    }

    let user_found = state
        .existence
        .user_exists(user.user_id)
        .await
        .map_err(|e| upstream_error(&e))?;
    if !user_found {
        return Err(AppError::validation("User does not exist"));
    }

    let hotel_found = state
        .existence
        .hotel_exists(req.hotel_id)
        .await
        .map_err(|e| upstream_error(&e))?;
    if !hotel_found {
        return Err(AppError::validation("Hotel does not exist"));
    }

    let reservation = Reservation {
        id: Uuid::new_v4(),
        user_id: user.user_id,
        hotel_id: req.hotel_id,
        from_date: req.from_date,
        to_date: req.to_date,
        created_at: Utc::now(),
    };

    let created = state.reservations.create(&reservation).await?;
    tracing::info!(
        reservation_id = %created.id,
        user_id = %created.user_id,
        hotel_id = %created.hotel_id,
        "Reservation created"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /reservations`
///
/// # Errors
///
/// 500 on storage failure.
pub async fn list_reservations(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<Reservation>>, AppError> {
    Ok(Json(state.reservations.list().await?))
}

/// `GET /reservations/user/:user_id`
///
/// # Errors
///
/// 500 on storage failure.
pub async fn list_user_reservations(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    Ok(Json(state.reservations.list_for_user(user_id).await?))
}

/// `DELETE /reservations/:id`
///
/// # Errors
///
/// 404 if the reservation does not exist.
pub async fn delete_reservation(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.reservations.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Reservation", id))
    }
}

/// `GET /health`
pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "ok".to_string(),
    })
}
