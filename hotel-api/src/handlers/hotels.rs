//! Hotel CRUD handlers.

use crate::models::{ExistsResponse, Hotel, HotelRequest};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use stayhub_core::{AppError, AuthUser, BusEvent, HotelCreated, RequireAdmin, HOTEL_CREATED_TOPIC};
use uuid::Uuid;

/// Reject the request when any listed amenity is unknown, naming them.
async fn check_amenities(state: &AppState, names: &[String]) -> Result<(), AppError> {
    let missing = state.amenities.missing(names).await?;
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Unknown amenities: {}",
            missing.join(", ")
        )))
    }
}

/// `POST /hotels`
///
/// Inserts the hotel and publishes a `hotel.created` event. A failed
/// publish fails the whole request; there is no outbox or retry, so the
/// caller simply tries again.
///
/// # Errors
///
/// 409 if a hotel with the same name and address exists, 422 for unknown
/// amenities, 502 if the event cannot be published.
pub async fn create_hotel(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(req): Json<HotelRequest>,
) -> Result<(StatusCode, Json<Hotel>), AppError> {
    check_amenities(&state, &req.amenities).await?;

    if state
        .hotels
        .name_address_taken(&req.name, &req.address, None)
        .await?
    {
        return Err(AppError::conflict(
            "Hotel with this name and address already exists",
        ));
    }

    let hotel = Hotel {
        id: Uuid::new_v4(),
        name: req.name,
        address: req.address,
        city: req.city,
        country: req.country,
        amenities: req.amenities,
        photos: req.photos,
        created_at: Utc::now(),
    };

    let created = state.hotels.create(&hotel).await?;

    let payload = HotelCreated {
        id: created.id,
        name: created.name.clone(),
        address: created.address.clone(),
        city: created.city.clone(),
        country: created.country.clone(),
        amenities: created.amenities.clone(),
    };
    let event = BusEvent::encode(HotelCreated::EVENT_TYPE, &payload)
        .map_err(|e| AppError::internal("Failed to encode event").with_source(e.into()))?;

    state
        .bus
        .publish(HOTEL_CREATED_TOPIC, &event)
        .await
        .map_err(|e| {
            AppError::bad_gateway("Failed to publish hotel.created event").with_source(e.into())
        })?;

    tracing::info!(hotel_id = %created.id, "Hotel created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /hotels`
///
/// # Errors
///
/// 500 on storage failure.
pub async fn list_hotels(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<Hotel>>, AppError> {
    Ok(Json(state.hotels.list().await?))
}

/// `GET /hotels/:id`
///
/// # Errors
///
/// 404 if the hotel does not exist.
pub async fn get_hotel(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Hotel>, AppError> {
    let hotel = state
        .hotels
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Hotel", id))?;
    Ok(Json(hotel))
}

/// `PUT /hotels/:id`
///
/// # Errors
///
/// 404 if absent, 409 on a name+address collision with another hotel,
/// 422 for unknown amenities.
pub async fn update_hotel(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<HotelRequest>,
) -> Result<Json<Hotel>, AppError> {
    check_amenities(&state, &req.amenities).await?;

    if state
        .hotels
        .name_address_taken(&req.name, &req.address, Some(id))
        .await?
    {
        return Err(AppError::conflict(
            "Hotel with this name and address already exists",
        ));
    }

    let hotel = Hotel {
        id,
        name: req.name,
        address: req.address,
        city: req.city,
        country: req.country,
        amenities: req.amenities,
        photos: req.photos,
        created_at: Utc::now(),
    };

    let updated = state
        .hotels
        .update(&hotel)
        .await?
        .ok_or_else(|| AppError::not_found("Hotel", id))?;

    Ok(Json(updated))
}

/// `DELETE /hotels/:id`
///
/// # Errors
///
/// 404 if the hotel does not exist.
pub async fn delete_hotel(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.hotels.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Hotel", id))
    }
}

/// `GET /hotels/:id/exists`
///
/// Unauthenticated existence probe used by reservation-api.
///
/// # Errors
///
/// 404 when the hotel does not exist so probes can branch on status
/// alone.
pub async fn exists(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExistsResponse>, AppError> {
    if state.hotels.exists(id).await? {
        Ok(Json(ExistsResponse { exists: true }))
    } else {
        Err(AppError::not_found("Hotel", id))
    }
}
