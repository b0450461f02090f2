//! Reservation model and request DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A booked stay.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Reservation {
    /// Reservation id.
    pub id: Uuid,
    /// Booking user; always taken from the verified token.
    pub user_id: Uuid,
    /// Booked hotel.
    pub hotel_id: Uuid,
    /// Check-in.
    pub from_date: DateTime<Utc>,
    /// Check-out, strictly after check-in.
    pub to_date: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /reservations`.
///
/// The user id is deliberately absent: it comes from the token.
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    /// Hotel to book.
    pub hotel_id: Uuid,
    /// Check-in.
    pub from_date: DateTime<Utc>,
    /// Check-out.
    pub to_date: DateTime<Utc>,
}

/// Generic confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}
