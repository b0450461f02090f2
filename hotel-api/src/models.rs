//! Hotel and amenity models plus request/response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A hotel in the catalog.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Hotel {
    /// Hotel id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Street address. Name plus address is unique.
    pub address: String,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
    /// Amenity names, each must exist in the amenities table.
    pub amenities: Vec<String>,
    /// Photo URLs.
    pub photos: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// An amenity hotels can reference by name.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Amenity {
    /// Amenity id.
    pub id: Uuid,
    /// Unique name, e.g. "wifi".
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /hotels` and `PUT /hotels/:id`.
#[derive(Debug, Deserialize)]
pub struct HotelRequest {
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
    /// Amenity names; every name must already exist.
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Photo URLs.
    #[serde(default)]
    pub photos: Vec<String>,
}

/// Request body for `POST /amenities` and `PUT /amenities/:id`.
#[derive(Debug, Deserialize)]
pub struct AmenityRequest {
    /// Unique amenity name.
    pub name: String,
}

/// Response body for existence probes.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExistsResponse {
    /// Whether the record exists.
    pub exists: bool,
}

/// Generic confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}
