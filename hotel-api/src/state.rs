//! Shared application state.

use crate::repository::{AmenityRepository, HotelRepository};
use axum::extract::FromRef;
use std::sync::Arc;
use stayhub_core::{EventBus, JwtConfig};

/// State shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Hotel storage.
    pub hotels: Arc<dyn HotelRepository>,
    /// Amenity storage.
    pub amenities: Arc<dyn AmenityRepository>,
    /// Event bus for creation events.
    pub bus: Arc<dyn EventBus>,
    /// Token verification configuration.
    pub jwt: JwtConfig,
}

impl FromRef<AppState> for JwtConfig {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
