//! Shared application state.

use crate::clients::ExistenceClient;
use crate::repository::ReservationRepository;
use axum::extract::FromRef;
use std::sync::Arc;
use stayhub_core::JwtConfig;

/// State shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Reservation storage.
    pub reservations: Arc<dyn ReservationRepository>,
    /// Existence probes against user-api and hotel-api.
    pub existence: Arc<dyn ExistenceClient>,
    /// Token verification configuration.
    pub jwt: JwtConfig,
}

impl FromRef<AppState> for JwtConfig {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
