//! Shared application state.

use crate::repository::UserRepository;
use axum::extract::FromRef;
use chrono::Duration;
use std::sync::Arc;
use stayhub_core::JwtConfig;

/// State shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// User storage.
    pub users: Arc<dyn UserRepository>,
    /// Token signing configuration.
    pub jwt: JwtConfig,
    /// Lifetime of issued tokens.
    pub token_ttl: Duration,
}

impl FromRef<AppState> for JwtConfig {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
