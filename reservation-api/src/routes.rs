//! Route table.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the service router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/reservations",
            post(handlers::create_reservation).get(handlers::list_reservations),
        )
        .route(
            "/reservations/user/:user_id",
            get(handlers::list_user_reservations),
        )
        .route("/reservations/:id", delete(handlers::delete_reservation))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
