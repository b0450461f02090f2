//! Route table.

use crate::handlers::{self, amenities, hotels};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the service router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/hotels", post(hotels::create_hotel).get(hotels::list_hotels))
        .route(
            "/hotels/:id",
            get(hotels::get_hotel)
                .put(hotels::update_hotel)
                .delete(hotels::delete_hotel),
        )
        .route("/hotels/:id/exists", get(hotels::exists))
        .route(
            "/amenities",
            post(amenities::create_amenity).get(amenities::list_amenities),
        )
        .route(
            "/amenities/:id",
            get(amenities::get_amenity)
                .put(amenities::update_amenity)
                .delete(amenities::delete_amenity),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
