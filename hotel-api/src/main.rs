//! Stayhub hotel catalog service binary.

use anyhow::Context;
use hotel_api::{
    config::Config,
    repository::{PostgresAmenityRepository, PostgresHotelRepository},
    routes::build_router,
    state::AppState,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use stayhub_bus::KafkaEventBus;
use stayhub_core::JwtConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotel_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(config.postgres.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(
            config.postgres.connect_timeout,
        ))
        .connect(&config.postgres.url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    let hotels = PostgresHotelRepository::new(pool.clone());
    hotels.migrate().await.context("Failed to run migrations")?;

    let bus = KafkaEventBus::builder()
        .brokers(&config.queue.brokers)
        .build()
        .context("Failed to create event bus")?;

    let state = AppState {
        hotels: Arc::new(hotels),
        amenities: Arc::new(PostgresAmenityRepository::new(pool)),
        bus: Arc::new(bus),
        jwt: JwtConfig::new(&config.auth.jwt_secret),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(%addr, "hotel-api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down");
}
