//! Stayhub reservation service binary.

use anyhow::Context;
use reservation_api::{
    clients::HttpExistenceClient,
    config::Config,
    repository::PostgresReservationRepository,
    routes::build_router,
    state::AppState,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use stayhub_core::JwtConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reservation_api=debug,tower_http=debug".into()),
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

    let repository = PostgresReservationRepository::new(pool);
    repository
        .migrate()
        .await
        .context("Failed to run migrations")?;

    let existence = HttpExistenceClient::new(
        &config.services.user_api_url,
        &config.services.hotel_api_url,
    )
    .context("Failed to create HTTP client")?;

    let state = AppState {
        reservations: Arc::new(repository),
        existence: Arc::new(existence),
        jwt: JwtConfig::new(&config.auth.jwt_secret),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(%addr, "reservation-api listening");

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
