//! Stayhub user service binary.

use anyhow::Context;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use stayhub_core::JwtConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user_api::{
    config::Config,
    repository::PostgresUserRepository,
    routes::build_router,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_api=debug,tower_http=debug".into()),
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

    let repository = PostgresUserRepository::new(pool);
    repository
        .migrate()
        .await
        .context("Failed to run migrations")?;

    let state = AppState {
        users: Arc::new(repository),
        jwt: JwtConfig::new(&config.auth.jwt_secret),
        token_ttl: Duration::days(config.auth.token_ttl_days),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(%addr, "user-api listening");

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
