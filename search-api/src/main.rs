//! Stayhub search service binary.
//!
//! Runs the queue consumer and the HTTP server in one process.

use anyhow::Context;
use search_api::{
    config::Config, consumer, routes::build_router, solr::SolrClient, state::AppState,
};
use std::sync::Arc;
use stayhub_bus::KafkaEventBus;
use stayhub_core::{EventBus, HOTEL_CREATED_TOPIC};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "search_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let index: Arc<dyn search_api::solr::SearchIndex> = Arc::new(
        SolrClient::new(&config.solr.base_url).context("Failed to create search client")?,
    );

    let bus: Arc<dyn EventBus> = Arc::new(
        KafkaEventBus::builder()
            .brokers(&config.queue.brokers)
            .consumer_group(&config.queue.consumer_group)
            .auto_offset_reset("earliest")
            .build()
            .context("Failed to create event bus")?,
    );

    // Subscribe before serving; a failed subscription aborts startup.
    let stream = bus
        .subscribe(&[HOTEL_CREATED_TOPIC])
        .await
        .context("Failed to subscribe to the event stream")?;
    tracing::info!(topic = HOTEL_CREATED_TOPIC, "Consumer started");
    let consumer_handle = tokio::spawn(consumer::drain(stream, index.clone()));

    let state = AppState { index };
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(%addr, "search-api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    consumer_handle.abort();
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down");
}
