//! Queue consumer feeding the search index.
//!
//! Runs next to the HTTP server in the same process. The initial
//! subscription must succeed or startup fails; after that, any failure
//! on a single event (bad payload, engine down) is logged and skipped
//! while the stream keeps running.

use crate::solr::SearchIndex;
use futures::StreamExt;
use std::sync::Arc;
use stayhub_core::{EventBus, EventBusError, EventStream, HotelCreated, HOTEL_CREATED_TOPIC};

/// Subscribe to `hotel-created` and consume until the stream ends.
///
/// # Errors
///
/// Returns [`EventBusError`] only if the initial subscription fails;
/// per-event failures are logged and skipped.
pub async fn run(
    bus: Arc<dyn EventBus>,
    index: Arc<dyn SearchIndex>,
) -> Result<(), EventBusError> {
    let stream = bus.subscribe(&[HOTEL_CREATED_TOPIC]).await?;
    tracing::info!(topic = HOTEL_CREATED_TOPIC, "Consumer started");
    drain(stream, index).await;
    Ok(())
}

/// Index every `hotel.created` event on the stream, skipping failures.
pub async fn drain(mut stream: EventStream, index: Arc<dyn SearchIndex>) {
    while let Some(result) = stream.next().await {
        match result {
            Ok(event) => {
                if event.event_type != HotelCreated::EVENT_TYPE {
                    tracing::debug!(event_type = %event.event_type, "Ignoring event");
                    continue;
                }

                let hotel: HotelCreated = match event.decode() {
                    Ok(hotel) => hotel,
                    Err(e) => {
                        tracing::warn!(error = %e, "Skipping undecodable event");
                        continue;
                    }
                };

                match index.index(&hotel).await {
                    Ok(()) => {
                        tracing::info!(hotel_id = %hotel.id, name = %hotel.name, "Hotel indexed");
                    }
                    Err(e) => {
                        tracing::error!(hotel_id = %hotel.id, error = %e, "Indexing failed, skipping");
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Event stream error");
            }
        }
    }

    tracing::warn!("Event stream ended");
}
