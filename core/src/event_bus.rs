//! Event bus abstraction for cross-service communication.
//!
//! hotel-api publishes to a topic; search-api subscribes with a consumer
//! group. Delivery is at-least-once: subscribers may see duplicates and
//! must tolerate them (search indexing is idempotent because the document
//! id is the hotel id).
//!
//! # Implementations
//!
//! - `KafkaEventBus` in the `stayhub-bus` crate - production, rdkafka-backed
//! - In-memory mocks inside service test modules - fast, no broker
//!
//! # Example
//!
//! ```rust,ignore
//! use futures::StreamExt;
//!
//! let event = BusEvent::encode(HotelCreated::EVENT_TYPE, &hotel)?;
//! bus.publish(HOTEL_CREATED_TOPIC, &event).await?;
//!
//! let mut stream = bus.subscribe(&[HOTEL_CREATED_TOPIC]).await?;
//! while let Some(result) = stream.next().await {
//!     match result {
//!         Ok(event) => index(event),
//!         Err(e) => tracing::error!(error = %e, "event stream error"),
//!     }
//! }
//! ```

use crate::event::BusEvent;
use futures::Stream;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors that can occur during event bus operations.
#[derive(Error, Debug, Clone)]
pub enum EventBusError {
    /// Failed to connect to the broker
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Failed to publish an event to a topic
    #[error("Publish failed for topic '{topic}': {reason}")]
    PublishFailed {
        /// The topic that failed
        topic: String,
        /// The reason for failure
        reason: String,
    },

    /// Failed to subscribe to topics
    #[error("Subscription failed for topics {topics:?}: {reason}")]
    SubscriptionFailed {
        /// The topics that failed to subscribe
        topics: Vec<String>,
        /// The reason for failure
        reason: String,
    },

    /// Failed to deserialize an event
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Network or transport error
    #[error("Transport error: {0}")]
    TransportError(String),
}

/// Stream of events from a subscription.
///
/// Each item is a `Result`: transport and decode errors are surfaced
/// in-stream rather than terminating it.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<BusEvent, EventBusError>> + Send>>;

/// Trait for event bus implementations.
///
/// Uses explicit `Pin<Box<dyn Future>>` returns instead of `async fn` so
/// the trait stays dyn-compatible (`Arc<dyn EventBus>` is shared through
/// application state).
pub trait EventBus: Send + Sync {
    /// Publish an event to a topic.
    ///
    /// At-least-once semantics: the event may reach subscribers more than
    /// once, so subscribers must be idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`EventBusError::PublishFailed`] if the publish fails.
    fn publish(
        &self,
        topic: &str,
        event: &BusEvent,
    ) -> Pin<Box<dyn Future<Output = Result<(), EventBusError>> + Send + '_>>;

    /// Subscribe to one or more topics and receive a stream of events.
    ///
    /// Implementations typically use consumer groups so multiple instances
    /// of the same subscriber share the workload.
    ///
    /// # Errors
    ///
    /// Returns [`EventBusError::SubscriptionFailed`] if subscription fails.
    fn subscribe(
        &self,
        topics: &[&str],
    ) -> Pin<Box<dyn Future<Output = Result<EventStream, EventBusError>> + Send + '_>>;
}
