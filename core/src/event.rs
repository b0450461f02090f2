//! Event envelope and payloads exchanged over the message queue.
//!
//! hotel-api publishes a [`HotelCreated`] payload wrapped in a [`BusEvent`]
//! whenever a hotel is created; search-api consumes it and indexes the
//! document. The envelope is JSON on the wire so non-Rust consumers can
//! read it too.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

/// Topic carrying hotel creation events.
pub const HOTEL_CREATED_TOPIC: &str = "hotel-created";

/// Envelope for events published to the bus.
///
/// The payload is kept as raw JSON so the envelope is generic over event
/// types. Subscribers dispatch on `event_type` and [`decode`](Self::decode)
/// the payload into the matching struct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BusEvent {
    /// Discriminator, e.g. `"hotel.created"`.
    pub event_type: String,
    /// JSON-encoded event payload.
    pub payload: serde_json::Value,
    /// Optional correlation id for tracing an event back to its request.
    pub correlation_id: Option<Uuid>,
}

impl BusEvent {
    /// Wrap a serializable payload in an envelope.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the payload cannot be encoded.
    pub fn encode<T: Serialize>(
        event_type: impl Into<String>,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event_type: event_type.into(),
            payload: serde_json::to_value(payload)?,
            correlation_id: None,
        })
    }

    /// Attach a correlation id.
    #[must_use]
    pub const fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Decode the payload into a concrete event type.
    ///
    /// # Errors
    ///
    /// Returns a deserialization error if the payload does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

/// Published by hotel-api after a hotel row is inserted.
///
/// Carries everything search-api needs to build the search document, so
/// the consumer never has to call back into hotel-api.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HotelCreated {
    /// Hotel id (also the search document id, making indexing idempotent).
    pub id: Uuid,
    /// Hotel name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
    /// Amenity names attached to the hotel.
    pub amenities: Vec<String>,
}

impl HotelCreated {
    /// Envelope discriminator for this event.
    pub const EVENT_TYPE: &'static str = "hotel.created";
}
