//! In-memory repositories and a recording event bus for tests.

use crate::models::{Amenity, Hotel};
use crate::repository::{AmenityRepository, HotelRepository, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use stayhub_core::{BusEvent, EventBus, EventBusError, EventStream};
use uuid::Uuid;

fn poisoned() -> StoreError {
    StoreError::Database("Lock poisoned".to_string())
}

/// In-memory [`HotelRepository`].
#[derive(Default)]
pub struct InMemoryHotelRepository {
    hotels: Mutex<HashMap<Uuid, Hotel>>,
}

impl InMemoryHotelRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HotelRepository for InMemoryHotelRepository {
    async fn create(&self, hotel: &Hotel) -> Result<Hotel, StoreError> {
        let mut hotels = self.hotels.lock().map_err(|_| poisoned())?;
        // Mirrors the unique index on (name, address).
        if hotels
            .values()
            .any(|h| h.name == hotel.name && h.address == hotel.address)
        {
            return Err(StoreError::Duplicate("Hotel".to_string()));
        }
        hotels.insert(hotel.id, hotel.clone());
        Ok(hotel.clone())
    }

    async fn list(&self) -> Result<Vec<Hotel>, StoreError> {
        let mut hotels: Vec<Hotel> = self
            .hotels
            .lock()
            .map_err(|_| poisoned())?
            .values()
            .cloned()
            .collect();
        hotels.sort_by_key(|h| h.created_at);
        Ok(hotels)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Hotel>, StoreError> {
        Ok(self.hotels.lock().map_err(|_| poisoned())?.get(&id).cloned())
    }

    async fn update(&self, hotel: &Hotel) -> Result<Option<Hotel>, StoreError> {
        let mut hotels = self.hotels.lock().map_err(|_| poisoned())?;
        if hotels
            .values()
            .any(|h| h.name == hotel.name && h.address == hotel.address && h.id != hotel.id)
        {
            return Err(StoreError::Duplicate("Hotel".to_string()));
        }
        if let Some(existing) = hotels.get_mut(&hotel.id) {
            let mut updated = hotel.clone();
            updated.created_at = existing.created_at;
            *existing = updated.clone();
            Ok(Some(updated))
        } else {
            Ok(None)
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self
            .hotels
            .lock()
            .map_err(|_| poisoned())?
            .remove(&id)
            .is_some())
    }

    async fn exists(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.hotels.lock().map_err(|_| poisoned())?.contains_key(&id))
    }

    async fn name_address_taken(
        &self,
        name: &str,
        address: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StoreError> {
        Ok(self
            .hotels
            .lock()
            .map_err(|_| poisoned())?
            .values()
            .any(|h| h.name == name && h.address == address && Some(h.id) != exclude))
    }
}

/// In-memory [`AmenityRepository`].
#[derive(Default)]
pub struct InMemoryAmenityRepository {
    amenities: Mutex<HashMap<Uuid, Amenity>>,
}

impl InMemoryAmenityRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AmenityRepository for InMemoryAmenityRepository {
    async fn create(&self, amenity: &Amenity) -> Result<Amenity, StoreError> {
        let mut amenities = self.amenities.lock().map_err(|_| poisoned())?;
        if amenities.values().any(|a| a.name == amenity.name) {
            return Err(StoreError::Duplicate("Amenity".to_string()));
        }
        amenities.insert(amenity.id, amenity.clone());
        Ok(amenity.clone())
    }

    async fn list(&self) -> Result<Vec<Amenity>, StoreError> {
        let mut amenities: Vec<Amenity> = self
            .amenities
            .lock()
            .map_err(|_| poisoned())?
            .values()
            .cloned()
            .collect();
        amenities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(amenities)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Amenity>, StoreError> {
        Ok(self
            .amenities
            .lock()
            .map_err(|_| poisoned())?
            .get(&id)
            .cloned())
    }

    async fn rename(&self, id: Uuid, name: &str) -> Result<Option<Amenity>, StoreError> {
        let mut amenities = self.amenities.lock().map_err(|_| poisoned())?;
        if amenities.values().any(|a| a.name == name && a.id != id) {
            return Err(StoreError::Duplicate("Amenity".to_string()));
        }
        if let Some(amenity) = amenities.get_mut(&id) {
            amenity.name = name.to_string();
            Ok(Some(amenity.clone()))
        } else {
            Ok(None)
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self
            .amenities
            .lock()
            .map_err(|_| poisoned())?
            .remove(&id)
            .is_some())
    }

    async fn missing(&self, names: &[String]) -> Result<Vec<String>, StoreError> {
        let amenities = self.amenities.lock().map_err(|_| poisoned())?;
        Ok(names
            .iter()
            .filter(|n| !amenities.values().any(|a| &a.name == *n))
            .cloned()
            .collect())
    }
}

/// Event bus that records publishes, optionally failing them.
#[derive(Default)]
pub struct RecordingEventBus {
    published: Mutex<Vec<(String, BusEvent)>>,
    fail_publish: AtomicBool,
}

impl RecordingEventBus {
    /// Create a bus that accepts all publishes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent publishes fail.
    pub fn fail_next_publishes(&self) {
        self.fail_publish.store(true, Ordering::SeqCst);
    }

    /// All events published so far, with their topics.
    #[must_use]
    pub fn published(&self) -> Vec<(String, BusEvent)> {
        self.published
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventBus for RecordingEventBus {
    fn publish(
        &self,
        topic: &str,
        event: &BusEvent,
    ) -> Pin<Box<dyn Future<Output = Result<(), EventBusError>> + Send + '_>> {
        let topic = topic.to_string();
        let event = event.clone();
        Box::pin(async move {
            if self.fail_publish.load(Ordering::SeqCst) {
                return Err(EventBusError::PublishFailed {
                    topic,
                    reason: "broker unavailable".to_string(),
                });
            }
            if let Ok(mut published) = self.published.lock() {
                published.push((topic, event));
            }
            Ok(())
        })
    }

    fn subscribe(
        &self,
        topics: &[&str],
    ) -> Pin<Box<dyn Future<Output = Result<EventStream, EventBusError>> + Send + '_>> {
        let topics: Vec<String> = topics.iter().map(ToString::to_string).collect();
        Box::pin(async move {
            Err(EventBusError::SubscriptionFailed {
                topics,
                reason: "recording bus does not subscribe".to_string(),
            })
        })
    }
}
