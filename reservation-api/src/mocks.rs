//! In-memory repository and a scriptable existence client for tests.

use crate::clients::{ClientError, ExistenceClient};
use crate::models::Reservation;
use crate::repository::{ReservationRepository, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// In-memory [`ReservationRepository`].
#[derive(Default)]
pub struct InMemoryReservationRepository {
    reservations: Mutex<HashMap<Uuid, Reservation>>,
}

impl InMemoryReservationRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, Reservation>>, StoreError> {
        self.reservations
            .lock()
            .map_err(|_| StoreError::Database("Lock poisoned".to_string()))
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn create(&self, reservation: &Reservation) -> Result<Reservation, StoreError> {
        self.lock()?.insert(reservation.id, reservation.clone());
        Ok(reservation.clone())
    }

    async fn list(&self) -> Result<Vec<Reservation>, StoreError> {
        let mut reservations: Vec<Reservation> = self.lock()?.values().cloned().collect();
        reservations.sort_by_key(|r| r.created_at);
        Ok(reservations)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Reservation>, StoreError> {
        let mut reservations: Vec<Reservation> = self
            .lock()?
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        reservations.sort_by_key(|r| r.created_at);
        Ok(reservations)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.lock()?.remove(&id).is_some())
    }
}

/// Scripted answer for one probe.
#[derive(Debug, Clone, Copy)]
pub enum ProbeAnswer {
    /// The record exists (upstream answered 200).
    Exists,
    /// The record does not exist (upstream answered 404).
    Missing,
    /// The upstream is unreachable or misbehaving.
    Broken,
}

/// [`ExistenceClient`] answering from scripted values.
pub struct StubExistenceClient {
    /// Answer for user probes.
    pub users: ProbeAnswer,
    /// Answer for hotel probes.
    pub hotels: ProbeAnswer,
}

impl StubExistenceClient {
    /// A client where every probe succeeds.
    #[must_use]
    pub const fn all_exist() -> Self {
        Self {
            users: ProbeAnswer::Exists,
            hotels: ProbeAnswer::Exists,
        }
    }
}

fn answer(service: &str, probe: ProbeAnswer) -> Result<bool, ClientError> {
    match probe {
        ProbeAnswer::Exists => Ok(true),
        ProbeAnswer::Missing => Ok(false),
        ProbeAnswer::Broken => Err(ClientError::Transport {
            service: service.to_string(),
            reason: "connection refused".to_string(),
        }),
    }
}

#[async_trait]
impl ExistenceClient for StubExistenceClient {
    async fn user_exists(&self, _id: Uuid) -> Result<bool, ClientError> {
        answer("user-api", self.users)
    }

    async fn hotel_exists(&self, _id: Uuid) -> Result<bool, ClientError> {
        answer("hotel-api", self.hotels)
    }
}
