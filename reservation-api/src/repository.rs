//! Reservation persistence.

use crate::models::Reservation;
use async_trait::async_trait;
use sqlx::PgPool;
use stayhub_core::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Errors from the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database failure.
    #[error("Database error: {0}")]
    Database(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let StoreError::Database(reason) = err;
        Self::internal("Database error").with_source(anyhow::anyhow!(reason))
    }
}

/// Storage operations for reservations.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a new reservation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    async fn create(&self, reservation: &Reservation) -> Result<Reservation, StoreError>;

    /// List all reservations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    async fn list(&self) -> Result<Vec<Reservation>, StoreError>;

    /// List one user's reservations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Reservation>, StoreError>;

    /// Delete a reservation. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// PostgreSQL reservation repository.
#[derive(Clone)]
pub struct PostgresReservationRepository {
    pool: PgPool,
}

impl PostgresReservationRepository {
    /// Create a new repository over a connection pool.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if migrations fail.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Migration failed: {e}")))?;
        Ok(())
    }
}

const COLUMNS: &str = "id, user_id, hotel_id, from_date, to_date, created_at";

#[async_trait]
impl ReservationRepository for PostgresReservationRepository {
    async fn create(&self, reservation: &Reservation) -> Result<Reservation, StoreError> {
        sqlx::query(
            r"
            INSERT INTO reservations (id, user_id, hotel_id, from_date, to_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(reservation.id)
        .bind(reservation.user_id)
        .bind(reservation.hotel_id)
        .bind(reservation.from_date)
        .bind(reservation.to_date)
        .bind(reservation.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to create reservation: {e}")))?;

        Ok(reservation.clone())
    }

    async fn list(&self) -> Result<Vec<Reservation>, StoreError> {
        sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {COLUMNS} FROM reservations ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to list reservations: {e}")))
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Reservation>, StoreError> {
        sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {COLUMNS} FROM reservations WHERE user_id = $1 ORDER BY created_at"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to list reservations: {e}")))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to delete reservation: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}
