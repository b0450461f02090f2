//! Hotel and amenity persistence.

use crate::models::{Amenity, Hotel};
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashSet;
use stayhub_core::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Errors from the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated.
    #[error("{0} already exists")]
    Duplicate(String),

    /// Underlying database failure.
    #[error("Database error: {0}")]
    Database(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(what) => Self::conflict(format!("{what} already exists")),
            StoreError::Database(reason) => {
                Self::internal("Database error").with_source(anyhow::anyhow!(reason))
            }
        }
    }
}

/// Storage operations for hotels.
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Insert a new hotel.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if another hotel already holds
    /// the same name and address.
    async fn create(&self, hotel: &Hotel) -> Result<Hotel, StoreError>;

    /// List all hotels.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    async fn list(&self) -> Result<Vec<Hotel>, StoreError>;

    /// Fetch a hotel by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    async fn get(&self, id: Uuid) -> Result<Option<Hotel>, StoreError>;

    /// Replace a hotel's fields. Returns `None` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if the new name and address
    /// collide with another hotel.
    async fn update(&self, hotel: &Hotel) -> Result<Option<Hotel>, StoreError>;

    /// Delete a hotel. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Check whether a hotel id exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    async fn exists(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Check whether another hotel already uses this name and address.
    ///
    /// `exclude` skips one id, so updates do not collide with themselves.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    async fn name_address_taken(
        &self,
        name: &str,
        address: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StoreError>;
}

/// Storage operations for amenities.
#[async_trait]
pub trait AmenityRepository: Send + Sync {
    /// Insert a new amenity.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if the name is taken.
    async fn create(&self, amenity: &Amenity) -> Result<Amenity, StoreError>;

    /// List all amenities.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    async fn list(&self) -> Result<Vec<Amenity>, StoreError>;

    /// Fetch an amenity by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    async fn get(&self, id: Uuid) -> Result<Option<Amenity>, StoreError>;

    /// Rename an amenity. Returns `None` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if the new name is taken.
    async fn rename(&self, id: Uuid, name: &str) -> Result<Option<Amenity>, StoreError>;

    /// Delete an amenity. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Of the given names, return those that do not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    async fn missing(&self, names: &[String]) -> Result<Vec<String>, StoreError>;
}

/// PostgreSQL hotel repository.
#[derive(Clone)]
pub struct PostgresHotelRepository {
    pool: PgPool,
}

impl PostgresHotelRepository {
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

const HOTEL_COLUMNS: &str = "id, name, address, city, country, amenities, photos, created_at";

#[async_trait]
impl HotelRepository for PostgresHotelRepository {
    async fn create(&self, hotel: &Hotel) -> Result<Hotel, StoreError> {
        sqlx::query(
            r"
            INSERT INTO hotels (id, name, address, city, country, amenities, photos, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(hotel.id)
        .bind(&hotel.name)
        .bind(&hotel.address)
        .bind(&hotel.city)
        .bind(&hotel.country)
        .bind(&hotel.amenities)
        .bind(&hotel.photos)
        .bind(hotel.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // Two creates can race past the handler's pre-check; the
            // unique index on (name, address) catches the loser here.
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return StoreError::Duplicate("Hotel".to_string());
                }
            }
            StoreError::Database(format!("Failed to create hotel: {e}"))
        })?;

        Ok(hotel.clone())
    }

    async fn list(&self) -> Result<Vec<Hotel>, StoreError> {
        sqlx::query_as::<_, Hotel>(&format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to list hotels: {e}")))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Hotel>, StoreError> {
        sqlx::query_as::<_, Hotel>(&format!("SELECT {HOTEL_COLUMNS} FROM hotels WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to get hotel: {e}")))
    }

    async fn update(&self, hotel: &Hotel) -> Result<Option<Hotel>, StoreError> {
        let result = sqlx::query(
            r"
            UPDATE hotels
            SET name = $2, address = $3, city = $4, country = $5, amenities = $6, photos = $7
            WHERE id = $1
            ",
        )
        .bind(hotel.id)
        .bind(&hotel.name)
        .bind(&hotel.address)
        .bind(&hotel.city)
        .bind(&hotel.country)
        .bind(&hotel.amenities)
        .bind(&hotel.photos)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return StoreError::Duplicate("Hotel".to_string());
                }
            }
            StoreError::Database(format!("Failed to update hotel: {e}"))
        })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(hotel.id).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM hotels WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to delete hotel: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM hotels WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to check hotel: {e}")))
    }

    async fn name_address_taken(
        &self,
        name: &str,
        address: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM hotels
                WHERE name = $1 AND address = $2 AND ($3::uuid IS NULL OR id <> $3)
            )
            ",
        )
        .bind(name)
        .bind(address)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to check duplicate: {e}")))
    }
}

/// PostgreSQL amenity repository.
#[derive(Clone)]
pub struct PostgresAmenityRepository {
    pool: PgPool,
}

impl PostgresAmenityRepository {
    /// Create a new repository over a connection pool.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AmenityRepository for PostgresAmenityRepository {
    async fn create(&self, amenity: &Amenity) -> Result<Amenity, StoreError> {
        sqlx::query("INSERT INTO amenities (id, name, created_at) VALUES ($1, $2, $3)")
            .bind(amenity.id)
            .bind(&amenity.name)
            .bind(amenity.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return StoreError::Duplicate("Amenity".to_string());
                    }
                }
                StoreError::Database(format!("Failed to create amenity: {e}"))
            })?;

        Ok(amenity.clone())
    }

    async fn list(&self) -> Result<Vec<Amenity>, StoreError> {
        sqlx::query_as::<_, Amenity>("SELECT id, name, created_at FROM amenities ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to list amenities: {e}")))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Amenity>, StoreError> {
        sqlx::query_as::<_, Amenity>("SELECT id, name, created_at FROM amenities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to get amenity: {e}")))
    }

    async fn rename(&self, id: Uuid, name: &str) -> Result<Option<Amenity>, StoreError> {
        let result = sqlx::query("UPDATE amenities SET name = $2 WHERE id = $1")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return StoreError::Duplicate("Amenity".to_string());
                    }
                }
                StoreError::Database(format!("Failed to rename amenity: {e}"))
            })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM amenities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to delete amenity: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn missing(&self, names: &[String]) -> Result<Vec<String>, StoreError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let known: Vec<String> =
            sqlx::query_scalar("SELECT name FROM amenities WHERE name = ANY($1)")
                .bind(names)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| StoreError::Database(format!("Failed to check amenities: {e}")))?;

        let known: HashSet<&str> = known.iter().map(String::as_str).collect();
        Ok(names
            .iter()
            .filter(|n| !known.contains(n.as_str()))
            .cloned()
            .collect())
    }
}
