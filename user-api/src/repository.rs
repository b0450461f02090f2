//! User persistence.
//!
//! The [`UserRepository`] trait is the seam between handlers and storage:
//! production wires in [`PostgresUserRepository`], tests use the in-memory
//! implementation from [`crate::mocks`].

use crate::models::User;
use async_trait::async_trait;
use sqlx::PgPool;
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

/// Storage operations for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if the email is already taken.
    async fn create(&self, user: &User) -> Result<User, StoreError>;

    /// Fetch a user by email.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Fetch a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Check whether an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Check whether a user id exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    async fn exists(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// PostgreSQL user repository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    /// Connection pool.
    pool: PgPool,
}

impl PostgresUserRepository {
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

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<User, StoreError> {
        sqlx::query(
            r"
            INSERT INTO users (id, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return StoreError::Duplicate("Email".to_string());
                }
            }
            StoreError::Database(format!("Failed to create user: {e}"))
        })?;

        Ok(user.clone())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            r"
            SELECT id, email, password_hash, role, created_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to get user: {e}")))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            r"
            SELECT id, email, password_hash, role, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to get user: {e}")))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            ",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to check email: {e}")))
    }

    async fn exists(&self, id: Uuid) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)
            ",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to check user: {e}")))
    }
}
