//! In-memory repository for tests.

use crate::models::User;
use crate::repository::{StoreError, UserRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// In-memory [`UserRepository`] backed by a `HashMap`.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, User>>, StoreError> {
        self.users
            .lock()
            .map_err(|_| StoreError::Database("Lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<User, StoreError> {
        let mut users = self.lock()?;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("Email".to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.lock()?.values().find(|u| u.email == email).cloned())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.values().any(|u| u.email == email))
    }

    async fn exists(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.lock()?.contains_key(&id))
    }
}
