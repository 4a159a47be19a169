//! In-process [`UserStore`], mainly for tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::storage::{InsertOutcome, NewUser, StoreError, User, UserStore};

/// Keeps accounts in a vector guarded by a lock; uniqueness of usernames and
/// emails is checked under the write lock, mirroring the table constraints.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        let found = users
            .iter()
            .find(|user| user.username == username)
            .or_else(|| users.iter().find(|user| user.email == email));
        Ok(found.cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.username == username).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<InsertOutcome, StoreError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|existing| existing.username == user.username || existing.email == user.email)
        {
            return Ok(InsertOutcome::Conflict);
        }

        let created = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.push(created.clone());

        Ok(InsertOutcome::Created(created))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
