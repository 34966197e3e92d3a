//! In-memory document store
//!
//! Documents live in a `HashMap` behind a `tokio::sync::RwLock`. A single
//! write lock per `update` gives the same single-document atomicity the
//! Postgres store provides.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DocumentStore, StoreError, UserUpdate};
use crate::shared::messaging::User;

/// In-process store keyed by user id
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.username.eq_ignore_ascii_case(&user.username))
        {
            return Err(StoreError::Conflict("Username already taken".to_string()));
        }
        if users.values().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(StoreError::Conflict("Email already taken".to_string()));
        }

        tracing::debug!("[Store] Inserted user {}", user.user_id);
        users.insert(user.user_id.clone(), user);
        Ok(())
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn find_by_email_or_username(&self, term: &str) -> Result<Option<User>, StoreError> {
        if let Some(user) = self.find_by_email(term).await? {
            return Ok(Some(user));
        }
        self.find_by_username(term).await
    }

    async fn find_by_usernames(&self, usernames: &[String]) -> Result<Vec<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| usernames.iter().any(|name| name == &u.username))
            .cloned()
            .collect())
    }

    async fn update(&self, user_id: &str, update: UserUpdate) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(user_id) else {
            tracing::debug!("[Store] {} on missing user {}", update.name(), user_id);
            return Ok(false);
        };
        Ok(update.apply(user))
    }
}
