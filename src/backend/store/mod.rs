//! Document Store Module
//!
//! This module is the adapter between the sessions and the persistent user
//! documents. Every write is a single `UserUpdate` applied atomically to one
//! document; sequences of calls are not transactional.
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs       - DocumentStore trait and StoreError
//! ├── update.rs    - UserUpdate, the closed set of single-document mutations
//! ├── memory.rs    - In-process store (tests, no DATABASE_URL)
//! └── postgres.rs  - Postgres JSONB store (sqlx)
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::shared::messaging::User;

/// Single-document mutations
pub mod update;

/// In-memory implementation
pub mod memory;

/// Postgres implementation
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use update::UserUpdate;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database rejected or failed the query
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored document could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A uniqueness constraint was violated ("Username already taken")
    #[error("{0}")]
    Conflict(String),
}

/// Persistent user documents
///
/// Lookups by email and username are case-insensitive exact matches.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document
    ///
    /// # Errors
    ///
    /// `StoreError::Conflict` if the username or email is already taken.
    async fn insert_user(&self, user: User) -> Result<(), StoreError>;

    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Find a user whose email or username equals `term`
    ///
    /// An email match wins over a username match.
    async fn find_by_email_or_username(&self, term: &str) -> Result<Option<User>, StoreError>;

    /// Find every user whose username is in `usernames` (exact match)
    async fn find_by_usernames(&self, usernames: &[String]) -> Result<Vec<User>, StoreError>;

    /// Apply one atomic mutation to the document of `user_id`
    ///
    /// # Returns
    ///
    /// `false` when the document, or the embedded element the update
    /// addresses, does not exist. Nothing is written in that case.
    async fn update(&self, user_id: &str, update: UserUpdate) -> Result<bool, StoreError>;
}

/// Store handle shared by every session and handler
pub type SharedStore = Arc<dyn DocumentStore>;
