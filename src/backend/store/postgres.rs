//! Postgres document store
//!
//! Each user is one row of the `users` table with the whole document in a
//! JSONB column. Email and username are duplicated into plain columns so the
//! unique `lower(..)` indexes can enforce case-insensitive uniqueness.
//!
//! `update` locks the row with `SELECT ... FOR UPDATE`, applies the
//! `UserUpdate` in Rust and writes the document back inside one transaction,
//! which makes every update atomic with respect to concurrent sessions.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{DocumentStore, StoreError, UserUpdate};
use crate::shared::messaging::User;

/// Store backed by a Postgres pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        clause: &str,
        value: &str,
    ) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT document FROM users WHERE {} LIMIT 1", clause);
        let row = sqlx::query_as::<_, (Json<User>,)>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(Json(user),)| user))
    }
}

/// Map unique-index violations to `StoreError::Conflict`
fn map_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            let message = match db.constraint() {
                Some(name) if name.contains("email") => "Email already taken",
                _ => "Username already taken",
            };
            return StoreError::Conflict(message.to_string());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO users (user_id, email, username, document, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            "#,
        )
        .bind(&user.user_id)
        .bind(&user.email)
        .bind(&user.username)
        .bind(Json(&user))
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        tracing::debug!("[Store] Inserted user {}", user.user_id);
        Ok(())
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        self.fetch_one_where("user_id = $1", user_id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.fetch_one_where("lower(email) = lower($1)", email).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.fetch_one_where("lower(username) = lower($1)", username)
            .await
    }

    async fn find_by_email_or_username(&self, term: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, (Json<User>,)>(
            r#"
            SELECT document FROM users
            WHERE lower(email) = lower($1) OR lower(username) = lower($1)
            ORDER BY (lower(email) = lower($1)) DESC
            LIMIT 1
            "#,
        )
        .bind(term)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(Json(user),)| user))
    }

    async fn find_by_usernames(&self, usernames: &[String]) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, (Json<User>,)>(
            "SELECT document FROM users WHERE username = ANY($1)",
        )
        .bind(usernames)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(Json(user),)| user).collect())
    }

    async fn update(&self, user_id: &str, update: UserUpdate) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, (Json<User>,)>(
            "SELECT document FROM users WHERE user_id = $1 FOR UPDATE",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((Json(mut user),)) = row else {
            tx.rollback().await?;
            tracing::debug!("[Store] {} on missing user {}", update.name(), user_id);
            return Ok(false);
        };

        if !update.apply(&mut user) {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("UPDATE users SET document = $2, updated_at = $3 WHERE user_id = $1")
            .bind(user_id)
            .bind(Json(&user))
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
