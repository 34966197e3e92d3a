/**
 * Server Configuration
 *
 * This module connects the optional PostgreSQL database named by
 * `AppConfig::database_url` and applies the embedded migrations.
 *
 * # Error Handling
 *
 * Connection failures are logged but do not prevent server startup; the
 * caller falls back to the in-memory store.
 */

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::shared::AppConfig;

const MAX_CONNECTIONS: u32 = 10;

/// Load and initialize database connection pool
///
/// # Returns
///
/// - `Some(PgPool)` if the database is connected and migrated
/// - `None` if no URL is configured, the connection fails, or the
///   migrations fail
pub async fn load_database(config: &AppConfig) -> Option<PgPool> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("[Startup] DATABASE_URL not set");
        return None;
    };

    tracing::info!("[Startup] Connecting to database...");

    let pool = match PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("[Startup] Failed to create database connection pool: {:?}", e);
            return None;
        }
    };

    tracing::info!("[Startup] Running database migrations...");
    if let Err(e) = sqlx::migrate!().run(&pool).await {
        tracing::error!("[Startup] Failed to run database migrations: {}", e);
        return None;
    }

    tracing::info!("[Startup] Database ready");
    Some(pool)
}
