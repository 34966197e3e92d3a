/**
 * Server Initialization
 *
 * This module builds the application: it picks the document store, creates
 * the presence registry and assembles the router.
 *
 * # Initialization Process
 *
 * 1. Connect Postgres if `DATABASE_URL` is configured
 * 2. Fall back to the in-memory store otherwise (data is lost on restart)
 * 3. Create `AppState` and the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::backend::store::{MemoryStore, PgStore, SharedStore};
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// # Arguments
///
/// * `config` - Validated configuration
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app(config: &AppConfig) -> Router<()> {
    tracing::info!("[Startup] Initializing blink backend");

    let store: SharedStore = match load_database(config).await {
        Some(pool) => {
            tracing::info!("[Startup] Using Postgres document store");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("[Startup] Using in-memory document store; data will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    create_router(AppState::new(store, config.clone()))
}
