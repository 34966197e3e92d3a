/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is created once at startup and holds:
 * - The document store (`Arc<dyn DocumentStore>`)
 * - The presence registry shared by every websocket session
 * - The validated configuration
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow handlers to extract only the part
 * they need, e.g. `State<SharedStore>` or `State<PresenceRegistry>`.
 *
 * # Example
 *
 * ```rust
 * use axum::extract::State;
 * use blink::backend::store::SharedStore;
 *
 * async fn handler(State(store): State<SharedStore>) {
 *     let _ = store.find_by_id("user-id").await;
 * }
 * ```
 */

use axum::extract::FromRef;

use crate::backend::realtime::PresenceRegistry;
use crate::backend::store::SharedStore;
use crate::shared::AppConfig;

/// Application state shared by every route
///
/// # Fields
///
/// * `store` - Persistent user documents
/// * `presence` - Live connections, keyed by lower-cased email
/// * `config` - Server configuration (token lifetime is read by login)
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub presence: PresenceRegistry,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(store: SharedStore, config: AppConfig) -> Self {
        Self {
            store,
            presence: PresenceRegistry::new(),
            config,
        }
    }
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for PresenceRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.presence.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
