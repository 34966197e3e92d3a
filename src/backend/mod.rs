//! Backend Module
//!
//! This module contains all server-side code: the websocket channels, the
//! REST handlers and everything they share.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Store selection, application state, app creation
//! - **`routes`** - Route configuration and router assembly
//! - **`channels`** - One websocket session type per logical channel
//! - **`realtime`** - Presence registry and fan-out to connected users
//! - **`store`** - Document store trait with in-memory and Postgres adapters
//! - **`auth`** - Registration, login, JWT identity
//! - **`messaging`** - REST operations on the caller's document
//! - **`middleware`** - `AuthUser` bearer-token extractor
//! - **`error`** - Backend error type and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── channels/       - Websocket sessions
//! ├── realtime/       - Presence and fan-out
//! ├── store/          - Document persistence
//! ├── auth/           - Authentication
//! ├── messaging/      - REST handlers
//! ├── middleware/     - Request extractors
//! └── error/          - Error types
//! ```
//!
//! # Event Flow
//!
//! A session decodes one inbound frame at a time, reads the documents it
//! needs, persists every change with single-document updates, and only then
//! pushes the resulting events to whoever is connected. Users who are
//! offline see the change on their next `GET /users/user_info`.
//!
//! # Thread Safety
//!
//! - `PresenceRegistry` wraps `Arc<RwLock<HashMap>>` and is cloned into every session
//! - The store is `Arc<dyn DocumentStore>`; each `update` is atomic per document
//! - Outbound frames go through a per-connection unbounded queue drained
//!   by one writer task, so pushes never block on a slow socket
//!
//! # Example
//!
//! ```rust,no_run
//! use blink::backend::server::create_app;
//! use blink::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await;
//! let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Websocket channel sessions
pub mod channels;

/// Presence and fan-out
pub mod realtime;

/// Document persistence
pub mod store;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// REST handlers for the caller's document
pub mod messaging;

pub use error::BackendError;
pub use realtime::PresenceRegistry;
pub use server::create_app;
pub use store::{DocumentStore, SharedStore};
