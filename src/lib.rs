//! Blink - Main Library
//!
//! Blink is a realtime social-chat backend: user accounts, friendships, group
//! chats, notifications and presence, delivered over one persistent websocket
//! per logical channel plus a small JSON request/response surface.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared by every layer
//!   - User document model (notifications, friends, group chats)
//!   - Outbound event payloads
//!   - Error and configuration types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum server, websocket channels and REST handlers
//!   - Presence registry and fan-out
//!   - Document store adapters (in-memory and Postgres)
//!   - Authentication (bcrypt + JWT)
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use blink::backend::server::init::create_app;
//! use blink::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await;
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! - The presence registry is an `Arc<RwLock<HashMap>>` shared by every session
//! - Store adapters are `Send + Sync` and used behind `Arc<dyn DocumentStore>`
//! - Each session owns its receive loop; outbound frames go through an
//!   unbounded queue drained by one writer task per socket

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
