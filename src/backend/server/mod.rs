//! Server Module
//!
//! Startup of the Axum application.
//!
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`config`** - Database connection and migrations
//! - **`init`** - Store selection and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database loading
//! └── init.rs         - App creation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use blink::backend::server::create_app;
//! use blink::shared::AppConfig;
//!
//! # async fn example() {
//! let app = create_app(&AppConfig::default()).await;
//! # }
//! ```

/// Application state management
pub mod state;

/// Database loading
pub mod config;

/// Server initialization
pub mod init;

pub use init::create_app;
pub use state::AppState;
