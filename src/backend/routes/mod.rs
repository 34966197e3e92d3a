//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! - **`router`** - Main router creation and layers
//! - **`socket_routes`** - Websocket channel upgrades
//! - **`api_routes`** - Request/response endpoints
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs            - Module exports and documentation
//! ├── router.rs         - Main router creation
//! ├── socket_routes.rs  - Websocket routes
//! └── api_routes.rs     - REST routes
//! ```

/// Main router creation
pub mod router;

/// Websocket routes
pub mod socket_routes;

/// API endpoint handlers
pub mod api_routes;

pub use router::create_router;
