//! Authentication Handlers Module
//!
//! HTTP handlers for the account endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── register.rs  - Account creation
//! ├── login.rs     - Credential check and token issue
//! └── me.rs        - Current user document
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /users/register
//! - **`login`** - POST /users/login
//! - **`user_info`** - GET /users/user_info (bearer token)

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

pub use types::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UserInfoResponse};

pub use login::login;
pub use me::user_info;
pub use register::register;
