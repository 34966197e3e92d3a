//! Authentication Module
//!
//! This module handles account registration, credential checks and the
//! bearer tokens that identify a user on both the REST routes and the
//! websocket channels.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - Registration and password checks on the store
//! ├── sessions.rs     - JWT issue, verification and identity resolution
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email and password → document created
//! 2. **Login**: email and password → credentials verified → JWT returned
//! 3. **Use**: `Authorization: Bearer <jwt>` on REST, `?token=<jwt>` on websockets
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are HS256 JWTs keyed by `JWT_SECRET`, 12 hours by default
//! - The token subject is the user's email

/// Registration and credential checks
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{login, register, user_info};
pub use sessions::{create_token, resolve_identity, AuthError, Identity};
pub use users::AccountError;
