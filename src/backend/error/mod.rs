//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Types
//!
//! - `HandlerError` - Errors raised directly by HTTP handlers
//! - `StoreError` - Document store failures (500, 409 for conflicts)
//! - `AuthError` - Missing or invalid credentials (401)
//! - `SharedError` - Errors from the shared module
//! - `SerializationError` - JSON serialization errors
//!
//! Websocket sessions do not use `BackendError`; they report validation
//! problems inline and treat anything else as a `SessionFault`.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
