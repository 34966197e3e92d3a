//! Middleware Module
//!
//! Request processing shared by the REST routes.
//!
//! - **`auth`** - `AuthUser`, the bearer-token extractor for protected routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::Json;
//! use blink::backend::middleware::AuthUser;
//!
//! async fn handler(AuthUser(user): AuthUser) -> Json<String> {
//!     Json(user.username)
//! }
//! ```

pub mod auth;

pub use auth::AuthUser;
