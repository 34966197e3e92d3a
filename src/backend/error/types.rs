/**
 * Backend Error Types
 *
 * This module defines the error type returned by the REST handlers.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Raised by handlers for invalid input or missing entities, with the
 * status code and message chosen at the call site:
 * - Missing or empty fields
 * - Unknown friend, chat or notification
 * - Bad credentials
 *
 * ## Store Errors
 *
 * Failures of the document store. Conflicts (duplicate username or email)
 * surface as 409, everything else as 500.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::sessions::AuthError;
use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use blink::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::NOT_FOUND, "Friend not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., invalid request, entity not found)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Document store error
    #[error(transparent)]
    StoreError(#[from] StoreError),

    /// Credential error
    #[error(transparent)]
    AuthError(#[from] AuthError),

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code
    /// * `message` - Error message
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// 404 with `message`
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// 400 with `message`
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `StoreError` - 409 for conflicts, 500 otherwise
    /// - `AuthError` - 401 Unauthorized
    /// - `SharedError` - Depends on the shared error type
    /// - `SerializationError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::StoreError(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            Self::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::AuthError(_) => StatusCode::UNAUTHORIZED,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::NotFound { .. } => StatusCode::NOT_FOUND,
            },
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    ///
    /// Internal failures are reported with a generic message; the detail is
    /// logged where the error is converted.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::StoreError(StoreError::Conflict(message)) => message.clone(),
            Self::StoreError(_) => "Internal server error".to_string(),
            Self::AuthError(_) => "Invalid token".to_string(),
            Self::SharedError(err) => err.to_string(),
            Self::SerializationError(_) => "Internal server error".to_string(),
        }
    }
}
