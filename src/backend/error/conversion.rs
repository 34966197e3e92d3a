/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, so handlers can return it directly,
 * and the mapping of account failures onto it.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::auth::users::AccountError;
use crate::backend::error::types::BackendError;

impl From<AccountError> for BackendError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Store(e) => BackendError::StoreError(e),
            AccountError::Hashing(e) => {
                tracing::error!("[Auth] bcrypt failure: {}", e);
                BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            other => BackendError::bad_request(other.to_string()),
        }
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
