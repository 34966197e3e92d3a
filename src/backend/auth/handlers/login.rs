/**
 * Login Handler
 *
 * This module implements the authentication handler for POST /users/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by email (trimmed, lower-cased)
 * 2. Verify password using bcrypt
 * 3. Issue a JWT with the configured lifetime
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::authenticate;
use crate::backend::error::BackendError;
use crate::backend::store::SharedStore;
use crate::shared::AppConfig;

/// Login handler
///
/// # Arguments
///
/// * `State(store)` - Document store
/// * `State(config)` - Application configuration (token lifetime)
/// * `Json(request)` - Email and password
///
/// # Errors
///
/// * `400 Bad Request` - "Invalid email" for an unknown email,
///   "Invalid email or password" for a wrong password
/// * `500 Internal Server Error` - If the store or token signing fails
///
/// # Example Response
///
/// ```json
/// {
///   "message": "Login successful",
///   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
/// }
/// ```
pub async fn login(
    State(store): State<SharedStore>,
    State(config): State<AppConfig>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, BackendError> {
    tracing::info!("[Auth] Login request for: {}", request.email.trim());

    let user = authenticate(store.as_ref(), &request.email, &request.password)
        .await
        .map_err(|e| {
            tracing::warn!("[Auth] Login failed for {}: {}", request.email.trim(), e);
            BackendError::from(e)
        })?;

    let access_token = create_token(&user.email, &user.username, config.token_ttl_hours)
        .map_err(|e| {
            tracing::error!("[Auth] Failed to create token: {}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        })?;

    tracing::info!("[Auth] {} logged in", user.username);
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        access_token,
    }))
}
