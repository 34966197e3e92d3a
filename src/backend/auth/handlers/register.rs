/**
 * Register Handler
 *
 * This module implements the account creation handler for
 * POST /users/register.
 *
 * # Registration Process
 *
 * 1. Check username and email are free (case-insensitive)
 * 2. Hash password using bcrypt
 * 3. Insert an empty user document (theme `synthwave`)
 *
 * No token is issued; the client logs in afterwards.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{MessageResponse, RegisterRequest};
use crate::backend::auth::users::{register_user, NewAccount};
use crate::backend::error::BackendError;
use crate::backend::store::SharedStore;

/// Register handler
///
/// # Arguments
///
/// * `State(store)` - Document store
/// * `Json(request)` - Username, bio, email, password and avatar
///
/// # Errors
///
/// * `400 Bad Request` - "Username already taken" / "Email already taken"
/// * `500 Internal Server Error` - If hashing or the store fails
///
/// # Example Response
///
/// ```json
/// { "message": "User registered successfully!" }
/// ```
pub async fn register(
    State(store): State<SharedStore>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    tracing::info!("[Auth] Register request for username: {}", request.username);

    let account = NewAccount {
        username: request.username,
        bio: request.bio,
        email: request.email,
        password: request.password,
        avatar: request.avatar,
    };

    let user = register_user(store.as_ref(), account).await.map_err(|e| {
        tracing::warn!("[Auth] Registration refused: {}", e);
        BackendError::from(e)
    })?;

    tracing::info!("[Auth] Registered {} ({})", user.username, user.user_id);
    Ok(Json(MessageResponse::new("User registered successfully!")))
}
