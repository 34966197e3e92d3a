/**
 * User Info Handler
 *
 * GET /users/user_info returns the caller's whole document, minus the
 * password hash, wrapped as `{"user": {...}}`.
 */

use axum::response::Json;

use crate::backend::auth::handlers::types::UserInfoResponse;
use crate::backend::middleware::AuthUser;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - Missing or invalid token, or the token's user no
///   longer exists
pub async fn user_info(AuthUser(user): AuthUser) -> Json<UserInfoResponse> {
    tracing::debug!("[Auth] user_info for {}", user.username);
    Json(UserInfoResponse { user: user.into() })
}
