//! Profile HTTP Handlers
//!
//! Avatar and theme of the authenticated user.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::backend::auth::handlers::MessageResponse;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::store::{SharedStore, UserUpdate};
use crate::shared::messaging::Theme;
use crate::shared::SharedError;

#[derive(Debug, Deserialize)]
pub struct AvatarRequest {
    #[serde(default)]
    pub avatar: String,
}

/// Unknown theme names are rejected by the JSON extractor (422)
#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: Theme,
}

/// Replace the caller's avatar URL
///
/// `PUT /users/change-avatar` with `{avatar}`
///
/// # Errors
///
/// * `400 Bad Request` - "Avatar URL cannot be empty."
pub async fn change_avatar(
    State(store): State<SharedStore>,
    AuthUser(user): AuthUser,
    Json(request): Json<AvatarRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    let avatar = request.avatar.trim();
    if avatar.is_empty() {
        return Err(SharedError::validation("avatar", "Avatar URL cannot be empty.").into());
    }

    store
        .update(&user.user_id, UserUpdate::SetAvatar(avatar.to_string()))
        .await?;
    Ok(Json(MessageResponse::new("Avatar updated successfully")))
}

/// Save the caller's UI theme
///
/// `POST /themes/save_theme` with `{theme}`
///
/// # Errors
///
/// * `400 Bad Request` - "Failed to save updated theme" if the document
///   disappeared between authentication and the write
pub async fn save_theme(
    State(store): State<SharedStore>,
    AuthUser(user): AuthUser,
    Json(request): Json<ThemeRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    let saved = store
        .update(&user.user_id, UserUpdate::SetTheme(request.theme))
        .await?;
    if !saved {
        return Err(BackendError::bad_request("Failed to save updated theme"));
    }

    tracing::debug!("[Users] {} switched theme to {:?}", user.username, request.theme);
    Ok(Json(MessageResponse::new("Theme updated successfully")))
}
