/**
 * API Route Handlers
 *
 * This module defines the request/response routes.
 *
 * # Routes
 *
 * ## Accounts
 * - `POST /users/register` - Create an account
 * - `POST /users/login` - Exchange credentials for a token
 * - `GET /users/user_info` - The caller's document
 *
 * ## Caller's document (bearer token required)
 * - `DELETE /users/delete_notification?id=`
 * - `PUT /users/mark_all_notifications_seen`
 * - `PATCH /users/mute_friend_chat`
 * - `PATCH /users/mute_groupchat`
 * - `DELETE /users/leave_groupchat?chat_id=`
 * - `DELETE /users/delete_friend?friendId=`
 * - `DELETE /users/delete_chat?friendId=`
 * - `DELETE /users/delete-group-chat?chatId=`
 * - `PUT /users/change-avatar`
 * - `POST /themes/save_theme`
 */

use axum::routing::{delete, get, patch, post, put};
use axum::Router;

use crate::backend::auth::{login, register, user_info};
use crate::backend::messaging::{
    change_avatar, delete_chat, delete_friend, delete_group_chat, delete_notification,
    leave_groupchat, mark_all_notifications_seen, mute_friend_chat, mute_groupchat, save_theme,
};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Authentication
///
/// Every route except register and login requires a JWT in the
/// `Authorization` header, checked by the `AuthUser` extractor.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Account endpoints
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/user_info", get(user_info))
        // Notifications
        .route("/users/delete_notification", delete(delete_notification))
        .route(
            "/users/mark_all_notifications_seen",
            put(mark_all_notifications_seen),
        )
        // Conversations
        .route("/users/mute_friend_chat", patch(mute_friend_chat))
        .route("/users/mute_groupchat", patch(mute_groupchat))
        .route("/users/leave_groupchat", delete(leave_groupchat))
        .route("/users/delete_friend", delete(delete_friend))
        .route("/users/delete_chat", delete(delete_chat))
        .route("/users/delete-group-chat", delete(delete_group_chat))
        // Profile
        .route("/users/change-avatar", put(change_avatar))
        .route("/themes/save_theme", post(save_theme))
}
