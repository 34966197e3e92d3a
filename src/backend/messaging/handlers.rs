//! Account HTTP Handlers
//!
//! Request/response operations on the caller's own document: notification
//! housekeeping, mute flags, clearing or leaving conversations and removing
//! friends. Every handler is authenticated through `AuthUser`.
//!
//! None of these operations push realtime events; clients refresh through
//! `GET /users/user_info`.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::backend::auth::handlers::MessageResponse;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::store::{SharedStore, UserUpdate};
use crate::shared::messaging::NotificationFilter;
use crate::shared::SharedError;

#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    pub chat_id: String,
}

#[derive(Debug, Deserialize)]
pub struct FriendQuery {
    #[serde(rename = "friendId")]
    pub friend_id: String,
}

#[derive(Debug, Deserialize)]
pub struct GroupChatQuery {
    #[serde(rename = "chatId")]
    pub chat_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MuteFriendRequest {
    pub friend_id: String,
    pub is_muted: bool,
}

#[derive(Debug, Deserialize)]
pub struct MuteGroupchatRequest {
    pub chat_id: String,
    pub is_muted: bool,
}

fn mute_message(is_muted: bool) -> MessageResponse {
    MessageResponse::new(if is_muted {
        "Chat is now muted"
    } else {
        "Chat is unmuted"
    })
}

/// Remove one notification
///
/// `DELETE /users/delete_notification?id=<notificationId>`
///
/// # Errors
///
/// * `404 Not Found` - "Notification not found or already deleted"
pub async fn delete_notification(
    State(store): State<SharedStore>,
    AuthUser(user): AuthUser,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<MessageResponse>, BackendError> {
    let removed = store
        .update(
            &user.user_id,
            UserUpdate::PullNotifications(NotificationFilter::by_id(&query.id)),
        )
        .await?;
    if !removed {
        return Err(BackendError::not_found(
            "Notification not found or already deleted",
        ));
    }

    tracing::debug!("[Users] {} deleted notification {}", user.username, query.id);
    Ok(Json(MessageResponse::new("Notification deleted successfully")))
}

/// `PUT /users/mark_all_notifications_seen`
pub async fn mark_all_notifications_seen(
    State(store): State<SharedStore>,
    AuthUser(user): AuthUser,
) -> Result<Json<MessageResponse>, BackendError> {
    store
        .update(&user.user_id, UserUpdate::MarkAllNotificationsSeen)
        .await?;
    Ok(Json(MessageResponse::new("All notifications marked as seen")))
}

/// Set the mute flag of a direct conversation
///
/// `PATCH /users/mute_friend_chat` with `{friend_id, is_muted}`
///
/// # Errors
///
/// * `404 Not Found` - "Friend not found"
pub async fn mute_friend_chat(
    State(store): State<SharedStore>,
    AuthUser(user): AuthUser,
    Json(request): Json<MuteFriendRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    let updated = store
        .update(
            &user.user_id,
            UserUpdate::SetFriendMuted {
                friend_id: request.friend_id,
                is_muted: request.is_muted,
            },
        )
        .await?;
    if !updated {
        return Err(BackendError::not_found("Friend not found"));
    }
    Ok(Json(mute_message(request.is_muted)))
}

/// Set the mute flag of the caller's copy of a group chat
///
/// `PATCH /users/mute_groupchat` with `{chat_id, is_muted}`
///
/// # Errors
///
/// * `404 Not Found` - "Groupchat not found"
pub async fn mute_groupchat(
    State(store): State<SharedStore>,
    AuthUser(user): AuthUser,
    Json(request): Json<MuteGroupchatRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    let updated = store
        .update(
            &user.user_id,
            UserUpdate::SetGroupMuted {
                chat_id: request.chat_id,
                is_muted: request.is_muted,
            },
        )
        .await?;
    if !updated {
        return Err(BackendError::not_found("Groupchat not found"));
    }
    Ok(Json(mute_message(request.is_muted)))
}

/// Leave a group chat
///
/// `DELETE /users/leave_groupchat?chat_id=<chatId>`
///
/// The caller's copy is removed and every other member's copy drops the
/// caller from its member list. A chat left with a single member is removed
/// from that member as well.
///
/// # Errors
///
/// * `404 Not Found` - "Group chat not found"
pub async fn leave_groupchat(
    State(store): State<SharedStore>,
    AuthUser(user): AuthUser,
    Query(query): Query<ChatQuery>,
) -> Result<Json<MessageResponse>, BackendError> {
    let chat_id = query.chat_id;
    let Some(chat) = user.group_chat(&chat_id).cloned() else {
        return Err(SharedError::not_found("Group chat").into());
    };

    store
        .update(
            &user.user_id,
            UserUpdate::PullGroupChat {
                chat_id: chat_id.clone(),
            },
        )
        .await?;

    let remaining: Vec<_> = chat
        .users
        .iter()
        .filter(|m| m.user_id != user.user_id)
        .collect();

    for member in &remaining {
        let update = if remaining.len() == 1 {
            UserUpdate::PullGroupChat {
                chat_id: chat_id.clone(),
            }
        } else {
            UserUpdate::RemoveGroupMember {
                chat_id: chat_id.clone(),
                user_id: user.user_id.clone(),
            }
        };
        store.update(&member.user_id, update).await?;
    }

    tracing::info!(
        "[Users] {} left group chat {} ({} members remain)",
        user.username,
        chat_id,
        remaining.len()
    );
    Ok(Json(MessageResponse::new(format!(
        "You have successfully left the group chat '{}'.",
        chat_id
    ))))
}

/// Remove a friend from both sides
///
/// `DELETE /users/delete_friend?friendId=<userId>`
///
/// # Errors
///
/// * `404 Not Found` - "Friend not found"
pub async fn delete_friend(
    State(store): State<SharedStore>,
    AuthUser(user): AuthUser,
    Query(query): Query<FriendQuery>,
) -> Result<Json<MessageResponse>, BackendError> {
    let Some(friend) = user.friend_by_id(&query.friend_id).cloned() else {
        return Err(BackendError::not_found("Friend not found"));
    };

    store
        .update(
            &user.user_id,
            UserUpdate::RemoveFriend {
                friend_id: friend.user_id.clone(),
            },
        )
        .await?;
    store
        .update(
            &friend.user_id,
            UserUpdate::RemoveFriend {
                friend_id: user.user_id.clone(),
            },
        )
        .await?;

    tracing::info!("[Users] {} removed {} from friends", user.username, friend.username);
    Ok(Json(MessageResponse::new(format!(
        "{} removed from friends list",
        friend.username
    ))))
}

/// Clear the caller's copy of a direct conversation
///
/// `DELETE /users/delete_chat?friendId=<userId>`
///
/// # Errors
///
/// * `404 Not Found` - "Friend not found"
pub async fn delete_chat(
    State(store): State<SharedStore>,
    AuthUser(user): AuthUser,
    Query(query): Query<FriendQuery>,
) -> Result<Json<MessageResponse>, BackendError> {
    let cleared = store
        .update(
            &user.user_id,
            UserUpdate::SetDirectMessages {
                friend_id: query.friend_id,
                messages: Vec::new(),
            },
        )
        .await?;
    if !cleared {
        return Err(BackendError::not_found("Friend not found"));
    }
    Ok(Json(MessageResponse::new("Chat messages cleared successfully")))
}

/// Clear the caller's copy of a group conversation
///
/// `DELETE /users/delete-group-chat?chatId=<chatId>`
///
/// # Errors
///
/// * `404 Not Found` - "Group chat not found"
pub async fn delete_group_chat(
    State(store): State<SharedStore>,
    AuthUser(user): AuthUser,
    Query(query): Query<GroupChatQuery>,
) -> Result<Json<MessageResponse>, BackendError> {
    let cleared = store
        .update(
            &user.user_id,
            UserUpdate::SetGroupMessages {
                chat_id: query.chat_id,
                messages: Vec::new(),
            },
        )
        .await?;
    if !cleared {
        return Err(SharedError::not_found("Group chat").into());
    }
    Ok(Json(MessageResponse::new(
        "Group chat messages cleared successfully",
    )))
}
