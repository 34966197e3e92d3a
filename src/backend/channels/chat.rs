//! Chat channel
//!
//! Multiplexes direct and group messages by the `type` tag. Each message is
//! written once per party, framed for that party, then pushed.

use super::{SessionContext, SessionFault};
use crate::backend::realtime::push_to;
use crate::backend::store::UserUpdate;
use crate::shared::messaging::{ChatEvent, DirectMessage, GroupMessageDraft};
use crate::shared::ServerEvent;

/// Decode a frame into a chat event
///
/// # Errors
///
/// The inline message to report: undecodable JSON or a missing tag,
/// an unknown tag, or a tagged payload with ill-typed fields.
fn decode(text: &str) -> Result<ChatEvent, String> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|_| "Invalid data received".to_string())?;
    let tag = value
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or_else(|| "Invalid data received".to_string())?
        .to_string();
    if !ChatEvent::TAGS.contains(&tag.as_str()) {
        return Err(format!("Unknown event type: {}", tag));
    }
    serde_json::from_value(value).map_err(|_| invalid_for(&tag).to_string())
}

fn invalid_for(tag: &str) -> &'static str {
    if tag == "groupChatText" {
        "Invalid data received for group chat"
    } else {
        "Invalid data received for friend"
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub async fn on_frame(ctx: &SessionContext, text: &str) -> Result<(), SessionFault> {
    let event = match decode(text) {
        Ok(event) => event,
        Err(message) => {
            ctx.inform(message);
            return Ok(());
        }
    };

    match event {
        ChatEvent::GroupChatText { chat_id, text } => {
            match (non_empty(chat_id), non_empty(text)) {
                (Some(chat_id), Some(text)) => group_text(ctx, &chat_id, &text).await,
                _ => {
                    ctx.inform("Invalid data received for group chat");
                    Ok(())
                }
            }
        }
        ChatEvent::FriendText { friend_name, text } => {
            match (non_empty(friend_name), non_empty(text)) {
                (Some(friend_name), Some(text)) => friend_text(ctx, &friend_name, &text).await,
                _ => {
                    ctx.inform("Invalid data received for friend");
                    Ok(())
                }
            }
        }
    }
}

async fn group_text(ctx: &SessionContext, chat_id: &str, text: &str) -> Result<(), SessionFault> {
    let Some(user) = ctx.current_user().await? else {
        ctx.inform("User not found");
        return Ok(());
    };
    let Some(chat) = user.group_chat(chat_id) else {
        ctx.inform("Group chat not found");
        return Ok(());
    };

    let draft = GroupMessageDraft::new(text);
    for member in &chat.users {
        let is_author = member.email.eq_ignore_ascii_case(&user.email);
        let message = draft.for_member(is_author, &user.username, &user.avatar);

        let stored = ctx
            .store
            .update(
                &member.user_id,
                UserUpdate::PushGroupMessage {
                    chat_id: chat_id.to_string(),
                    message: message.clone(),
                },
            )
            .await?;
        if !stored {
            tracing::debug!("[Session] {} no longer holds group {}", member.email, chat_id);
            continue;
        }

        push_to(
            &ctx.presence,
            &member.email,
            ServerEvent::GroupMessage {
                chat_id: chat_id.to_string(),
                message,
            },
        )
        .await;
    }

    tracing::debug!("[Session] {} -> group {} ({} members)", user.username, chat_id, chat.users.len());
    Ok(())
}

async fn friend_text(ctx: &SessionContext, friend_name: &str, text: &str) -> Result<(), SessionFault> {
    let Some(user) = ctx.current_user().await? else {
        ctx.inform("User not found");
        return Ok(());
    };
    let Some(friend) = user.friend_by_username(friend_name) else {
        ctx.inform("Friend not found");
        return Ok(());
    };

    let (for_user, for_friend) = DirectMessage::pair(&user.username, text);

    let stored_for_user = ctx
        .store
        .update(
            &user.user_id,
            UserUpdate::PushDirectMessage {
                friend_id: friend.user_id.clone(),
                message: for_user.clone(),
            },
        )
        .await?;
    let stored_for_friend = ctx
        .store
        .update(
            &friend.user_id,
            UserUpdate::PushDirectMessage {
                friend_id: user.user_id.clone(),
                message: for_friend.clone(),
            },
        )
        .await?;

    if stored_for_user {
        push_to(
            &ctx.presence,
            &user.email,
            ServerEvent::Message {
                message: for_user,
                friend_name: friend.username.clone(),
            },
        )
        .await;
    }
    if stored_for_friend {
        push_to(
            &ctx.presence,
            &friend.email,
            ServerEvent::Message {
                message: for_friend,
                friend_name: user.username.clone(),
            },
        )
        .await;
    }

    tracing::debug!("[Session] {} -> {}", user.username, friend.username);
    Ok(())
}
