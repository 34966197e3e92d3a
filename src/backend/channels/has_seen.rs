//! Has-seen channel
//!
//! Read receipts for either a group chat (`chat_id`) or a direct
//! conversation (`friend_id`). Inline reports on this channel use the
//! `{"error": ...}` shape.

use super::{SessionContext, SessionFault};
use crate::backend::realtime::push_to;
use crate::backend::store::UserUpdate;
use crate::shared::messaging::{
    mark_conversation_seen, mark_group_seen, SeenMarker, SeenRequest, SeenTarget, User, SELF_LABEL,
};
use crate::shared::{Outbound, ServerEvent};

fn report(ctx: &SessionContext, error: &str) {
    ctx.reply(Outbound::error(error));
}

pub async fn on_frame(ctx: &SessionContext, text: &str) -> Result<(), SessionFault> {
    let request = match serde_json::from_str::<SeenRequest>(text) {
        Ok(request) => request,
        Err(_) => {
            report(ctx, "Invalid data received");
            return Ok(());
        }
    };
    let target = match request.target() {
        Ok(target) => target,
        Err(message) => {
            report(ctx, message);
            return Ok(());
        }
    };

    let Some(viewer) = ctx.current_user().await? else {
        report(ctx, "User not found");
        return Ok(());
    };

    match target {
        SeenTarget::GroupChat(chat_id) => group_seen(ctx, &viewer, &chat_id).await,
        SeenTarget::Friend(friend_id) => friend_seen(ctx, &viewer, &friend_id).await,
    }
}

async fn group_seen(ctx: &SessionContext, viewer: &User, chat_id: &str) -> Result<(), SessionFault> {
    let Some(chat) = viewer.group_chat(chat_id) else {
        report(ctx, "Group chat not found");
        return Ok(());
    };

    // Only a message someone else wrote can be marked as seen
    match chat.last_message() {
        Some(last) if last.is_incoming => {}
        _ => return Ok(()),
    }

    for member in &chat.users {
        let Some(member_doc) = ctx.store.find_by_id(&member.user_id).await? else {
            continue;
        };
        let Some(member_chat) = member_doc.group_chat(chat_id) else {
            continue;
        };

        let marker = SeenMarker {
            email: viewer.email.clone(),
            username: if member.user_id == viewer.user_id {
                SELF_LABEL.to_string()
            } else {
                viewer.username.clone()
            },
            avatar: viewer.avatar.clone(),
        };

        let mut snapshot = member_chat.clone();
        if !mark_group_seen(&mut snapshot.messages, marker) {
            continue;
        }

        ctx.store
            .update(
                &member.user_id,
                UserUpdate::SetGroupMessages {
                    chat_id: chat_id.to_string(),
                    messages: snapshot.messages.clone(),
                },
            )
            .await?;

        push_to(&ctx.presence, &member.email, ServerEvent::GroupSeen(snapshot)).await;
    }

    Ok(())
}

async fn friend_seen(ctx: &SessionContext, viewer: &User, friend_id: &str) -> Result<(), SessionFault> {
    let Some(friend) = viewer.friend_by_id(friend_id) else {
        report(ctx, "Friend not found");
        return Ok(());
    };

    if friend.messages.is_empty() {
        ctx.reply(ServerEvent::has_seen_error(&friend.username, "No messages available"));
        return Ok(());
    }

    let mut messages = friend.messages.clone();
    mark_conversation_seen(&mut messages);
    ctx.store
        .update(
            &viewer.user_id,
            UserUpdate::SetDirectMessages {
                friend_id: friend_id.to_string(),
                messages,
            },
        )
        .await?;

    let Some(friend_doc) = ctx.store.find_by_id(friend_id).await? else {
        report(ctx, "Friend's data not found");
        return Ok(());
    };

    if let Some(mirror) = friend_doc.friend_by_email(&viewer.email) {
        let mut messages = mirror.messages.clone();
        mark_conversation_seen(&mut messages);
        ctx.store
            .update(
                &friend_doc.user_id,
                UserUpdate::SetDirectMessages {
                    friend_id: viewer.user_id.clone(),
                    messages,
                },
            )
            .await?;

        push_to(&ctx.presence, &friend_doc.email, ServerEvent::has_seen(&viewer.username)).await;
    }

    ctx.reply(ServerEvent::has_seen(&friend.username));
    Ok(())
}
