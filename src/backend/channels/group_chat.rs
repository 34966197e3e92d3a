//! Create-group-chat channel
//!
//! Each inbound frame is a JSON array of usernames. Every name must resolve;
//! the resulting member set (targets plus the initiator) must not match an
//! existing chat of the initiator. One copy per member is persisted, each
//! labeling its holder with the self label.

use uuid::Uuid;

use super::{SessionContext, SessionFault};
use crate::backend::realtime::push_to_many;
use crate::backend::store::UserUpdate;
use crate::shared::event::GroupChatAnnouncement;
use crate::shared::messaging::{
    GroupChatEntry, GroupChatRequest, GroupChatRequestError, GroupMember,
};
use crate::shared::ServerEvent;

pub async fn on_frame(ctx: &SessionContext, text: &str) -> Result<(), SessionFault> {
    let request = serde_json::from_str::<serde_json::Value>(text)
        .map_err(|_| GroupChatRequestError::NotAList)
        .and_then(GroupChatRequest::from_value);
    let request = match request {
        Ok(request) => request,
        Err(e) => {
            ctx.inform(e.message());
            return Ok(());
        }
    };

    let Some(initiator) = ctx.current_user().await? else {
        ctx.inform("Sender not found or missing userId.");
        return Ok(());
    };

    let usernames: Vec<String> = request
        .usernames
        .into_iter()
        .filter(|name| !name.eq_ignore_ascii_case(&initiator.username))
        .collect();
    if usernames.is_empty() {
        ctx.inform(GroupChatRequestError::Empty.message());
        return Ok(());
    }

    let targets = ctx.store.find_by_usernames(&usernames).await?;
    if targets.len() != usernames.len() {
        let missing: Vec<&str> = usernames
            .iter()
            .filter(|name| !targets.iter().any(|t| &t.username == *name))
            .map(String::as_str)
            .collect();
        ctx.inform(format!("Some users not found: {}", missing.join(", ")));
        return Ok(());
    }

    let mut members: Vec<GroupMember> = targets.iter().map(GroupMember::of).collect();
    members.push(GroupMember::of(&initiator));

    let mut member_ids: Vec<&str> = members.iter().map(|m| m.user_id.as_str()).collect();
    member_ids.sort_unstable();
    if initiator
        .group_chats_list
        .iter()
        .any(|chat| chat.has_members(&member_ids))
    {
        ctx.inform("You already have a group chat with these users.");
        return Ok(());
    }

    let chat_id = Uuid::new_v4().to_string();
    for member in &members {
        let copy = GroupChatEntry::for_holder(&chat_id, &members, &member.email);
        ctx.store
            .update(&member.user_id, UserUpdate::PushGroupChat(copy))
            .await?;
    }

    ctx.reply(ServerEvent::GroupChatCreated(GroupChatAnnouncement {
        chat: GroupChatEntry::for_holder(&chat_id, &members, &initiator.email),
        message: None,
    }));

    let added = format!("{} added you in a group chat", initiator.username);
    let announcements = members
        .iter()
        .filter(|m| m.user_id != initiator.user_id)
        .map(|member| {
            let event = ServerEvent::GroupChatCreated(GroupChatAnnouncement {
                chat: GroupChatEntry::for_holder(&chat_id, &members, &member.email),
                message: Some(added.clone()),
            });
            (member.email.clone(), event)
        })
        .collect::<Vec<_>>();
    let delivered = push_to_many(&ctx.presence, announcements).await;

    tracing::info!(
        "[Session] {} created group chat {} ({} members, {} notified live)",
        initiator.username,
        chat_id,
        members.len(),
        delivered
    );
    Ok(())
}
