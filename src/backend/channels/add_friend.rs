//! Add-friend channel
//!
//! Each inbound frame is a username or email. The first failing check is
//! reported inline; on success one request is persisted in both documents
//! under a shared correlation id and pushed to both parties.

use super::{SessionContext, SessionFault};
use crate::backend::realtime::push_to;
use crate::backend::store::UserUpdate;
use crate::shared::messaging::{Notification, User};

/// Why a friend request is refused
fn refusal(sender: &User, target: &User) -> Option<String> {
    if sender.email.eq_ignore_ascii_case(&target.email) {
        return Some("You cannot add yourself as a friend".to_string());
    }
    if sender.is_friend(&target.user_id) {
        return Some(format!("{} is already in your friends list", target.username));
    }
    if sender.has_pending_request_from(&target.user_id) {
        return Some(format!("{} already sent you a friend request", target.username));
    }
    if sender.has_pending_request_to(&target.user_id) {
        return Some("Friend request already sent".to_string());
    }
    // Crossed requests: the target's inbox already holds one from the sender
    if target.has_pending_request_from(&sender.user_id) {
        return Some("Can't process request right now, try again later".to_string());
    }
    None
}

pub async fn on_frame(ctx: &SessionContext, text: &str) -> Result<(), SessionFault> {
    let term = text.trim().to_lowercase();

    let Some(sender) = ctx.current_user().await? else {
        ctx.inform("Sender not found");
        return Ok(());
    };

    let target = if term.is_empty() {
        None
    } else {
        ctx.store.find_by_email_or_username(&term).await?
    };
    let Some(target) = target else {
        ctx.inform("User not found");
        return Ok(());
    };

    if let Some(reason) = refusal(&sender, &target) {
        tracing::debug!("[Session] Friend request {} -> {} refused: {}", sender.username, target.username, reason);
        ctx.inform(reason);
        return Ok(());
    }

    let (outgoing, incoming) = Notification::friend_request_pair(&sender, &target);

    ctx.store
        .update(&target.user_id, UserUpdate::PushNotification(incoming.clone()))
        .await?;
    ctx.store
        .update(&sender.user_id, UserUpdate::PushNotification(outgoing.clone()))
        .await?;

    push_to(&ctx.presence, &sender.email, outgoing).await;
    push_to(&ctx.presence, &target.email, incoming).await;

    tracing::info!("[Session] Friend request {} -> {}", sender.username, target.username);
    Ok(())
}
