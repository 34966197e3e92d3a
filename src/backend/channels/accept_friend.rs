//! Accept-friend channel
//!
//! Inbound frames are `{"senderEmail": ..., "isAccepted": ...}` decisions
//! on a pending request in the session user's inbox. Both outcomes pull the
//! pending copies from both documents. Acceptance then creates the symmetric
//! friend entries and persists a `complete` notification on each side;
//! rejection keeps no record and only pushes the `rejected` outcome.

use super::{SessionContext, SessionFault};
use crate::backend::realtime::push_to;
use crate::backend::store::UserUpdate;
use crate::shared::messaging::{
    FriendDecision, FriendEntry, Notification, NotificationFilter, NotificationStatus, User,
};

pub async fn on_frame(ctx: &SessionContext, text: &str) -> Result<(), SessionFault> {
    let decision = match serde_json::from_str::<FriendDecision>(text) {
        Ok(decision) => decision,
        Err(e) => {
            tracing::debug!("[Session] Undecodable decision from {}: {}", ctx.identity.email, e);
            ctx.inform("Invalid data received");
            return Ok(());
        }
    };
    let (sender_email, is_accepted) = match (decision.sender_email, decision.is_accepted) {
        (Some(email), Some(accepted)) if !email.trim().is_empty() => {
            (email.trim().to_lowercase(), accepted)
        }
        _ => {
            ctx.inform("Invalid data received");
            return Ok(());
        }
    };

    let Some(recipient) = ctx.current_user().await? else {
        ctx.inform("Current user not found");
        return Ok(());
    };
    let Some(sender) = ctx.store.find_by_email(&sender_email).await? else {
        ctx.inform("Sender not found");
        return Ok(());
    };
    let Some(request) = recipient.pending_request_from_email(&sender.email) else {
        ctx.inform("Friend request not found");
        return Ok(());
    };
    let notification_id = request.notification_id.clone();

    ctx.store
        .update(
            &recipient.user_id,
            UserUpdate::PullNotifications(NotificationFilter::pending_request_from(&sender.email)),
        )
        .await?;
    ctx.store
        .update(
            &sender.user_id,
            UserUpdate::PullNotifications(NotificationFilter::pending_request_to(&recipient.user_id)),
        )
        .await?;

    if is_accepted {
        accept(ctx, &notification_id, &recipient, &sender).await
    } else {
        reject(ctx, &notification_id, &recipient, &sender).await
    }
}

async fn accept(
    ctx: &SessionContext,
    notification_id: &str,
    recipient: &User,
    sender: &User,
) -> Result<(), SessionFault> {
    let recipient_friend = FriendEntry::describing(sender);
    let sender_friend = FriendEntry::describing(recipient);

    ctx.store
        .update(&recipient.user_id, UserUpdate::PushFriend(recipient_friend.clone()))
        .await?;
    ctx.store
        .update(&sender.user_id, UserUpdate::PushFriend(sender_friend.clone()))
        .await?;

    let base = Notification::decision(notification_id, recipient, sender, NotificationStatus::Complete);

    let accepted = format!("{} accepted your friend request", recipient.username);
    let for_sender = base
        .clone()
        .incoming(true)
        .seen(false)
        .with_message(accepted.clone(), Some(accepted))
        .with_new_friend(sender_friend);

    let for_recipient = base
        .incoming(false)
        .seen(true)
        .with_message(
            format!("You and {} are now friends", sender.username),
            Some(format!("You accepted {}'s friend request", sender.username)),
        )
        .with_new_friend(recipient_friend);

    ctx.store
        .update(&sender.user_id, UserUpdate::PushNotification(for_sender.clone()))
        .await?;
    ctx.store
        .update(&recipient.user_id, UserUpdate::PushNotification(for_recipient.clone()))
        .await?;

    push_to(&ctx.presence, &sender.email, for_sender).await;
    push_to(&ctx.presence, &recipient.email, for_recipient).await;

    tracing::info!("[Session] {} and {} are now friends", recipient.username, sender.username);
    Ok(())
}

async fn reject(
    ctx: &SessionContext,
    notification_id: &str,
    recipient: &User,
    sender: &User,
) -> Result<(), SessionFault> {
    let base = Notification::decision(notification_id, recipient, sender, NotificationStatus::Rejected);
    let for_recipient = base.clone().with_message(
        format!("You rejected friend request from {}", sender.username),
        None,
    );

    push_to(&ctx.presence, &sender.email, base).await;
    push_to(&ctx.presence, &recipient.email, for_recipient).await;

    tracing::info!("[Session] {} rejected {}", recipient.username, sender.username);
    Ok(())
}
