//! Connect channel
//!
//! Carries presence only. Opening it marks the user online for every
//! connected friend; closing it marks the user offline again. The user
//! document is re-read on close instead of being cached for the lifetime of
//! the session, so friends added meanwhile are notified too.

use std::ops::ControlFlow;

use super::{SessionContext, SessionFault};
use crate::backend::realtime::push_to;
use crate::backend::store::UserUpdate;
use crate::shared::ServerEvent;

pub async fn on_open(ctx: &SessionContext) -> Result<ControlFlow<()>, SessionFault> {
    let Some(user) = ctx.current_user().await? else {
        ctx.inform("User not found");
        return Ok(ControlFlow::Break(()));
    };

    let mut announced = 0;
    for friend in &user.friends_list {
        let friend_online = ctx.presence.is_online(&friend.email).await;

        // The user's own view of this friend
        if friend.is_online != friend_online {
            ctx.store
                .update(
                    &user.user_id,
                    UserUpdate::SetFriendOnline {
                        friend_email: friend.email.clone(),
                        is_online: friend_online,
                    },
                )
                .await?;
        }

        if !friend_online {
            continue;
        }

        ctx.store
            .update(
                &friend.user_id,
                UserUpdate::SetFriendOnline {
                    friend_email: user.email.clone(),
                    is_online: true,
                },
            )
            .await?;

        if push_to(&ctx.presence, &friend.email, ServerEvent::connection(&user.username, true)).await {
            announced += 1;
        }
    }

    tracing::info!(
        "[Presence] {} online, announced to {} friend(s)",
        user.username,
        announced
    );
    Ok(ControlFlow::Continue(()))
}

pub async fn on_close(ctx: &SessionContext) -> Result<(), SessionFault> {
    let Some(user) = ctx.current_user().await? else {
        return Ok(());
    };

    for friend in &user.friends_list {
        ctx.store
            .update(
                &friend.user_id,
                UserUpdate::SetFriendOnline {
                    friend_email: user.email.clone(),
                    is_online: false,
                },
            )
            .await?;

        push_to(&ctx.presence, &friend.email, ServerEvent::connection(&user.username, false)).await;
    }

    tracing::info!("[Presence] {} offline", user.username);
    Ok(())
}
