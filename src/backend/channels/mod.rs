//! Websocket Channels
//!
//! One module per logical channel. Every channel shares the same session
//! shape (handshake, register, receive loop, teardown), implemented once in
//! `socket`; the channel modules only hold the per-event state machines.
//!
//! # Module Structure
//!
//! ```text
//! channels/
//! ├── mod.rs            - ChannelKind dispatch, SessionContext, SessionFault
//! ├── socket.rs         - Upgrade handlers and the session runner
//! ├── connect.rs        - Presence and online flags
//! ├── add_friend.rs     - Friend requests
//! ├── accept_friend.rs  - Accepting and rejecting friend requests
//! ├── chat.rs           - Direct and group messages
//! ├── has_seen.rs       - Read receipts
//! └── group_chat.rs     - Group chat creation
//! ```
//!
//! # Error Handling
//!
//! Validation and not-found problems are written back on the same socket
//! and the loop continues. A `SessionFault` (store failure) ends the session
//! with close code 1011.

use std::ops::ControlFlow;

use thiserror::Error;

use crate::backend::auth::sessions::Identity;
use crate::backend::realtime::{ConnectionHandle, PresenceRegistry};
use crate::backend::store::{SharedStore, StoreError};
use crate::shared::messaging::User;
use crate::shared::Outbound;

pub mod socket;

pub mod accept_friend;
pub mod add_friend;
pub mod chat;
pub mod connect;
pub mod group_chat;
pub mod has_seen;

pub use socket::{
    accept_friend_ws, add_friend_ws, chat_ws, connect_ws, create_group_chat_ws, has_seen_ws,
    run_session,
};

/// Unexpected failure that terminates a session
#[derive(Debug, Error)]
pub enum SessionFault {
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

/// The logical channels a client can open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Connect,
    AddFriend,
    AcceptFriend,
    Chat,
    HasSeen,
    CreateGroupChat,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 6] = [
        Self::Connect,
        Self::AddFriend,
        Self::AcceptFriend,
        Self::Chat,
        Self::HasSeen,
        Self::CreateGroupChat,
    ];

    /// Route path of the channel
    pub fn path(&self) -> &'static str {
        match self {
            Self::Connect => "/connect",
            Self::AddFriend => "/add_friend",
            Self::AcceptFriend => "/accept_friend_request",
            Self::Chat => "/chat",
            Self::HasSeen => "/has_seen",
            Self::CreateGroupChat => "/create-group-chat",
        }
    }

    /// Runs once after registration, before the first frame is read
    pub async fn on_open(self, ctx: &SessionContext) -> Result<ControlFlow<()>, SessionFault> {
        match self {
            Self::Connect => connect::on_open(ctx).await,
            _ => Ok(ControlFlow::Continue(())),
        }
    }

    /// Handle one inbound text frame
    pub async fn on_frame(self, ctx: &SessionContext, text: &str) -> Result<(), SessionFault> {
        match self {
            Self::Connect => {
                tracing::trace!("[Session] Ignoring frame on connect channel");
                Ok(())
            }
            Self::AddFriend => add_friend::on_frame(ctx, text).await,
            Self::AcceptFriend => accept_friend::on_frame(ctx, text).await,
            Self::Chat => chat::on_frame(ctx, text).await,
            Self::HasSeen => has_seen::on_frame(ctx, text).await,
            Self::CreateGroupChat => group_chat::on_frame(ctx, text).await,
        }
    }

    /// Runs after the connection has been unregistered
    pub async fn on_close(self, ctx: &SessionContext) -> Result<(), SessionFault> {
        match self {
            Self::Connect => connect::on_close(ctx).await,
            _ => Ok(()),
        }
    }
}

/// Everything a channel needs while handling a session
#[derive(Clone)]
pub struct SessionContext {
    pub identity: Identity,
    pub connection: ConnectionHandle,
    pub store: SharedStore,
    pub presence: PresenceRegistry,
}

impl SessionContext {
    /// Write a payload to this session's own socket
    pub fn reply(&self, payload: impl Into<Outbound>) {
        if !self.connection.send(payload.into()) {
            tracing::debug!("[Session] Reply to {} dropped, socket closed", self.identity.email);
        }
    }

    /// Inline `{"message": ...}` report
    pub fn inform(&self, message: impl Into<String>) {
        self.reply(Outbound::info(message))
    }

    /// Fresh copy of the session user's document
    pub async fn current_user(&self) -> Result<Option<User>, SessionFault> {
        Ok(self.store.find_by_email(&self.identity.email).await?)
    }
}
