/**
 * Outbound Event System
 *
 * This module defines every payload the server writes to a websocket.
 * Tagged events carry a `type` field; friend-request notifications are sent
 * as the notification object itself; inline errors are bare
 * `{"message": ...}` or `{"error": ...}` objects.
 */
use serde::{Deserialize, Serialize};

use crate::shared::messaging::{DirectMessage, GroupChatEntry, GroupMessage, Notification};

/// Tagged realtime event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// A friend came online or went offline
    #[serde(rename = "connection", rename_all = "camelCase")]
    Connection { friend_name: String, is_online: bool },

    /// A direct message, framed for the receiving side
    #[serde(rename = "message", rename_all = "camelCase")]
    Message {
        message: DirectMessage,
        friend_name: String,
    },

    /// A group message, framed for the receiving member
    #[serde(rename = "groupMessage", rename_all = "camelCase")]
    GroupMessage { chat_id: String, message: GroupMessage },

    /// Read receipt for a direct conversation
    #[serde(rename = "hasSeen", rename_all = "camelCase")]
    HasSeen {
        friend_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        last_seen: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },

    /// Updated snapshot of a group chat after a read receipt
    #[serde(rename = "groupSeen")]
    GroupSeen(GroupChatEntry),

    /// A group chat was created
    #[serde(rename = "group-chat-create")]
    GroupChatCreated(GroupChatAnnouncement),
}

/// Group chat snapshot sent on creation
///
/// `message` is only set on the copy pushed to members other than the
/// creator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupChatAnnouncement {
    #[serde(flatten)]
    pub chat: GroupChatEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ServerEvent {
    pub fn connection(friend_name: impl Into<String>, is_online: bool) -> Self {
        Self::Connection {
            friend_name: friend_name.into(),
            is_online,
        }
    }

    pub fn has_seen(friend_name: impl Into<String>) -> Self {
        Self::HasSeen {
            friend_name: friend_name.into(),
            last_seen: Some(true),
            error: None,
        }
    }

    pub fn has_seen_error(friend_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self::HasSeen {
            friend_name: friend_name.into(),
            last_seen: None,
            error: Some(error.into()),
        }
    }

    /// Name of the `type` tag, for logging
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Connection { .. } => "connection",
            Self::Message { .. } => "message",
            Self::GroupMessage { .. } => "groupMessage",
            Self::HasSeen { .. } => "hasSeen",
            Self::GroupSeen(_) => "groupSeen",
            Self::GroupChatCreated(_) => "group-chat-create",
        }
    }
}

/// Anything written to a client socket
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Outbound {
    Event(ServerEvent),
    Notification(Notification),
    /// Inline validation or not-found report
    Info { message: String },
    /// Inline report on the has-seen channel
    Error { error: String },
}

impl Outbound {
    pub fn info(message: impl Into<String>) -> Self {
        Self::Info {
            message: message.into(),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self::Error {
            error: error.into(),
        }
    }

    /// Short description, for logging
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Event(event) => event.tag(),
            Self::Notification(_) => "notification",
            Self::Info { .. } => "info",
            Self::Error { .. } => "error",
        }
    }
}

impl From<ServerEvent> for Outbound {
    fn from(event: ServerEvent) -> Self {
        Self::Event(event)
    }
}

impl From<Notification> for Outbound {
    fn from(notification: Notification) -> Self {
        Self::Notification(notification)
    }
}

/// Get the current timestamp as an RFC3339 string
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
