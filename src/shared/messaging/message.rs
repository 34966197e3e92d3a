//! Message Data Structures
//!
//! Messages are not stored as one shared record. Every party keeps its own
//! copy, framed for that viewer: `isIncoming` and the `sender` label differ
//! between copies while the `id` is shared for correlation. Only the
//! read-state fields (`isSeen`/`lastSeen` for direct messages, `isSeenBy` for
//! group messages) change after creation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::event::now_timestamp;

/// Label used for the viewer's own messages and own membership entry
pub const SELF_LABEL: &str = "user";

/// A direct message between two friends, as seen by one of them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DirectMessage {
    /// Shared by both copies of the message
    pub id: String,
    #[serde(default)]
    pub is_seen: bool,
    /// Set only on the most recent outgoing message once the peer has looked
    #[serde(default)]
    pub last_seen: bool,
    /// `"user"` on the author's copy, the author's username on the peer's copy
    pub sender: String,
    pub time_stamp: String,
    pub text: String,
    #[serde(default)]
    pub is_incoming: bool,
}

impl DirectMessage {
    /// Build the author's copy and the friend's copy of a new message
    ///
    /// # Returns
    ///
    /// `(for_author, for_friend)`
    pub fn pair(author_username: &str, text: &str) -> (Self, Self) {
        let for_author = Self {
            id: Uuid::new_v4().to_string(),
            is_seen: false,
            last_seen: false,
            sender: SELF_LABEL.to_string(),
            time_stamp: now_timestamp(),
            text: text.to_string(),
            is_incoming: false,
        };
        let for_friend = Self {
            sender: author_username.to_string(),
            is_incoming: true,
            ..for_author.clone()
        };
        (for_author, for_friend)
    }
}

/// Read marker attached to a group message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeenMarker {
    pub email: String,
    /// `"user"` on the viewer's own copy, the viewer's username elsewhere
    pub username: String,
    #[serde(default)]
    pub avatar: String,
}

/// A group chat message, as seen by one member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupMessage {
    pub id: String,
    pub time_stamp: String,
    pub text: String,
    #[serde(default)]
    pub is_seen_by: Vec<SeenMarker>,
    #[serde(default)]
    pub is_incoming: bool,
    pub sender: String,
    #[serde(default)]
    pub sender_avatar: String,
}

/// The member-independent part of a new group message
#[derive(Debug, Clone)]
pub struct GroupMessageDraft {
    pub id: String,
    pub time_stamp: String,
    pub text: String,
}

impl GroupMessageDraft {
    pub fn new(text: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            time_stamp: now_timestamp(),
            text: text.to_string(),
        }
    }

    /// Frame the draft for one member
    ///
    /// # Arguments
    ///
    /// * `is_author` - Whether the member receiving this copy wrote it
    /// * `author_username` - Author's username, shown to everyone else
    /// * `author_avatar` - Author's avatar
    pub fn for_member(&self, is_author: bool, author_username: &str, author_avatar: &str) -> GroupMessage {
        GroupMessage {
            id: self.id.clone(),
            time_stamp: self.time_stamp.clone(),
            text: self.text.clone(),
            is_seen_by: Vec::new(),
            is_incoming: !is_author,
            sender: if is_author {
                SELF_LABEL.to_string()
            } else {
                author_username.to_string()
            },
            sender_avatar: author_avatar.to_string(),
        }
    }
}

/// Recompute read state of one side of a direct conversation
///
/// Every message becomes `isSeen`. Among outgoing messages only the most
/// recent keeps `lastSeen`; the others are cleared. Incoming messages keep
/// their `lastSeen` untouched.
pub fn mark_conversation_seen(messages: &mut [DirectMessage]) {
    let last_outgoing = messages.iter().rposition(|m| !m.is_incoming);
    for (index, message) in messages.iter_mut().enumerate() {
        if !message.is_incoming {
            message.last_seen = Some(index) == last_outgoing;
        }
        message.is_seen = true;
    }
}

/// Move a viewer's read marker to the most recent group message
///
/// Any earlier marker for the same email is dropped from every message, so a
/// viewer is marked on at most one message no matter how often this runs.
///
/// # Returns
///
/// `false` if there are no messages to mark
pub fn mark_group_seen(messages: &mut [GroupMessage], marker: SeenMarker) -> bool {
    for message in messages.iter_mut() {
        message
            .is_seen_by
            .retain(|seen| !seen.email.eq_ignore_ascii_case(&marker.email));
    }
    match messages.last_mut() {
        Some(last) => {
            last.is_seen_by.push(marker);
            true
        }
        None => false,
    }
}

/// Inbound payload of the chat channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ChatEvent {
    /// Message to a group chat
    #[serde(rename = "groupChatText", rename_all = "camelCase")]
    GroupChatText {
        #[serde(default)]
        chat_id: Option<String>,
        #[serde(default)]
        text: Option<String>,
    },
    /// Message to a friend, addressed by username
    #[serde(rename = "friendText", rename_all = "camelCase")]
    FriendText {
        #[serde(default)]
        friend_name: Option<String>,
        #[serde(default)]
        text: Option<String>,
    },
}

impl ChatEvent {
    /// Tags accepted on the chat channel
    pub const TAGS: [&'static str; 2] = ["groupChatText", "friendText"];
}

/// Inbound payload of the has-seen channel
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeenRequest {
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub friend_id: Option<String>,
}

/// What a has-seen request refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeenTarget {
    GroupChat(String),
    Friend(String),
}

impl SeenRequest {
    /// Resolve the request to exactly one target
    ///
    /// # Errors
    ///
    /// Returns the message to report when both or neither id is supplied.
    pub fn target(self) -> Result<SeenTarget, &'static str> {
        let chat_id = self.chat_id.filter(|id| !id.is_empty());
        let friend_id = self.friend_id.filter(|id| !id.is_empty());
        match (chat_id, friend_id) {
            (Some(_), Some(_)) => Err("Provide either chat_id or friend_id, not both"),
            (Some(chat_id), None) => Ok(SeenTarget::GroupChat(chat_id)),
            (None, Some(friend_id)) => Ok(SeenTarget::Friend(friend_id)),
            (None, None) => Err("Provide either chat_id or friend_id"),
        }
    }
}
