//! Friend Entry Data Structure
//!
//! A friend entry is embedded in a user's document and always exists in
//! pairs: if A's document holds an entry naming B, B's holds one naming A.
//! Each side keeps its own copy of the direct-message history.

use serde::{Deserialize, Serialize};

use crate::shared::messaging::message::DirectMessage;
use crate::shared::messaging::user::User;

/// Represents a friend in a user's friends list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FriendEntry {
    /// The friend's user ID
    pub user_id: String,
    /// Friend's username
    pub username: String,
    #[serde(default)]
    pub bio: String,
    /// Friend's email (presence routing key)
    pub email: String,
    #[serde(default)]
    pub avatar: String,
    /// This side's copy of the conversation
    #[serde(default)]
    pub messages: Vec<DirectMessage>,
    /// Whether the friend is currently online
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub is_muted: bool,
}

impl FriendEntry {
    /// Seed an entry describing `user`, with an empty conversation
    pub fn describing(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            username: user.username.clone(),
            bio: user.bio.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            messages: Vec::new(),
            is_online: false,
            is_muted: false,
        }
    }

    /// Get the last message in the conversation, if any
    pub fn last_message(&self) -> Option<&DirectMessage> {
        self.messages.last()
    }
}
