//! Group Chat Data Structure
//!
//! Every member of a group chat holds a `GroupChatEntry` with the same chat
//! id. The member list is customized per holder: the holder's own entry is
//! labeled `"user"` instead of their username.

use serde::{Deserialize, Serialize};

use crate::shared::messaging::message::{GroupMessage, SELF_LABEL};
use crate::shared::messaging::user::User;

/// A member of a group chat
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub avatar: String,
    pub email: String,
}

impl GroupMember {
    pub fn of(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            email: user.email.clone(),
        }
    }
}

/// One member's copy of a group chat
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupChatEntry {
    pub chat_id: String,
    pub users: Vec<GroupMember>,
    #[serde(default)]
    pub messages: Vec<GroupMessage>,
    #[serde(default)]
    pub is_muted: bool,
}

impl GroupChatEntry {
    /// Build the copy of a new chat held by `holder_email`
    pub fn for_holder(chat_id: &str, members: &[GroupMember], holder_email: &str) -> Self {
        let users = members
            .iter()
            .map(|member| {
                let mut member = member.clone();
                if member.email.eq_ignore_ascii_case(holder_email) {
                    member.username = SELF_LABEL.to_string();
                }
                member
            })
            .collect();

        Self {
            chat_id: chat_id.to_string(),
            users,
            messages: Vec::new(),
            is_muted: false,
        }
    }

    /// Member ids in canonical (sorted) order
    pub fn sorted_member_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.users.iter().map(|u| u.user_id.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    /// Whether this chat has exactly the given member set
    pub fn has_members(&self, sorted_ids: &[&str]) -> bool {
        self.sorted_member_ids() == sorted_ids
    }

    /// The most recent message, if any
    pub fn last_message(&self) -> Option<&GroupMessage> {
        self.messages.last()
    }
}

/// Why a create-group-chat payload was refused before any lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupChatRequestError {
    NotAList,
    Empty,
}

impl GroupChatRequestError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotAList => "Invalid data format, expected an array of usernames.",
            Self::Empty => "Usernames list cannot be empty.",
        }
    }
}

/// Inbound payload of the create-group-chat channel: a list of usernames
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupChatRequest {
    pub usernames: Vec<String>,
}

impl GroupChatRequest {
    /// Validate a decoded frame
    ///
    /// Duplicates are dropped, keeping first occurrence order.
    pub fn from_value(value: serde_json::Value) -> Result<Self, GroupChatRequestError> {
        let items = match value {
            serde_json::Value::Array(items) => items,
            _ => return Err(GroupChatRequestError::NotAList),
        };

        let mut usernames: Vec<String> = Vec::with_capacity(items.len());
        for item in items {
            let name = item
                .as_str()
                .map(str::trim)
                .ok_or(GroupChatRequestError::NotAList)?;
            if !name.is_empty() && !usernames.iter().any(|n| n == name) {
                usernames.push(name.to_string());
            }
        }

        if usernames.is_empty() {
            return Err(GroupChatRequestError::Empty);
        }
        Ok(Self { usernames })
    }
}
