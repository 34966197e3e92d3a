//! User Document
//!
//! The user document is the unit of persistence: a user's profile together
//! with every embedded notification, friend entry and group chat copy.
//! Sessions fetch it per operation and never hold it across events.

use serde::{Deserialize, Serialize};

use crate::shared::messaging::contact::FriendEntry;
use crate::shared::messaging::conversation::GroupChatEntry;
use crate::shared::messaging::notification::Notification;

/// UI theme saved per user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Synthwave,
    Chronoflux,
    Timberly,
    Auraline,
    Darkbloom,
    Albescent,
}

/// A user document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable user ID (UUID string)
    pub user_id: String,
    /// Unique (case-insensitive) display name
    pub username: String,
    #[serde(default)]
    pub bio: String,
    /// Unique email, stored lower-cased
    pub email: String,
    /// Hashed password (bcrypt)
    #[serde(default)]
    pub password_hash: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub friends_list: Vec<FriendEntry>,
    #[serde(default)]
    pub group_chats_list: Vec<GroupChatEntry>,
}

impl User {
    /// Create an empty document
    pub fn new(user_id: &str, username: &str, email: &str, password_hash: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            username: username.to_string(),
            bio: String::new(),
            email: email.to_lowercase(),
            password_hash: password_hash.to_string(),
            avatar: String::new(),
            theme: Theme::default(),
            notifications: Vec::new(),
            friends_list: Vec::new(),
            group_chats_list: Vec::new(),
        }
    }

    pub fn friend_by_id(&self, user_id: &str) -> Option<&FriendEntry> {
        self.friends_list.iter().find(|f| f.user_id == user_id)
    }

    pub fn friend_by_username(&self, username: &str) -> Option<&FriendEntry> {
        self.friends_list.iter().find(|f| f.username == username)
    }

    pub fn friend_by_email(&self, email: &str) -> Option<&FriendEntry> {
        self.friends_list
            .iter()
            .find(|f| f.email.eq_ignore_ascii_case(email))
    }

    pub fn is_friend(&self, user_id: &str) -> bool {
        self.friend_by_id(user_id).is_some()
    }

    pub fn group_chat(&self, chat_id: &str) -> Option<&GroupChatEntry> {
        self.group_chats_list.iter().find(|c| c.chat_id == chat_id)
    }

    /// Pending friend request from `sender_id` sitting in this user's inbox
    pub fn has_pending_request_from(&self, sender_id: &str) -> bool {
        self.notifications
            .iter()
            .any(|n| n.is_pending_request() && n.sender.user_id == sender_id)
    }

    /// Pending friend request this user sent to `receiver_id`
    pub fn has_pending_request_to(&self, receiver_id: &str) -> bool {
        self.notifications
            .iter()
            .any(|n| n.is_pending_request() && n.receiver.user_id == receiver_id)
    }

    /// Find the pending request received from `sender_email`
    pub fn pending_request_from_email(&self, sender_email: &str) -> Option<&Notification> {
        self.notifications
            .iter()
            .find(|n| n.is_pending_request() && n.sender.email.eq_ignore_ascii_case(sender_email))
    }
}

/// Profile view returned by `GET /users/user_info`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: String,
    pub username: String,
    pub bio: String,
    pub email: String,
    pub avatar: String,
    pub theme: Theme,
    pub notifications: Vec<Notification>,
    pub friends_list: Vec<FriendEntry>,
    pub group_chats_list: Vec<GroupChatEntry>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            bio: user.bio,
            email: user.email,
            avatar: user.avatar,
            theme: user.theme,
            notifications: user.notifications,
            friends_list: user.friends_list,
            group_chats_list: user.group_chats_list,
        }
    }
}
