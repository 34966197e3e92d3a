//! Messaging Module
//!
//! The request/response surface next to the websocket channels: operations
//! on the caller's notifications, friends, conversations and profile.

/// Notifications, friends and conversations
pub mod handlers;

/// Avatar and theme
pub mod profile;

pub use handlers::{
    delete_chat, delete_friend, delete_group_chat, delete_notification, leave_groupchat,
    mark_all_notifications_seen, mute_friend_chat, mute_groupchat,
};
pub use profile::{change_avatar, save_theme};
