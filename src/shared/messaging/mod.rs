//! Messaging Module
//!
//! This module contains the document model of the social-chat system:
//!
//! - `User` - The persisted user document
//! - `Notification` - Friend request notifications and their outcome
//! - `FriendEntry` - A friend embedded in a user's document
//! - `DirectMessage` / `GroupMessage` - Per-viewer message copies
//! - `GroupChatEntry` - One member's copy of a group chat
//!
//! It also holds the inbound payloads of the websocket channels.
//!
//! # Usage
//!
//! ```rust
//! use blink::shared::messaging::{User, FriendEntry, Notification};
//! ```

pub mod contact;
pub mod conversation;
pub mod message;
pub mod notification;
pub mod user;

// Re-export all types
pub use contact::FriendEntry;
pub use conversation::{GroupChatEntry, GroupChatRequest, GroupChatRequestError, GroupMember};
pub use message::{
    mark_conversation_seen, mark_group_seen, ChatEvent, DirectMessage, GroupMessage,
    GroupMessageDraft, SeenMarker, SeenRequest, SeenTarget, SELF_LABEL,
};
pub use notification::{
    FriendDecision, Notification, NotificationFilter, NotificationKind, NotificationStatus, Party,
};
pub use user::{Theme, User, UserInfo};
