/**
 * Single-Document Updates
 *
 * `UserUpdate` is the closed set of mutations a store applies atomically to
 * one user document. Both store implementations funnel through
 * `UserUpdate::apply`, so the in-memory and Postgres stores agree on what
 * "matched" means for every operation.
 */

use crate::shared::messaging::{
    DirectMessage, FriendEntry, GroupChatEntry, GroupMessage, Notification, NotificationFilter,
    Theme, User,
};

/// One atomic mutation of a user document
#[derive(Debug, Clone, PartialEq)]
pub enum UserUpdate {
    /// Append a notification
    PushNotification(Notification),
    /// Remove every notification matching the filter
    PullNotifications(NotificationFilter),
    /// Set `isSeenByUser` on every notification
    MarkAllNotificationsSeen,

    /// Append a friend entry (no-op if that friend is already listed)
    PushFriend(FriendEntry),
    /// Remove the friend entry for `friend_id`
    RemoveFriend { friend_id: String },
    /// Set the online flag of the entry whose email is `friend_email`
    SetFriendOnline { friend_email: String, is_online: bool },
    SetFriendMuted { friend_id: String, is_muted: bool },
    /// Append to this side's copy of the conversation with `friend_id`
    PushDirectMessage { friend_id: String, message: DirectMessage },
    /// Replace this side's copy of the conversation with `friend_id`
    SetDirectMessages { friend_id: String, messages: Vec<DirectMessage> },

    /// Append a group chat copy
    PushGroupChat(GroupChatEntry),
    /// Remove the copy of `chat_id`
    PullGroupChat { chat_id: String },
    /// Drop `user_id` from the member list of this copy of `chat_id`
    RemoveGroupMember { chat_id: String, user_id: String },
    PushGroupMessage { chat_id: String, message: GroupMessage },
    SetGroupMessages { chat_id: String, messages: Vec<GroupMessage> },
    SetGroupMuted { chat_id: String, is_muted: bool },

    SetTheme(Theme),
    SetAvatar(String),
}

impl UserUpdate {
    /// Apply the update in place
    ///
    /// # Returns
    ///
    /// Whether the addressed element existed (pulls: whether anything was
    /// removed). The document is left untouched when this returns `false`.
    pub fn apply(self, user: &mut User) -> bool {
        match self {
            Self::PushNotification(notification) => {
                user.notifications.push(notification);
                true
            }
            Self::PullNotifications(filter) => {
                let before = user.notifications.len();
                user.notifications.retain(|n| !filter.matches(n));
                user.notifications.len() != before
            }
            Self::MarkAllNotificationsSeen => {
                for notification in user.notifications.iter_mut() {
                    notification.is_seen_by_user = true;
                }
                true
            }

            Self::PushFriend(friend) => {
                if user.is_friend(&friend.user_id) {
                    return false;
                }
                user.friends_list.push(friend);
                true
            }
            Self::RemoveFriend { friend_id } => {
                let before = user.friends_list.len();
                user.friends_list.retain(|f| f.user_id != friend_id);
                user.friends_list.len() != before
            }
            Self::SetFriendOnline {
                friend_email,
                is_online,
            } => match user
                .friends_list
                .iter_mut()
                .find(|f| f.email.eq_ignore_ascii_case(&friend_email))
            {
                Some(friend) => {
                    friend.is_online = is_online;
                    true
                }
                None => false,
            },
            Self::SetFriendMuted { friend_id, is_muted } => {
                match friend_mut(user, &friend_id) {
                    Some(friend) => {
                        friend.is_muted = is_muted;
                        true
                    }
                    None => false,
                }
            }
            Self::PushDirectMessage { friend_id, message } => match friend_mut(user, &friend_id) {
                Some(friend) => {
                    friend.messages.push(message);
                    true
                }
                None => false,
            },
            Self::SetDirectMessages {
                friend_id,
                messages,
            } => match friend_mut(user, &friend_id) {
                Some(friend) => {
                    friend.messages = messages;
                    true
                }
                None => false,
            },

            Self::PushGroupChat(chat) => {
                user.group_chats_list.push(chat);
                true
            }
            Self::PullGroupChat { chat_id } => {
                let before = user.group_chats_list.len();
                user.group_chats_list.retain(|c| c.chat_id != chat_id);
                user.group_chats_list.len() != before
            }
            Self::RemoveGroupMember { chat_id, user_id } => match chat_mut(user, &chat_id) {
                Some(chat) => {
                    let before = chat.users.len();
                    chat.users.retain(|m| m.user_id != user_id);
                    chat.users.len() != before
                }
                None => false,
            },
            Self::PushGroupMessage { chat_id, message } => match chat_mut(user, &chat_id) {
                Some(chat) => {
                    chat.messages.push(message);
                    true
                }
                None => false,
            },
            Self::SetGroupMessages { chat_id, messages } => match chat_mut(user, &chat_id) {
                Some(chat) => {
                    chat.messages = messages;
                    true
                }
                None => false,
            },
            Self::SetGroupMuted { chat_id, is_muted } => match chat_mut(user, &chat_id) {
                Some(chat) => {
                    chat.is_muted = is_muted;
                    true
                }
                None => false,
            },

            Self::SetTheme(theme) => {
                user.theme = theme;
                true
            }
            Self::SetAvatar(avatar) => {
                user.avatar = avatar;
                true
            }
        }
    }

    /// Operation name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::PushNotification(_) => "push_notification",
            Self::PullNotifications(_) => "pull_notifications",
            Self::MarkAllNotificationsSeen => "mark_all_notifications_seen",
            Self::PushFriend(_) => "push_friend",
            Self::RemoveFriend { .. } => "remove_friend",
            Self::SetFriendOnline { .. } => "set_friend_online",
            Self::SetFriendMuted { .. } => "set_friend_muted",
            Self::PushDirectMessage { .. } => "push_direct_message",
            Self::SetDirectMessages { .. } => "set_direct_messages",
            Self::PushGroupChat(_) => "push_group_chat",
            Self::PullGroupChat { .. } => "pull_group_chat",
            Self::RemoveGroupMember { .. } => "remove_group_member",
            Self::PushGroupMessage { .. } => "push_group_message",
            Self::SetGroupMessages { .. } => "set_group_messages",
            Self::SetGroupMuted { .. } => "set_group_muted",
            Self::SetTheme(_) => "set_theme",
            Self::SetAvatar(_) => "set_avatar",
        }
    }
}

fn friend_mut<'a>(user: &'a mut User, friend_id: &str) -> Option<&'a mut FriendEntry> {
    user.friends_list.iter_mut().find(|f| f.user_id == friend_id)
}

fn chat_mut<'a>(user: &'a mut User, chat_id: &str) -> Option<&'a mut GroupChatEntry> {
    user.group_chats_list.iter_mut().find(|c| c.chat_id == chat_id)
}
