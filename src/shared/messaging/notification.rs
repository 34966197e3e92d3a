//! Notification Data Structure
//!
//! Notifications live inside each user's document. A friend request produces
//! two copies (one outgoing on the sender, one incoming on the receiver) that
//! share a `notificationId` so both sides can be correlated later.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::event::now_timestamp;
use crate::shared::messaging::contact::FriendEntry;
use crate::shared::messaging::user::User;

/// Kind of notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    /// Friend request and its outcome (pending, complete, rejected)
    FriendRequest,
    /// Anything this server does not produce itself
    #[serde(other)]
    Other,
}

/// Lifecycle status of a notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    /// Waiting for the receiver to decide
    Pending,
    /// Request accepted
    Complete,
    /// Request rejected
    Rejected,
}

impl Default for NotificationStatus {
    fn default() -> Self {
        NotificationStatus::Pending
    }
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Pending => "pending",
            NotificationStatus::Complete => "complete",
            NotificationStatus::Rejected => "rejected",
        }
    }
}

/// Identity snapshot of one side of a notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub user_id: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Party {
    /// Snapshot a user without the avatar
    pub fn of(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            avatar: None,
        }
    }

    /// Snapshot a user including the avatar
    pub fn with_avatar(user: &User) -> Self {
        Self {
            avatar: Some(user.avatar.clone()),
            ..Self::of(user)
        }
    }
}

/// A notification stored in a user's document and pushed to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique id of this copy
    pub id: String,
    /// Correlation id shared by the sender-side and receiver-side copies
    pub notification_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub sender: Party,
    pub receiver: Party,
    #[serde(default)]
    pub status: NotificationStatus,
    #[serde(default)]
    pub is_seen_by_user: bool,
    #[serde(default)]
    pub is_incoming: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_message: Option<String>,
    pub time_stamp: String,
    /// Friend entry created by an accepted request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_friend: Option<FriendEntry>,
}

impl Notification {
    /// Build the outgoing and incoming copies of a new friend request
    ///
    /// # Returns
    ///
    /// `(outgoing, incoming)`. The outgoing copy belongs in the sender's
    /// document, the incoming copy in the target's. Both are `pending` and
    /// share one freshly minted correlation id.
    pub fn friend_request_pair(sender: &User, target: &User) -> (Self, Self) {
        let notification_id = Uuid::new_v4().to_string();
        let sent = format!("Friend request sent to {}", target.username);
        let received = format!("{} wants to be your friend", sender.username);

        let outgoing = Self {
            id: Uuid::new_v4().to_string(),
            notification_id: notification_id.clone(),
            kind: NotificationKind::FriendRequest,
            sender: Party::of(sender),
            receiver: Party::of(target),
            status: NotificationStatus::Pending,
            is_seen_by_user: true,
            is_incoming: false,
            message: sent.clone(),
            display_message: Some(sent),
            time_stamp: now_timestamp(),
            new_friend: None,
        };

        let incoming = Self {
            id: Uuid::new_v4().to_string(),
            notification_id,
            kind: NotificationKind::FriendRequest,
            sender: Party::with_avatar(sender),
            receiver: Party::of(target),
            status: NotificationStatus::Pending,
            is_seen_by_user: false,
            is_incoming: true,
            message: received.clone(),
            display_message: Some(received),
            time_stamp: now_timestamp(),
            new_friend: None,
        };

        (outgoing, incoming)
    }

    /// Build the base of a decision on a friend request
    ///
    /// `responder` is the user who received the request and is now deciding,
    /// `requester` the user who originally sent it.
    pub fn decision(
        notification_id: &str,
        responder: &User,
        requester: &User,
        status: NotificationStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            notification_id: notification_id.to_string(),
            kind: NotificationKind::FriendRequest,
            sender: Party::of(responder),
            receiver: Party::of(requester),
            status,
            is_seen_by_user: false,
            is_incoming: false,
            message: String::new(),
            display_message: None,
            time_stamp: now_timestamp(),
            new_friend: None,
        }
    }

    pub fn incoming(mut self, is_incoming: bool) -> Self {
        self.is_incoming = is_incoming;
        self
    }

    pub fn seen(mut self, is_seen: bool) -> Self {
        self.is_seen_by_user = is_seen;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>, display: Option<String>) -> Self {
        self.message = message.into();
        self.display_message = display;
        self
    }

    pub fn with_new_friend(mut self, friend: FriendEntry) -> Self {
        self.new_friend = Some(friend);
        self
    }

    /// Check if the notification is a pending friend request
    pub fn is_pending_request(&self) -> bool {
        self.kind == NotificationKind::FriendRequest && self.status == NotificationStatus::Pending
    }
}

/// Selects notifications to pull from a user's document
///
/// Every populated field must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFilter {
    pub id: Option<String>,
    pub kind: Option<NotificationKind>,
    pub status: Option<NotificationStatus>,
    pub sender_email: Option<String>,
    pub receiver_user_id: Option<String>,
}

impl NotificationFilter {
    /// Match a single notification copy by id
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Pending friend requests received from `sender_email`
    pub fn pending_request_from(sender_email: impl Into<String>) -> Self {
        Self {
            kind: Some(NotificationKind::FriendRequest),
            status: Some(NotificationStatus::Pending),
            sender_email: Some(sender_email.into()),
            ..Self::default()
        }
    }

    /// Pending friend requests sent to `receiver_user_id`
    pub fn pending_request_to(receiver_user_id: impl Into<String>) -> Self {
        Self {
            kind: Some(NotificationKind::FriendRequest),
            status: Some(NotificationStatus::Pending),
            receiver_user_id: Some(receiver_user_id.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, notification: &Notification) -> bool {
        self.id.as_ref().map_or(true, |id| &notification.id == id)
            && self.kind.map_or(true, |kind| notification.kind == kind)
            && self.status.map_or(true, |status| notification.status == status)
            && self
                .sender_email
                .as_ref()
                .map_or(true, |email| notification.sender.email.eq_ignore_ascii_case(email))
            && self
                .receiver_user_id
                .as_ref()
                .map_or(true, |id| &notification.receiver.user_id == id)
    }
}

/// Inbound payload of the accept-friend channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FriendDecision {
    #[serde(default)]
    pub sender_email: Option<String>,
    #[serde(default)]
    pub is_accepted: Option<bool>,
}
