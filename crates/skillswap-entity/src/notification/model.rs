//! Notification record models.
//!
//! Remote and local records share one logical shape but differ in
//! origin and id namespace. Merge logic works over the tagged
//! [`NotificationRecord`] union so the distinction stays explicit and
//! exhaustively matched instead of being inferred from optional fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use skillswap_core::types::id::{NotificationId, UserId};

use super::kind::NotificationKind;

/// A notification persisted by the remote store (authoritative).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Store-assigned unique identifier.
    pub id: NotificationId,
    /// The recipient user. A notification is never transferred between users.
    pub user_id: UserId,
    /// Kind of event this notification describes.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Human-readable text, immutable after creation.
    pub message: String,
    /// Optional pointer to the related entity (connection id, conversation id).
    pub reference_id: Option<String>,
    /// Whether the owning user has read this notification.
    pub is_read: bool,
    /// Creation timestamp, the sole sort key (descending).
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

/// A client-synthesized notification (non-authoritative).
///
/// Created when remote delivery fails, or as an optimistic echo of a
/// locally initiated action. Never deleted automatically; once an
/// equivalent remote record exists it is superseded at merge time but
/// may remain in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalNotification {
    /// Local-namespaced identifier (`local-` prefix).
    pub id: NotificationId,
    /// The recipient user.
    pub user_id: UserId,
    /// Legacy alias for the recipient; treated as equivalent to
    /// `user_id` when matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<UserId>,
    /// Kind of event this notification describes.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Human-readable text.
    pub message: String,
    /// Optional pointer to the related entity.
    pub reference_id: Option<String>,
    /// Whether the owning user has read this notification.
    pub is_read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl LocalNotification {
    /// Whether this record belongs to the given user, under either the
    /// current field or the legacy alias.
    pub fn is_for(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id || self.recipient_id.as_ref() == Some(user_id)
    }
}

/// Where a notification record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrigin {
    /// Persisted by the remote store.
    Remote,
    /// Synthesized on this client.
    Local,
}

/// A notification from either origin, as rendered in the merged view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum NotificationRecord {
    /// A store-persisted record.
    Remote(Notification),
    /// A client-synthesized record.
    Local(LocalNotification),
}

impl NotificationRecord {
    /// The record's identifier.
    pub fn id(&self) -> &NotificationId {
        match self {
            Self::Remote(n) => &n.id,
            Self::Local(n) => &n.id,
        }
    }

    /// The recipient.
    pub fn user_id(&self) -> &UserId {
        match self {
            Self::Remote(n) => &n.user_id,
            Self::Local(n) => &n.user_id,
        }
    }

    /// Kind of event.
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::Remote(n) => n.kind,
            Self::Local(n) => n.kind,
        }
    }

    /// Notification text.
    pub fn message(&self) -> &str {
        match self {
            Self::Remote(n) => &n.message,
            Self::Local(n) => &n.message,
        }
    }

    /// Optional related-entity pointer.
    pub fn reference_id(&self) -> Option<&str> {
        match self {
            Self::Remote(n) => n.reference_id.as_deref(),
            Self::Local(n) => n.reference_id.as_deref(),
        }
    }

    /// Whether the record has been read.
    pub fn is_read(&self) -> bool {
        match self {
            Self::Remote(n) => n.is_read,
            Self::Local(n) => n.is_read,
        }
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Remote(n) => n.created_at,
            Self::Local(n) => n.created_at,
        }
    }

    /// The record's origin tag.
    pub fn origin(&self) -> RecordOrigin {
        match self {
            Self::Remote(_) => RecordOrigin::Remote,
            Self::Local(_) => RecordOrigin::Local,
        }
    }
}

/// Parameters of one logical notification send.
///
/// Doubles as the exact-match key for pending-delivery records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    /// The recipient user.
    pub user_id: UserId,
    /// Kind of event.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Human-readable text.
    pub message: String,
    /// Optional pointer to the related entity.
    pub reference_id: Option<String>,
}

impl NewNotification {
    /// Create a send request without a reference.
    pub fn new(user_id: impl Into<UserId>, kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            kind,
            message: message.into(),
            reference_id: None,
        }
    }

    /// Attach a related-entity reference.
    pub fn with_reference(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }
}
