//! Notification kind enumeration.

use serde::{Deserialize, Serialize};

/// Kind of event a notification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Someone asked to connect with the recipient.
    ConnectionRequest,
    /// A connection request the recipient sent was accepted.
    ConnectionAccepted,
    /// A new chat message arrived.
    Message,
    /// A skill the recipient wants to learn matched a new teacher.
    SkillMatch,
    /// System-level announcements.
    System,
}

impl NotificationKind {
    /// Return the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConnectionRequest => "connection_request",
            Self::ConnectionAccepted => "connection_accepted",
            Self::Message => "message",
            Self::SkillMatch => "skill_match",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
