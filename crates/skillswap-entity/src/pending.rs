//! Pending delivery records.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use skillswap_core::types::id::UserId;

use crate::notification::kind::NotificationKind;
use crate::notification::model::NewNotification;

/// A durable marker that a notification send is in-flight or failed and
/// awaits retry.
///
/// Created before the first delivery attempt, removed on confirmed
/// remote success, and skipped (but kept) once older than the pending
/// TTL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDelivery {
    /// The recipient user.
    pub user_id: UserId,
    /// Kind of event.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Notification text.
    pub message: String,
    /// Optional pointer to the related entity.
    pub reference_id: Option<String>,
    /// When the attempt was first queued; used for expiry.
    pub queued_at: DateTime<Utc>,
    /// Number of failed attempts so far.
    pub retries: u32,
}

impl PendingDelivery {
    /// Create a fresh pending record for a send request.
    pub fn new(request: &NewNotification) -> Self {
        Self {
            user_id: request.user_id.clone(),
            kind: request.kind,
            message: request.message.clone(),
            reference_id: request.reference_id.clone(),
            queued_at: Utc::now(),
            retries: 0,
        }
    }

    /// Rebuild the send request this record tracks.
    pub fn request(&self) -> NewNotification {
        NewNotification {
            user_id: self.user_id.clone(),
            kind: self.kind,
            message: self.message.clone(),
            reference_id: self.reference_id.clone(),
        }
    }

    /// Exact-field match against a send request.
    pub fn matches(&self, request: &NewNotification) -> bool {
        self.user_id == request.user_id
            && self.kind == request.kind
            && self.message == request.message
            && self.reference_id == request.reference_id
    }

    /// Whether the record is older than the given TTL.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        Utc::now() - self.queued_at > ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> NewNotification {
        NewNotification::new("u1", NotificationKind::Message, "hello").with_reference("conv-1")
    }

    #[test]
    fn test_matches_exact_fields() {
        let pending = PendingDelivery::new(&request());
        assert!(pending.matches(&request()));

        let other = NewNotification::new("u1", NotificationKind::Message, "different");
        assert!(!pending.matches(&other));
    }

    #[test]
    fn test_reference_mismatch_does_not_match() {
        let pending = PendingDelivery::new(&request());
        let no_reference = NewNotification::new("u1", NotificationKind::Message, "hello");
        assert!(!pending.matches(&no_reference));
    }

    #[test]
    fn test_expiry_boundary() {
        let mut pending = PendingDelivery::new(&request());
        let ttl = Duration::hours(24);

        pending.queued_at = Utc::now() - Duration::hours(24) - Duration::milliseconds(1);
        assert!(pending.is_expired(ttl));

        pending.queued_at = Utc::now() - Duration::hours(23) - Duration::minutes(59);
        assert!(!pending.is_expired(ttl));
    }

    #[test]
    fn test_request_roundtrip() {
        let pending = PendingDelivery::new(&request());
        assert_eq!(pending.request(), request());
    }
}
