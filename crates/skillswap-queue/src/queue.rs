//! The Local Durable Queue.
//!
//! Persists pending delivery records and local notifications to the
//! durable client store. Every operation is a full read-modify-write
//! of the relevant collection — O(n) in stored record count, which is
//! fine at notification volume. Failures are swallowed, logged, and
//! reported via neutral return values so callers never need to handle
//! storage errors.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use skillswap_core::events::{BusEvent, EventBus};
use skillswap_core::traits::storage::DurableStore;
use skillswap_core::types::id::{NotificationId, UserId};
use skillswap_entity::{LocalNotification, NewNotification, PendingDelivery};

use crate::keys;

/// Client-side persisted log of send attempts and local notifications.
#[derive(Debug, Clone)]
pub struct LocalQueue {
    store: Arc<dyn DurableStore>,
    bus: EventBus,
}

impl LocalQueue {
    /// Create a queue over the given storage backend and event bus.
    pub fn new(store: Arc<dyn DurableStore>, bus: EventBus) -> Self {
        Self { store, bus }
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(raw) = self.store.get(key) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(key, error = %e, "Unreadable stored collection; treating as empty");
                Vec::new()
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, items: &[T]) -> bool {
        let raw = match serde_json::to_string(items) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize collection");
                return false;
            }
        };
        let ok = self.store.set(key, &raw);
        if !ok {
            warn!(key, "Durable store rejected write");
        }
        ok
    }

    /// Append a pending delivery record. Never overwrites existing
    /// entries; duplicates of a still-pending request are expected.
    pub fn enqueue_pending(&self, record: PendingDelivery) {
        let key = keys::pending_deliveries();
        let mut records: Vec<PendingDelivery> = self.read(&key);
        records.push(record);
        self.write(&key, &records);
    }

    /// Remove every pending record exactly matching the request.
    ///
    /// Returns the number removed; calling again with the same request
    /// is a no-op returning zero.
    pub fn remove_pending(&self, request: &NewNotification) -> usize {
        let key = keys::pending_deliveries();
        let mut records: Vec<PendingDelivery> = self.read(&key);
        let before = records.len();
        records.retain(|r| !r.matches(request));
        let removed = before - records.len();
        if removed > 0 {
            self.write(&key, &records);
        }
        removed
    }

    /// Increment the retry count on every pending record matching the
    /// request.
    pub fn increment_retries(&self, request: &NewNotification) {
        let key = keys::pending_deliveries();
        let mut records: Vec<PendingDelivery> = self.read(&key);
        let mut changed = false;
        for record in records.iter_mut().filter(|r| r.matches(request)) {
            record.retries += 1;
            changed = true;
        }
        if changed {
            self.write(&key, &records);
        }
    }

    /// All pending records, including expired ones. Callers filter.
    pub fn list_pending(&self) -> Vec<PendingDelivery> {
        self.read(&keys::pending_deliveries())
    }

    /// Synthesize and persist a local notification for a send request.
    ///
    /// Assigns a local-namespaced id and the current timestamp, then
    /// announces the write on the event bus for same-process observers.
    /// Returns `None` only when storage is unavailable.
    pub fn store_local_notification(&self, request: &NewNotification) -> Option<LocalNotification> {
        let record = LocalNotification {
            id: NotificationId::local(),
            user_id: request.user_id.clone(),
            recipient_id: None,
            kind: request.kind,
            message: request.message.clone(),
            reference_id: request.reference_id.clone(),
            is_read: false,
            created_at: Utc::now(),
        };

        let key = keys::local_notifications();
        let mut records: Vec<LocalNotification> = self.read(&key);
        records.push(record.clone());
        if !self.write(&key, &records) {
            return None;
        }

        debug!(user_id = %record.user_id, id = %record.id, "Stored local notification");
        self.bus.publish(BusEvent::LocalQueueWrite {
            user_id: record.user_id.clone(),
        });
        Some(record)
    }

    /// All local notifications addressed to the user, under either the
    /// current field or the legacy `recipient_id` alias, newest first.
    pub fn list_local_notifications(&self, user_id: &UserId) -> Vec<LocalNotification> {
        let mut records: Vec<LocalNotification> = self
            .read::<LocalNotification>(&keys::local_notifications())
            .into_iter()
            .filter(|r| r.is_for(user_id))
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// Mark one local notification read. Returns `true` if found.
    pub fn mark_local_read(&self, id: &NotificationId) -> bool {
        let key = keys::local_notifications();
        let mut records: Vec<LocalNotification> = self.read(&key);
        let mut found = false;
        for record in records.iter_mut().filter(|r| r.id == *id) {
            record.is_read = true;
            found = true;
        }
        if found {
            self.write(&key, &records);
        }
        found
    }

    /// Mark all of a user's local notifications read. Returns the
    /// number updated.
    pub fn mark_all_local_read(&self, user_id: &UserId) -> usize {
        let key = keys::local_notifications();
        let mut records: Vec<LocalNotification> = self.read(&key);
        let mut updated = 0;
        for record in records
            .iter_mut()
            .filter(|r| r.is_for(user_id) && !r.is_read)
        {
            record.is_read = true;
            updated += 1;
        }
        if updated > 0 {
            self.write(&key, &records);
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use skillswap_entity::NotificationKind;

    use crate::store::{MemoryStore, UnavailableStore};

    fn queue() -> LocalQueue {
        LocalQueue::new(Arc::new(MemoryStore::new()), EventBus::new(8))
    }

    fn request(user: &str, message: &str) -> NewNotification {
        NewNotification::new(user, NotificationKind::Message, message).with_reference("conv-1")
    }

    #[test]
    fn test_enqueue_and_list_pending() {
        let q = queue();
        q.enqueue_pending(PendingDelivery::new(&request("u1", "hi")));
        q.enqueue_pending(PendingDelivery::new(&request("u1", "hi")));
        assert_eq!(q.list_pending().len(), 2);
    }

    #[test]
    fn test_remove_pending_is_idempotent() {
        let q = queue();
        let req = request("u1", "hi");
        q.enqueue_pending(PendingDelivery::new(&req));
        assert_eq!(q.remove_pending(&req), 1);
        assert_eq!(q.remove_pending(&req), 0);
        assert!(q.list_pending().is_empty());
    }

    #[test]
    fn test_increment_retries() {
        let q = queue();
        let req = request("u1", "hi");
        q.enqueue_pending(PendingDelivery::new(&req));
        q.increment_retries(&req);
        q.increment_retries(&req);
        assert_eq!(q.list_pending()[0].retries, 2);
    }

    #[test]
    fn test_list_pending_includes_expired() {
        let q = queue();
        let mut stale = PendingDelivery::new(&request("u1", "old"));
        stale.queued_at = Utc::now() - Duration::days(3);
        q.enqueue_pending(stale);
        assert_eq!(q.list_pending().len(), 1);
    }

    #[test]
    fn test_store_local_assigns_id_and_publishes() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        let q = LocalQueue::new(Arc::new(MemoryStore::new()), bus);

        let record = q.store_local_notification(&request("u1", "hi")).unwrap();
        assert!(record.id.is_local());
        assert!(!record.is_read);

        let event = rx.try_recv().unwrap();
        assert_eq!(
            event,
            BusEvent::LocalQueueWrite {
                user_id: UserId::new("u1")
            }
        );
    }

    #[test]
    fn test_user_scoping_with_recipient_alias() {
        let q = queue();
        q.store_local_notification(&request("a", "for a"));
        q.store_local_notification(&request("b", "for b"));

        // Record addressed to A only through the legacy alias.
        let key = keys::local_notifications();
        let mut records = q.read::<LocalNotification>(&key);
        records.push(LocalNotification {
            id: NotificationId::local(),
            user_id: UserId::new("someone-else"),
            recipient_id: Some(UserId::new("a")),
            kind: NotificationKind::System,
            message: "aliased".to_string(),
            reference_id: None,
            is_read: false,
            created_at: Utc::now(),
        });
        q.write(&key, &records);

        let for_a = q.list_local_notifications(&UserId::new("a"));
        assert_eq!(for_a.len(), 2);
        assert!(for_a.iter().all(|r| r.is_for(&UserId::new("a"))));
        assert!(for_a.iter().all(|r| !r.is_for(&UserId::new("b")) || r.is_for(&UserId::new("a"))));

        let for_b = q.list_local_notifications(&UserId::new("b"));
        assert_eq!(for_b.len(), 1);
        assert_eq!(for_b[0].message, "for b");
    }

    #[test]
    fn test_list_local_sorted_descending() {
        let q = queue();
        let key = keys::local_notifications();
        let base = Utc::now();
        let mut records = Vec::new();
        for (i, msg) in ["oldest", "middle", "newest"].iter().enumerate() {
            records.push(LocalNotification {
                id: NotificationId::local(),
                user_id: UserId::new("u1"),
                recipient_id: None,
                kind: NotificationKind::Message,
                message: (*msg).to_string(),
                reference_id: None,
                is_read: false,
                created_at: base + Duration::seconds(i as i64),
            });
        }
        q.write(&key, &records);

        let listed = q.list_local_notifications(&UserId::new("u1"));
        let messages: Vec<_> = listed.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn test_mark_local_read() {
        let q = queue();
        let record = q.store_local_notification(&request("u1", "hi")).unwrap();
        assert!(q.mark_local_read(&record.id));
        assert!(q.list_local_notifications(&UserId::new("u1"))[0].is_read);
        assert!(!q.mark_local_read(&NotificationId::new("local-missing")));
    }

    #[test]
    fn test_mark_all_local_read() {
        let q = queue();
        q.store_local_notification(&request("u1", "one"));
        q.store_local_notification(&request("u1", "two"));
        q.store_local_notification(&request("u2", "other"));

        assert_eq!(q.mark_all_local_read(&UserId::new("u1")), 2);
        assert_eq!(q.mark_all_local_read(&UserId::new("u1")), 0);
        assert!(!q.list_local_notifications(&UserId::new("u2"))[0].is_read);
    }

    #[test]
    fn test_unavailable_storage_degrades_to_noops() {
        let q = LocalQueue::new(Arc::new(UnavailableStore), EventBus::new(8));
        let req = request("u1", "hi");

        q.enqueue_pending(PendingDelivery::new(&req));
        assert!(q.list_pending().is_empty());
        assert_eq!(q.remove_pending(&req), 0);
        assert!(q.store_local_notification(&req).is_none());
        assert!(q.list_local_notifications(&UserId::new("u1")).is_empty());
        assert!(!q.mark_local_read(&NotificationId::new("local-x")));
        assert_eq!(q.mark_all_local_read(&UserId::new("u1")), 0);
    }

    #[test]
    fn test_corrupt_collection_treated_as_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(&keys::pending_deliveries(), "{broken");
        let q = LocalQueue::new(store, EventBus::new(8));
        assert!(q.list_pending().is_empty());
    }
}
