//! Remote/local merge with id-based deduplication.
//!
//! Deduplication is by id only, never by content. A local record
//! synthesized for an event that later succeeds remotely under a
//! server-assigned id is not recognized as a duplicate and will appear
//! twice. This is a known double-count risk, kept because correctness
//! elsewhere depends on callers not re-synthesizing local records for
//! events that already succeeded remotely.

use std::collections::HashSet;

use skillswap_core::types::id::UserId;
use skillswap_entity::{Notification, NotificationRecord, RecordOrigin};
use skillswap_queue::LocalQueue;

/// Combine a remote fetch result with the user's local records into one
/// ordered view, newest first. Remote wins ties and exact id matches.
pub fn combine(
    remote: Vec<Notification>,
    user_id: &UserId,
    queue: &LocalQueue,
) -> Vec<NotificationRecord> {
    let remote_ids: HashSet<String> = remote.iter().map(|n| n.id.as_str().to_string()).collect();

    let locals = queue
        .list_local_notifications(user_id)
        .into_iter()
        .filter(|l| !remote_ids.contains(l.id.as_str()));

    let mut records: Vec<NotificationRecord> = remote
        .into_iter()
        .map(NotificationRecord::Remote)
        .chain(locals.map(NotificationRecord::Local))
        .collect();

    records.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| origin_rank(a).cmp(&origin_rank(b)))
    });
    records
}

fn origin_rank(record: &NotificationRecord) -> u8 {
    match record.origin() {
        RecordOrigin::Remote => 0,
        RecordOrigin::Local => 1,
    }
}
