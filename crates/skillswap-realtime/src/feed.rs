//! In-process change feed.

use dashmap::DashMap;
use tokio::sync::broadcast;

use async_trait::async_trait;
use skillswap_core::result::AppResult;
use skillswap_core::traits::feed::{ChangeEvent, ChangeFeed};
use skillswap_core::types::id::UserId;

/// Per-user broadcast channels implementing [`ChangeFeed`].
///
/// The production deployment subscribes to the remote store's push
/// channel; this implementation serves tests and single-process setups
/// where change events originate locally. Channels are created lazily
/// on first subscribe and kept for the feed's lifetime.
#[derive(Debug)]
pub struct MemoryChangeFeed {
    channels: DashMap<UserId, broadcast::Sender<ChangeEvent>>,
    buffer_size: usize,
}

impl MemoryChangeFeed {
    /// Create a feed whose per-user channels buffer `buffer_size` events.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            channels: DashMap::new(),
            buffer_size,
        }
    }

    fn sender(&self, user_id: &UserId) -> broadcast::Sender<ChangeEvent> {
        self.channels
            .entry(user_id.clone())
            .or_insert_with(|| broadcast::channel(self.buffer_size).0)
            .clone()
    }

    /// Announce that the user's notification rows changed.
    ///
    /// Dropped silently when nobody is subscribed.
    pub fn publish(&self, user_id: &UserId) {
        let _ = self.sender(user_id).send(ChangeEvent {
            user_id: user_id.clone(),
        });
    }

    /// Number of live subscribers for one user's channel.
    pub fn subscriber_count(&self, user_id: &UserId) -> usize {
        self.channels
            .get(user_id)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for MemoryChangeFeed {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl ChangeFeed for MemoryChangeFeed {
    async fn subscribe(&self, user_id: &UserId) -> AppResult<broadcast::Receiver<ChangeEvent>> {
        Ok(self.sender(user_id).subscribe())
    }
}
