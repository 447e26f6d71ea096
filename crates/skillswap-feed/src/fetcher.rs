//! The notification fetch pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use skillswap_core::traits::refresher::FeedRefresher;
use skillswap_core::types::id::{NotificationId, UserId};
use skillswap_entity::NotificationRecord;
use skillswap_delivery::traits::{NotificationApi, RowStore};
use skillswap_queue::LocalQueue;

use crate::cache::FeedCache;
use crate::merge;

/// Fetches, merges, and caches a user's notification view.
///
/// Listing prefers the API and falls back to a direct store select;
/// when both fail the view degrades to local records only. Every path
/// returns a list — fetch failures are logged, never surfaced.
#[derive(Debug, Clone)]
pub struct NotificationFetcher {
    api: Arc<dyn NotificationApi>,
    store: Arc<dyn RowStore>,
    queue: LocalQueue,
    cache: Arc<FeedCache>,
}

impl NotificationFetcher {
    /// Create a fetcher over the given channels, queue, and cache.
    pub fn new(
        api: Arc<dyn NotificationApi>,
        store: Arc<dyn RowStore>,
        queue: LocalQueue,
        cache: Arc<FeedCache>,
    ) -> Self {
        Self {
            api,
            store,
            queue,
            cache,
        }
    }

    /// The cache this fetcher populates.
    pub fn cache(&self) -> &FeedCache {
        &self.cache
    }

    /// Produce the user's merged notification view.
    ///
    /// With `force == false` a fresh cache entry is returned as-is, and
    /// a throttled user gets the last cached list (possibly stale)
    /// without a network call. `force == true` always refetches —
    /// callers must force when the user explicitly opens the
    /// notification view.
    pub async fn fetch(&self, user_id: &UserId, force: bool) -> Vec<NotificationRecord> {
        if !force {
            if self.cache.is_valid(user_id) {
                if let Some(items) = self.cache.get(user_id) {
                    debug!(user_id = %user_id, "Serving notifications from cache");
                    return items;
                }
            }
            if self.cache.is_throttled(user_id) {
                debug!(user_id = %user_id, "Fetch throttled; serving last cached list");
                return self.cache.get(user_id).unwrap_or_default();
            }
        }

        self.cache.note_attempt(user_id);
        let remote = self.list_remote(user_id).await;
        let combined = merge::combine(remote, user_id, &self.queue);
        self.cache.set(user_id, combined.clone());
        combined
    }

    async fn list_remote(&self, user_id: &UserId) -> Vec<skillswap_entity::Notification> {
        match self.api.list(user_id).await {
            Ok(remote) => return remote,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "API list failed; trying direct store select");
            }
        }
        match self.store.list_for_user(user_id).await {
            Ok(remote) => remote,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Direct store select failed; using local records only");
                Vec::new()
            }
        }
    }

    /// Mark one notification read, wherever it lives.
    ///
    /// Local ids update the queue; remote ids update the store.
    /// Best-effort — returns `false` when nothing was updated.
    pub async fn mark_read(&self, user_id: &UserId, id: &NotificationId) -> bool {
        let updated = if id.is_local() {
            self.queue.mark_local_read(id)
        } else {
            match self.store.mark_read(id).await {
                Ok(updated) => updated,
                Err(e) => {
                    warn!(id = %id, error = %e, "Remote mark-read failed");
                    false
                }
            }
        };
        if updated {
            self.cache.invalidate(user_id);
        }
        updated
    }

    /// Mark everything read for the user, remote and local.
    /// Returns the number of records updated.
    pub async fn mark_all_read(&self, user_id: &UserId) -> u64 {
        let remote = match self.store.mark_all_read(user_id).await {
            Ok(count) => count,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Remote mark-all-read failed");
                0
            }
        };
        let local = self.queue.mark_all_local_read(user_id) as u64;
        let updated = remote + local;
        if updated > 0 {
            self.cache.invalidate(user_id);
        }
        updated
    }

    /// Unread count for the bell badge, served through the cache.
    pub async fn unread_count(&self, user_id: &UserId) -> usize {
        self.fetch(user_id, false)
            .await
            .iter()
            .filter(|r| !r.is_read())
            .count()
    }
}

#[async_trait]
impl FeedRefresher for NotificationFetcher {
    async fn refresh(&self, user_id: &UserId) {
        let _ = self.fetch(user_id, true).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;
    use skillswap_core::config::feed::FeedConfig;
    use skillswap_core::error::AppError;
    use skillswap_core::events::EventBus;
    use skillswap_core::result::AppResult;
    use skillswap_entity::{NewNotification, Notification, NotificationKind};
    use skillswap_queue::store::MemoryStore;

    #[derive(Debug, Default)]
    struct CountingApi {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl NotificationApi for CountingApi {
        async fn create(&self, _request: &NewNotification) -> AppResult<Notification> {
            Err(AppError::external_service("not under test"))
        }

        async fn list(&self, user_id: &UserId) -> AppResult<Vec<Notification>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::external_service("api down"));
            }
            Ok(vec![Notification {
                id: NotificationId::new("R1"),
                user_id: user_id.clone(),
                kind: NotificationKind::Message,
                message: "remote".to_string(),
                reference_id: None,
                is_read: false,
                created_at: Utc::now(),
            }])
        }
    }

    #[derive(Debug, Default)]
    struct FakeRowStore {
        fail: bool,
        mark_read_hits: AtomicUsize,
    }

    #[async_trait]
    impl RowStore for FakeRowStore {
        async fn insert(&self, _request: &NewNotification) -> AppResult<Notification> {
            Err(AppError::store("not under test"))
        }

        async fn list_for_user(&self, _user_id: &UserId) -> AppResult<Vec<Notification>> {
            if self.fail {
                return Err(AppError::store("store down"));
            }
            Ok(Vec::new())
        }

        async fn mark_read(&self, _id: &NotificationId) -> AppResult<bool> {
            self.mark_read_hits.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }

        async fn mark_all_read(&self, _user_id: &UserId) -> AppResult<u64> {
            Ok(2)
        }
    }

    fn fetcher(api: Arc<CountingApi>, store: Arc<FakeRowStore>) -> NotificationFetcher {
        let queue = LocalQueue::new(Arc::new(MemoryStore::new()), EventBus::new(8));
        let cache = Arc::new(FeedCache::new(&FeedConfig {
            fresh_for_seconds: 60,
            throttle_seconds: 120,
        }));
        NotificationFetcher::new(api, store, queue, cache)
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttling_one_call_per_window_unless_forced() {
        let api = Arc::new(CountingApi::default());
        let fetcher = fetcher(api.clone(), Arc::new(FakeRowStore::default()));
        let user = UserId::new("u1");

        fetcher.fetch(&user, false).await;
        tokio::time::advance(std::time::Duration::from_secs(10)).await;
        fetcher.fetch(&user, false).await;
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);

        // Stale cache but inside the throttle window: still no call.
        fetcher.cache().invalidate(&user);
        tokio::time::advance(std::time::Duration::from_secs(60)).await;
        fetcher.fetch(&user, false).await;
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);

        fetcher.fetch(&user, true).await;
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_degrades_to_local_only_when_both_channels_fail() {
        let api = Arc::new(CountingApi {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let store = Arc::new(FakeRowStore {
            fail: true,
            mark_read_hits: AtomicUsize::new(0),
        });
        let queue = LocalQueue::new(Arc::new(MemoryStore::new()), EventBus::new(8));
        queue.store_local_notification(&NewNotification::new(
            "u1",
            NotificationKind::Message,
            "offline echo",
        ));
        let cache = Arc::new(FeedCache::new(&FeedConfig::default()));
        let fetcher = NotificationFetcher::new(api, store, queue, cache);

        let view = fetcher.fetch(&UserId::new("u1"), true).await;
        assert_eq!(view.len(), 1);
        assert!(view[0].id().is_local());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mark_read_routes_by_id_namespace() {
        let api = Arc::new(CountingApi::default());
        let store = Arc::new(FakeRowStore::default());
        let queue = LocalQueue::new(Arc::new(MemoryStore::new()), EventBus::new(8));
        let local = queue
            .store_local_notification(&NewNotification::new(
                "u1",
                NotificationKind::Message,
                "hi",
            ))
            .unwrap();
        let cache = Arc::new(FeedCache::new(&FeedConfig::default()));
        let fetcher = NotificationFetcher::new(api, store.clone(), queue.clone(), cache);
        let user = UserId::new("u1");

        assert!(fetcher.mark_read(&user, &local.id).await);
        assert_eq!(store.mark_read_hits.load(Ordering::SeqCst), 0);
        assert!(queue.list_local_notifications(&user)[0].is_read);

        assert!(fetcher.mark_read(&user, &NotificationId::new("R1")).await);
        assert_eq!(store.mark_read_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mark_all_read_counts_remote_and_local() {
        let api = Arc::new(CountingApi::default());
        let store = Arc::new(FakeRowStore::default());
        let queue = LocalQueue::new(Arc::new(MemoryStore::new()), EventBus::new(8));
        queue.store_local_notification(&NewNotification::new(
            "u1",
            NotificationKind::Message,
            "hi",
        ));
        let cache = Arc::new(FeedCache::new(&FeedConfig::default()));
        let fetcher = NotificationFetcher::new(api, store, queue, cache);

        // 2 remote (fake) + 1 local.
        assert_eq!(fetcher.mark_all_read(&UserId::new("u1")).await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unread_count() {
        let api = Arc::new(CountingApi::default());
        let fetcher = fetcher(api, Arc::new(FakeRowStore::default()));
        assert_eq!(fetcher.unread_count(&UserId::new("u1")).await, 1);
    }
}
