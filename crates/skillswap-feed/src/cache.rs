//! Per-user feed cache with freshness and throttle windows.

use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;

use skillswap_core::config::feed::FeedConfig;
use skillswap_core::types::id::UserId;
use skillswap_entity::NotificationRecord;

#[derive(Debug, Clone)]
struct CacheEntry {
    items: Vec<NotificationRecord>,
    fetched_at: Instant,
}

/// In-memory cache of each user's last merged notification list.
///
/// Two independent windows govern it: a freshness window after which a
/// cached entry no longer counts as valid, and a throttle window that
/// bounds how often non-forced fetches may hit the network even when
/// the cache is stale. Forced fetches bypass both. Last write wins
/// across concurrent refreshes; the view is eventually consistent.
#[derive(Debug)]
pub struct FeedCache {
    fresh_for: Duration,
    throttle: Duration,
    entries: DashMap<UserId, CacheEntry>,
    last_attempt: DashMap<UserId, Instant>,
}

impl FeedCache {
    /// Create a cache from configuration.
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            fresh_for: Duration::from_secs(config.fresh_for_seconds),
            throttle: Duration::from_secs(config.throttle_seconds),
            entries: DashMap::new(),
            last_attempt: DashMap::new(),
        }
    }

    /// Whether a fresh entry exists for the user.
    pub fn is_valid(&self, user_id: &UserId) -> bool {
        self.entries
            .get(user_id)
            .map(|entry| entry.fetched_at.elapsed() < self.fresh_for)
            .unwrap_or(false)
    }

    /// The cached list, fresh or stale.
    pub fn get(&self, user_id: &UserId) -> Option<Vec<NotificationRecord>> {
        self.entries.get(user_id).map(|entry| entry.items.clone())
    }

    /// Store a merged list, replacing any prior entry.
    pub fn set(&self, user_id: &UserId, items: Vec<NotificationRecord>) {
        self.entries.insert(
            user_id.clone(),
            CacheEntry {
                items,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drop the user's entry so the next fetch goes to the network.
    pub fn invalidate(&self, user_id: &UserId) {
        self.entries.remove(user_id);
    }

    /// Whether a non-forced fetch attempt is still inside the throttle
    /// window.
    pub fn is_throttled(&self, user_id: &UserId) -> bool {
        self.last_attempt
            .get(user_id)
            .map(|at| at.elapsed() < self.throttle)
            .unwrap_or(false)
    }

    /// Record that a network fetch is being attempted now.
    pub fn note_attempt(&self, user_id: &UserId) {
        self.last_attempt.insert(user_id.clone(), Instant::now());
    }
}
