//! Notification feed cache configuration.

use serde::{Deserialize, Serialize};

/// Freshness and throttle windows for the per-user feed cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Seconds a cached feed entry stays fresh.
    #[serde(default = "default_fresh_for")]
    pub fresh_for_seconds: u64,
    /// Minimum seconds between non-forced network fetches per user.
    #[serde(default = "default_throttle")]
    pub throttle_seconds: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            fresh_for_seconds: default_fresh_for(),
            throttle_seconds: default_throttle(),
        }
    }
}

fn default_fresh_for() -> u64 {
    60
}

fn default_throttle() -> u64 {
    120
}
