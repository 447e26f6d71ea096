//! Realtime subscription and polling-fallback configuration.

use serde::{Deserialize, Serialize};

/// Realtime change-subscription settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Debounce window for bursty push events, in milliseconds.
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
    /// Polling fallback interval in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Polling interval while the user is in the messaging view, in seconds.
    #[serde(default = "default_active_poll_interval")]
    pub active_poll_interval_seconds: u64,
    /// Buffer size for internal broadcast channels.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce(),
            poll_interval_seconds: default_poll_interval(),
            active_poll_interval_seconds: default_active_poll_interval(),
            channel_buffer_size: default_channel_buffer(),
        }
    }
}

fn default_debounce() -> u64 {
    1000
}

fn default_poll_interval() -> u64 {
    300
}

fn default_active_poll_interval() -> u64 {
    20
}

fn default_channel_buffer() -> usize {
    256
}
