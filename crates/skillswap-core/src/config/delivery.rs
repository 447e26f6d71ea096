//! Delivery retry and pending-queue configuration.

use serde::{Deserialize, Serialize};

/// Retry and pending-queue settings for notification delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Maximum attempts for a fresh send.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Maximum attempts when re-driving a pending record.
    #[serde(default = "default_reprocess_retries")]
    pub reprocess_retries: u32,
    /// Initial backoff delay in milliseconds; doubles after each failure.
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,
    /// Hours after which a pending record is considered expired.
    #[serde(default = "default_pending_ttl")]
    pub pending_ttl_hours: i64,
    /// Interval between pending-queue sweeps in seconds.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            reprocess_retries: default_reprocess_retries(),
            initial_delay_ms: default_initial_delay(),
            pending_ttl_hours: default_pending_ttl(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_reprocess_retries() -> u32 {
    2
}

fn default_initial_delay() -> u64 {
    1000
}

fn default_pending_ttl() -> i64 {
    24
}

fn default_sweep_interval() -> u64 {
    60
}
