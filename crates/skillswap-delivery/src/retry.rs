//! Reusable retry policy.

use std::time::Duration;

use skillswap_core::config::delivery::DeliveryConfig;

/// Bounded exponential backoff policy, zero jitter.
///
/// Separated from the retry engine so attempt counts and delay
/// sequences are testable without any delivery machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts.
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles per attempt.
    pub initial_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy.
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
        }
    }

    /// Policy for fresh sends.
    pub fn fresh(config: &DeliveryConfig) -> Self {
        Self::new(
            config.max_retries,
            Duration::from_millis(config.initial_delay_ms),
        )
    }

    /// Reduced policy for re-driving pending records.
    pub fn reprocess(config: &DeliveryConfig) -> Self {
        Self::new(
            config.reprocess_retries,
            Duration::from_millis(config.initial_delay_ms),
        )
    }

    /// Backoff delay after the given zero-based attempt index.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_delay * 2u32.saturating_pow(attempt)
    }

    /// The full delay sequence this policy produces.
    pub fn delays(&self) -> Vec<Duration> {
        (0..self.max_attempts).map(|a| self.delay_for(a)).collect()
    }
}
