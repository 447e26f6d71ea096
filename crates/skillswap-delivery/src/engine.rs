//! Retry engine over the delivery primitive.
//!
//! Coordinates delivery attempts with the local durable queue so that
//! in-flight sends are recoverable across restarts. The engine does not
//! classify failures: transient and permanent errors are retried
//! identically, bounded by the policy's attempt cap.

use std::sync::Arc;

use chrono::Duration as ChronoDuration;
use tracing::{debug, warn};

use skillswap_core::config::delivery::DeliveryConfig;
use skillswap_entity::{NewNotification, PendingDelivery, RecordOrigin};
use skillswap_queue::LocalQueue;

use crate::retry::RetryPolicy;
use crate::traits::Deliverer;

/// Outcome of one pending-queue sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingReport {
    /// Number of non-expired records processed. Expired records are
    /// skipped and not counted.
    pub processed: usize,
}

/// Drives the delivery primitive with bounded exponential backoff and
/// a recoverable pending log.
#[derive(Debug, Clone)]
pub struct RetryEngine {
    deliverer: Arc<dyn Deliverer>,
    queue: LocalQueue,
    config: DeliveryConfig,
}

impl RetryEngine {
    /// Create an engine over a delivery primitive and queue.
    pub fn new(deliverer: Arc<dyn Deliverer>, queue: LocalQueue, config: DeliveryConfig) -> Self {
        Self {
            deliverer,
            queue,
            config,
        }
    }

    /// The queue this engine records attempts in.
    pub fn queue(&self) -> &LocalQueue {
        &self.queue
    }

    /// The engine's delivery configuration.
    pub fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    /// Deliver with the fresh-send policy.
    pub async fn send(&self, request: &NewNotification) -> bool {
        self.retry_deliver(request, RetryPolicy::fresh(&self.config))
            .await
    }

    /// Attempt delivery up to the policy's cap, sleeping the backoff
    /// delay after every failed attempt.
    ///
    /// A pending record is persisted before the first attempt and
    /// removed on remote success. A local-fallback record does not
    /// count as success: the pending entry stays so a later sweep can
    /// still achieve remote delivery.
    pub async fn retry_deliver(&self, request: &NewNotification, policy: RetryPolicy) -> bool {
        self.queue.enqueue_pending(PendingDelivery::new(request));

        for attempt in 0..policy.max_attempts {
            let outcome = self.deliverer.deliver(request).await;
            match outcome {
                Some(record) if record.origin() == RecordOrigin::Remote => {
                    debug!(
                        user_id = %request.user_id,
                        id = %record.id(),
                        attempt,
                        "Remote delivery confirmed"
                    );
                    self.queue.remove_pending(request);
                    return true;
                }
                _ => {
                    self.queue.increment_retries(request);
                    let delay = policy.delay_for(attempt);
                    debug!(
                        user_id = %request.user_id,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Delivery attempt failed; backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }

        warn!(
            user_id = %request.user_id,
            attempts = policy.max_attempts,
            "Delivery retries exhausted; record left pending"
        );
        false
    }

    /// Re-drive every non-expired pending record.
    ///
    /// For each live record a local notification is written first so
    /// the user sees something even if the remote retry fails again,
    /// then delivery is retried with the reduced reprocess policy.
    /// Safe to call repeatedly: duplicate processing of a still-pending
    /// record is expected, and remote success removes every matching
    /// pending entry.
    pub async fn process_pending(&self) -> PendingReport {
        let ttl = ChronoDuration::hours(self.config.pending_ttl_hours);
        let pending = self.queue.list_pending();
        if pending.is_empty() {
            return PendingReport::default();
        }

        debug!(count = pending.len(), "Reprocessing pending deliveries");
        let mut processed = 0;

        for record in pending {
            if record.is_expired(ttl) {
                debug!(
                    user_id = %record.user_id,
                    queued_at = %record.queued_at,
                    "Skipping expired pending delivery"
                );
                continue;
            }

            let request = record.request();
            self.queue.store_local_notification(&request);
            self.retry_deliver(&request, RetryPolicy::reprocess(&self.config))
                .await;
            processed += 1;
        }

        PendingReport { processed }
    }
}
