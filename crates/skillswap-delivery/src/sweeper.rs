//! Background pending-queue sweeper.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{debug, info};

use crate::engine::{PendingReport, RetryEngine};

/// Periodically re-drives pending deliveries, and on demand when the
/// network comes back.
///
/// Runs until the cancel signal is received. Each tick checks whether
/// any pending records exist before doing work, so an empty queue
/// costs nothing.
#[derive(Debug)]
pub struct PendingSweeper {
    engine: Arc<RetryEngine>,
    interval: Duration,
}

impl PendingSweeper {
    /// Create a sweeper over the given engine.
    pub fn new(engine: Arc<RetryEngine>) -> Self {
        let interval = Duration::from_secs(engine.config().sweep_interval_seconds);
        Self { engine, interval }
    }

    /// Run the sweep loop until the cancel signal flips to `true`.
    ///
    /// A sweep also runs immediately at startup to recover records
    /// persisted before the last shutdown.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        info!(
            interval_seconds = self.interval.as_secs(),
            "Pending sweeper started"
        );

        let report = self.engine.process_pending().await;
        if report.processed > 0 {
            debug!(processed = report.processed, "Startup sweep complete");
        }

        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        info!("Pending sweeper received shutdown signal");
                        break;
                    }
                }
                _ = time::sleep(self.interval) => {
                    if self.engine.queue().list_pending().is_empty() {
                        continue;
                    }
                    let report = self.engine.process_pending().await;
                    debug!(processed = report.processed, "Periodic sweep complete");
                }
            }
        }
    }

    /// Entry point for network-restoration events: sweep immediately.
    pub async fn on_network_restored(&self) -> PendingReport {
        info!("Network restored; sweeping pending deliveries");
        self.engine.process_pending().await
    }
}
