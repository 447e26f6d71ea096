//! Polling fallback for the notification view.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{debug, info};

use skillswap_core::config::realtime::RealtimeConfig;
use skillswap_core::traits::refresher::FeedRefresher;
use skillswap_core::types::id::UserId;

/// Periodic forced refetch, independent of push delivery.
///
/// Covers missed push events and failed subscriptions. The interval
/// tightens while the user is in the messaging view, where staleness is
/// most visible. The interval is re-read every tick, so switching takes
/// effect from the next tick.
#[derive(Debug)]
pub struct FeedPoller {
    refresher: Arc<dyn FeedRefresher>,
    base_interval: Duration,
    active_interval: Duration,
    active: AtomicBool,
}

impl FeedPoller {
    /// Create a poller over the given refresher.
    pub fn new(refresher: Arc<dyn FeedRefresher>, config: &RealtimeConfig) -> Self {
        Self {
            refresher,
            base_interval: Duration::from_secs(config.poll_interval_seconds),
            active_interval: Duration::from_secs(config.active_poll_interval_seconds),
            active: AtomicBool::new(false),
        }
    }

    /// Mark whether the user is currently in the messaging view.
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Relaxed);
    }

    fn interval(&self) -> Duration {
        if self.active.load(Ordering::Relaxed) {
            self.active_interval
        } else {
            self.base_interval
        }
    }

    /// Run the polling loop until the cancel signal flips to `true`.
    pub async fn run(&self, user_id: UserId, mut cancel: watch::Receiver<bool>) {
        info!(
            user_id = %user_id,
            interval_seconds = self.base_interval.as_secs(),
            "Feed poller started"
        );

        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        info!("Feed poller received shutdown signal");
                        break;
                    }
                }
                _ = time::sleep(self.interval()) => {
                    debug!(user_id = %user_id, "Polling tick");
                    self.refresher.refresh(&user_id).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;

    #[derive(Debug, Default)]
    struct CountingRefresher {
        refreshes: AtomicUsize,
    }

    #[async_trait]
    impl FeedRefresher for CountingRefresher {
        async fn refresh(&self, _user_id: &UserId) {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn poller(refresher: Arc<CountingRefresher>) -> Arc<FeedPoller> {
        Arc::new(FeedPoller::new(refresher, &RealtimeConfig::default()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_base_interval() {
        let refresher = Arc::new(CountingRefresher::default());
        let poller = poller(refresher.clone());
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn({
            let poller = poller.clone();
            async move { poller.run(UserId::new("u1"), rx).await }
        });

        time::sleep(Duration::from_secs(299)).await;
        assert_eq!(refresher.refreshes.load(Ordering::SeqCst), 0);
        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(refresher.refreshes.load(Ordering::SeqCst), 1);

        tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_active_view_tightens_interval() {
        let refresher = Arc::new(CountingRefresher::default());
        let poller = poller(refresher.clone());
        poller.set_active(true);
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn({
            let poller = poller.clone();
            async move { poller.run(UserId::new("u1"), rx).await }
        });

        time::sleep(Duration::from_secs(21)).await;
        assert_eq!(refresher.refreshes.load(Ordering::SeqCst), 1);
        time::sleep(Duration::from_secs(20)).await;
        assert_eq!(refresher.refreshes.load(Ordering::SeqCst), 2);

        // Leaving the view does not cancel the sleep already in flight:
        // the tick scheduled with the tight interval still lands.
        poller.set_active(false);
        time::sleep(Duration::from_secs(21)).await;
        assert_eq!(refresher.refreshes.load(Ordering::SeqCst), 3);

        // From the next tick on, the wide interval applies.
        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(refresher.refreshes.load(Ordering::SeqCst), 3);

        tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
