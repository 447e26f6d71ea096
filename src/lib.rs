//! # skillswap-notify
//!
//! Realtime messaging and notification delivery for SkillSwap: durable
//! local queueing, a three-channel delivery fallback chain, bounded
//! retries with background recovery, a merged remote/local notification
//! view, and push-with-polling-fallback freshness.
//!
//! [`NotificationCenter`] wires the whole subsystem together from an
//! [`AppConfig`] and the injected collaborator trait objects. No
//! operation on it panics or returns an error; failures degrade to
//! neutral values and are reported through tracing.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use skillswap_core::config::logging::LoggingConfig;
use skillswap_core::traits::feed::ChangeFeed;
use skillswap_core::traits::identity::IdentityProvider;
use skillswap_core::traits::refresher::FeedRefresher;
use skillswap_delivery::traits::{NotificationApi, RowStore};
use skillswap_delivery::{DeliveryClient, PendingReport, PendingSweeper, RetryEngine};
use skillswap_feed::{FeedCache, NotificationFetcher};
use skillswap_realtime::{FeedPoller, SubscriptionManager};

pub use skillswap_core::config::AppConfig;
pub use skillswap_core::events::{BusEvent, EventBus};
pub use skillswap_core::types::id::{NotificationId, UserId};
pub use skillswap_core::{AppError, AppResult};
pub use skillswap_delivery::api::HttpNotificationApi;
pub use skillswap_delivery::row_store::HttpRowStore;
pub use skillswap_entity::{
    NewNotification, Notification, NotificationKind, NotificationRecord, RecordOrigin,
};
pub use skillswap_queue::{CachingIdentity, LocalQueue};
pub use skillswap_realtime::{MemoryChangeFeed, SubscriptionState};

/// The assembled notification subsystem.
pub struct NotificationCenter {
    identity: CachingIdentity,
    bus: EventBus,
    engine: Arc<RetryEngine>,
    sweeper: Arc<PendingSweeper>,
    fetcher: Arc<NotificationFetcher>,
    subscription: SubscriptionManager,
    poller: Arc<FeedPoller>,
    shutdown: watch::Sender<bool>,
    background: Mutex<Vec<JoinHandle<()>>>,
}

impl NotificationCenter {
    /// Assemble the subsystem from configuration and collaborators.
    ///
    /// Fails only on configuration problems (unknown storage backend).
    pub fn new(
        config: &AppConfig,
        api: Arc<dyn NotificationApi>,
        row_store: Arc<dyn RowStore>,
        feed: Arc<dyn ChangeFeed>,
        identity: Arc<dyn IdentityProvider>,
    ) -> AppResult<Self> {
        let store = skillswap_queue::store::from_config(&config.storage)?;
        let bus = EventBus::new(config.realtime.channel_buffer_size);
        let queue = LocalQueue::new(Arc::clone(&store), bus.clone());
        let identity = CachingIdentity::new(identity, store);

        let client = DeliveryClient::new(Arc::clone(&api), Arc::clone(&row_store), queue.clone());
        let engine = Arc::new(RetryEngine::new(
            Arc::new(client),
            queue.clone(),
            config.delivery.clone(),
        ));
        let sweeper = Arc::new(PendingSweeper::new(Arc::clone(&engine)));

        let cache = Arc::new(FeedCache::new(&config.feed));
        let fetcher = Arc::new(NotificationFetcher::new(api, row_store, queue, cache));

        let subscription = SubscriptionManager::new(
            feed,
            bus.clone(),
            Arc::clone(&fetcher) as Arc<dyn FeedRefresher>,
            &config.realtime,
        );
        let poller = Arc::new(FeedPoller::new(
            Arc::clone(&fetcher) as Arc<dyn FeedRefresher>,
            &config.realtime,
        ));

        let (shutdown, _) = watch::channel(false);

        Ok(Self {
            identity,
            bus,
            engine,
            sweeper,
            fetcher,
            subscription,
            poller,
            shutdown,
            background: Mutex::new(Vec::new()),
        })
    }

    /// Assemble against the configured HTTP API and row store, with an
    /// in-process change feed.
    pub fn connect(config: &AppConfig, identity: Arc<dyn IdentityProvider>) -> AppResult<Self> {
        let api = Arc::new(HttpNotificationApi::new(&config.api)?);
        let row_store = Arc::new(HttpRowStore::new(&config.store)?);
        let feed = Arc::new(MemoryChangeFeed::new(config.realtime.channel_buffer_size));
        Self::new(config, api, row_store, feed, identity)
    }

    /// The in-process event bus.
    ///
    /// Hosts publish [`BusEvent::MessageReceived`] and
    /// [`BusEvent::NotificationStored`] here; while realtime is running
    /// they trigger the same debounced refetch path as push events.
    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    fn current_user(&self) -> Option<UserId> {
        let user = self.identity.current_user();
        if user.is_none() {
            warn!("No current user; operation is a no-op");
        }
        user
    }

    /// Send a notification through the retried fallback chain.
    ///
    /// Returns `true` once the notification reached a remote channel.
    /// `false` means it is persisted locally (pending and visible as a
    /// local record) and will be re-driven by the sweeper.
    pub async fn send(
        &self,
        user_id: impl Into<UserId>,
        kind: NotificationKind,
        message: impl Into<String>,
        reference_id: Option<String>,
    ) -> bool {
        let mut request = NewNotification::new(user_id, kind, message);
        request.reference_id = reference_id;
        self.engine.send(&request).await
    }

    /// The current user's merged notification view, newest first.
    ///
    /// Pass `force` when the user explicitly opens the notification
    /// view; otherwise the cache and throttle windows apply.
    pub async fn notifications(&self, force: bool) -> Vec<NotificationRecord> {
        match self.current_user() {
            Some(user_id) => self.fetcher.fetch(&user_id, force).await,
            None => Vec::new(),
        }
    }

    /// Number of unread notifications for the current user.
    pub async fn unread_count(&self) -> usize {
        match self.current_user() {
            Some(user_id) => self.fetcher.unread_count(&user_id).await,
            None => 0,
        }
    }

    /// Mark one notification read. Returns `true` if a record changed.
    pub async fn mark_read(&self, id: &NotificationId) -> bool {
        match self.current_user() {
            Some(user_id) => self.fetcher.mark_read(&user_id, id).await,
            None => false,
        }
    }

    /// Mark all of the current user's notifications read. Returns the
    /// number of records updated.
    pub async fn mark_all_read(&self) -> u64 {
        match self.current_user() {
            Some(user_id) => self.fetcher.mark_all_read(&user_id).await,
            None => 0,
        }
    }

    /// Start the background machinery for the current user: the push
    /// subscription, the polling fallback, and the pending sweeper.
    ///
    /// No-op when no user is signed in.
    pub async fn start_realtime(&self) {
        let Some(user_id) = self.current_user() else {
            return;
        };
        info!(user_id = %user_id, "Starting realtime notification machinery");

        self.subscription.start(user_id.clone()).await;

        let sweeper = Arc::clone(&self.sweeper);
        let sweep_cancel = self.shutdown.subscribe();
        let poller = Arc::clone(&self.poller);
        let poll_cancel = self.shutdown.subscribe();

        let mut background = self.background.lock().unwrap_or_else(|e| e.into_inner());
        background.push(tokio::spawn(
            async move { sweeper.run(sweep_cancel).await },
        ));
        background.push(tokio::spawn(async move {
            poller.run(user_id, poll_cancel).await
        }));
    }

    /// Mark whether the user is in the messaging view, tightening the
    /// polling interval while they are.
    pub fn set_messaging_active(&self, active: bool) {
        self.poller.set_active(active);
    }

    /// Re-drive pending deliveries immediately, e.g. when connectivity
    /// returns.
    pub async fn on_network_restored(&self) -> PendingReport {
        self.sweeper.on_network_restored().await
    }

    /// Stop the subscription and all background tasks. Idempotent.
    pub async fn shutdown(&self) {
        info!("Shutting down notification machinery");
        self.subscription.stop().await;
        let _ = self.shutdown.send(true);
        let handles = {
            let mut background = self.background.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *background)
        };
        for handle in handles {
            let _ = handle.await;
        }
    }
}

/// Initialize tracing from logging configuration.
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}
