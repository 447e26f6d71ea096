//! Push subscription with trailing-edge debouncing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info, warn};

use skillswap_core::config::realtime::RealtimeConfig;
use skillswap_core::events::{BusEvent, EventBus};
use skillswap_core::traits::feed::{ChangeEvent, ChangeFeed};
use skillswap_core::traits::refresher::FeedRefresher;
use skillswap_core::types::id::UserId;

/// Lifecycle of a realtime subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    /// No subscription is active.
    Unsubscribed,
    /// `start` was called; the change-feed subscription is being set up.
    Subscribing,
    /// Listening for change events.
    Subscribed,
    /// A burst is in flight; the refresh fires when the window closes.
    Debouncing,
}

/// Merges server-push change events and in-process bus events into
/// debounced forced refetches.
///
/// Every observed event starts or resets the debounce window; when the
/// window closes without a new event, exactly one refresh runs for the
/// whole burst. A failed change-feed subscription is logged and the
/// manager runs on bus events alone, with the polling fallback covering
/// remote changes.
#[derive(Debug)]
pub struct SubscriptionManager {
    feed: Arc<dyn ChangeFeed>,
    bus: EventBus,
    refresher: Arc<dyn FeedRefresher>,
    debounce: Duration,
    state: Arc<Mutex<SubscriptionState>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl SubscriptionManager {
    /// Create a manager over the given feed, bus, and refresher.
    pub fn new(
        feed: Arc<dyn ChangeFeed>,
        bus: EventBus,
        refresher: Arc<dyn FeedRefresher>,
        config: &RealtimeConfig,
    ) -> Self {
        Self {
            feed,
            bus,
            refresher,
            debounce: Duration::from_millis(config.debounce_ms),
            state: Arc::new(Mutex::new(SubscriptionState::Unsubscribed)),
            task: Mutex::new(None),
        }
    }

    /// The current subscription state.
    pub fn state(&self) -> SubscriptionState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(state: &Mutex<SubscriptionState>, next: SubscriptionState) {
        *state.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }

    /// Start listening for changes to one user's notifications.
    ///
    /// Restarting for a new user tears down the previous subscription
    /// first.
    pub async fn start(&self, user_id: UserId) {
        self.stop().await;
        Self::set_state(&self.state, SubscriptionState::Subscribing);
        info!(user_id = %user_id, "Starting realtime subscription");

        // Subscribe the bus before spawning so no event published after
        // `start` returns can be missed.
        let bus_rx = self.bus.subscribe();
        let feed = Arc::clone(&self.feed);
        let refresher = Arc::clone(&self.refresher);
        let state = Arc::clone(&self.state);
        let debounce = self.debounce;

        let handle = tokio::spawn(async move {
            Self::run(feed, bus_rx, refresher, state, debounce, user_id).await;
        });

        let mut task = self.task.lock().unwrap_or_else(|e| e.into_inner());
        *task = Some(handle);
    }

    /// Tear the subscription down and return to `Unsubscribed`.
    ///
    /// Idempotent. Awaits task shutdown, so no receiver outlives this
    /// call.
    pub async fn stop(&self) {
        let handle = {
            let mut task = self.task.lock().unwrap_or_else(|e| e.into_inner());
            task.take()
        };
        if let Some(handle) = handle {
            handle.abort();
            let _ = handle.await;
            debug!("Realtime subscription stopped");
        }
        Self::set_state(&self.state, SubscriptionState::Unsubscribed);
    }

    async fn run(
        feed: Arc<dyn ChangeFeed>,
        mut bus_rx: Receiver<BusEvent>,
        refresher: Arc<dyn FeedRefresher>,
        state: Arc<Mutex<SubscriptionState>>,
        debounce: Duration,
        user_id: UserId,
    ) {
        // On subscription failure an inert stand-in channel is used; the
        // guard keeps it open so the loop sees no spurious closes.
        let (mut push_rx, _push_guard) = match feed.subscribe(&user_id).await {
            Ok(rx) => (rx, None),
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    error = %e,
                    "Change-feed subscription failed; remote changes covered by polling"
                );
                let (tx, rx) = tokio::sync::broadcast::channel(1);
                (rx, Some(tx))
            }
        };
        Self::set_state(&state, SubscriptionState::Subscribed);

        let mut push_closed = false;
        let mut bus_closed = false;

        loop {
            if !Self::next_event(
                &mut push_rx,
                &mut push_closed,
                &mut bus_rx,
                &mut bus_closed,
                &user_id,
            )
            .await
            {
                break;
            }

            Self::set_state(&state, SubscriptionState::Debouncing);
            loop {
                tokio::select! {
                    _ = time::sleep(debounce) => break,
                    open = Self::next_event(
                        &mut push_rx,
                        &mut push_closed,
                        &mut bus_rx,
                        &mut bus_closed,
                        &user_id,
                    ) => {
                        // A new event restarts the window; a close ends
                        // the burst early.
                        if !open {
                            break;
                        }
                    }
                }
            }

            debug!(user_id = %user_id, "Debounce window closed; refreshing");
            refresher.refresh(&user_id).await;
            Self::set_state(&state, SubscriptionState::Subscribed);

            if push_closed && bus_closed {
                break;
            }
        }

        warn!(user_id = %user_id, "All change sources closed; subscription ending");
        Self::set_state(&state, SubscriptionState::Unsubscribed);
    }

    /// Wait for the next event addressed to `user_id` on either source.
    ///
    /// Returns `false` once both sources have closed.
    async fn next_event(
        push_rx: &mut Receiver<ChangeEvent>,
        push_closed: &mut bool,
        bus_rx: &mut Receiver<BusEvent>,
        bus_closed: &mut bool,
        user_id: &UserId,
    ) -> bool {
        loop {
            if *push_closed && *bus_closed {
                return false;
            }
            tokio::select! {
                result = push_rx.recv(), if !*push_closed => match result {
                    // Lagging means events were missed; treat as one.
                    Ok(_) | Err(RecvError::Lagged(_)) => return true,
                    Err(RecvError::Closed) => *push_closed = true,
                },
                result = bus_rx.recv(), if !*bus_closed => match result {
                    Ok(event) if event.user_id() == user_id => return true,
                    Ok(_) => {}
                    Err(RecvError::Lagged(_)) => return true,
                    Err(RecvError::Closed) => *bus_closed = true,
                },
            }
        }
    }
}
