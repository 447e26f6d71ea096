//! The delivery client: ordered fallback chain over all channels.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use skillswap_entity::{NewNotification, NotificationRecord};
use skillswap_queue::LocalQueue;

use crate::traits::{Deliverer, NotificationApi, RowStore};

/// Attempts to durably create one notification, trying channels in
/// order until one succeeds: remote API, then direct row-store insert,
/// then local-only storage.
///
/// Each step's failure is logged with enough detail to diagnose but
/// never raised to the caller; the caller receives `None` only when
/// every channel, including local storage, fails.
#[derive(Debug, Clone)]
pub struct DeliveryClient {
    api: Arc<dyn NotificationApi>,
    store: Arc<dyn RowStore>,
    queue: LocalQueue,
}

impl DeliveryClient {
    /// Create a client over the given channels.
    pub fn new(api: Arc<dyn NotificationApi>, store: Arc<dyn RowStore>, queue: LocalQueue) -> Self {
        Self { api, store, queue }
    }

    /// Run the fallback chain for one notification.
    pub async fn deliver(&self, request: &NewNotification) -> Option<NotificationRecord> {
        match self.api.create(request).await {
            Ok(notification) => {
                debug!(user_id = %request.user_id, id = %notification.id, "Delivered via API");
                return Some(NotificationRecord::Remote(notification));
            }
            Err(e) => {
                warn!(user_id = %request.user_id, error = %e, "API create failed; trying direct store write");
            }
        }

        match self.store.insert(request).await {
            Ok(notification) => {
                debug!(user_id = %request.user_id, id = %notification.id, "Delivered via direct store insert");
                return Some(NotificationRecord::Remote(notification));
            }
            Err(e) => {
                warn!(user_id = %request.user_id, error = %e, "Direct store insert failed; storing locally");
            }
        }

        // The queue announces the write on the event bus, so listening
        // views update without a fetch.
        match self.queue.store_local_notification(request) {
            Some(local) => Some(NotificationRecord::Local(local)),
            None => {
                error!(user_id = %request.user_id, "All delivery channels failed, including local storage");
                None
            }
        }
    }
}

#[async_trait]
impl Deliverer for DeliveryClient {
    async fn deliver(&self, request: &NewNotification) -> Option<NotificationRecord> {
        DeliveryClient::deliver(self, request).await
    }
}
