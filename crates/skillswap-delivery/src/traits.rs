//! Delivery channel traits.

use async_trait::async_trait;

use skillswap_core::result::AppResult;
use skillswap_core::types::id::{NotificationId, UserId};
use skillswap_entity::{NewNotification, Notification, NotificationRecord};

/// The remote notification API (primary channel).
#[async_trait]
pub trait NotificationApi: Send + Sync + std::fmt::Debug + 'static {
    /// Create a notification; returns the store-assigned record.
    async fn create(&self, request: &NewNotification) -> AppResult<Notification>;

    /// List a user's notifications, newest first.
    async fn list(&self, user_id: &UserId) -> AppResult<Vec<Notification>>;
}

/// Direct access to the hosted notifications table, bypassing the API
/// (secondary channel).
#[async_trait]
pub trait RowStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a notification row; returns the stored record.
    async fn insert(&self, request: &NewNotification) -> AppResult<Notification>;

    /// Select a user's notification rows, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> AppResult<Vec<Notification>>;

    /// Mark one row read. Returns `true` if a row was updated.
    async fn mark_read(&self, id: &NotificationId) -> AppResult<bool>;

    /// Mark all of a user's unread rows read. Returns the update count.
    async fn mark_all_read(&self, user_id: &UserId) -> AppResult<u64>;
}

/// The delivery primitive the retry engine drives.
///
/// Returns the persisted record on any success (including a local
/// fallback) and `None` when every channel failed. The engine inspects
/// the record's origin to decide whether remote delivery was achieved.
#[async_trait]
pub trait Deliverer: Send + Sync + std::fmt::Debug + 'static {
    /// Attempt to persist one notification.
    async fn deliver(&self, request: &NewNotification) -> Option<NotificationRecord>;
}
