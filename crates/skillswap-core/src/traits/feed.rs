//! Realtime change-feed trait.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::result::AppResult;
use crate::types::id::UserId;

/// A change event observed on the remote notification table.
///
/// The payload is deliberately minimal: receipt of an event only means
/// "this user's rows changed, refetch", never carries row data itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The user whose notification rows changed.
    pub user_id: UserId,
}

/// Server-push change subscription filtered to one user's rows.
#[async_trait]
pub trait ChangeFeed: Send + Sync + std::fmt::Debug + 'static {
    /// Subscribe to change events for one user's notification rows.
    ///
    /// Dropping the receiver unsubscribes.
    async fn subscribe(&self, user_id: &UserId) -> AppResult<broadcast::Receiver<ChangeEvent>>;
}
