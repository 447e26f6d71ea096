//! Feed refresh seam.

use async_trait::async_trait;

use crate::types::id::UserId;

/// Something that can force-refresh a user's notification view.
///
/// The realtime subscription manager and the polling fallback both
/// drive refreshes through this seam rather than depending on the
/// fetch pipeline directly. Refreshes are best-effort and never fail.
#[async_trait]
pub trait FeedRefresher: Send + Sync + std::fmt::Debug + 'static {
    /// Refetch the user's notifications, bypassing the cache.
    async fn refresh(&self, user_id: &UserId);
}
