//! # skillswap-realtime
//!
//! Keeps the notification view current without client involvement: a
//! server-push change subscription with trailing-edge debouncing, and a
//! polling fallback for when push is unavailable. Both funnel into the
//! same forced-refetch path; neither ever surfaces an error to the
//! caller.

pub mod feed;
pub mod poller;
pub mod subscription;

pub use feed::MemoryChangeFeed;
pub use poller::FeedPoller;
pub use subscription::{SubscriptionManager, SubscriptionState};
