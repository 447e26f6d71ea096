//! # skillswap-feed
//!
//! Produces the merged, deduplicated notification view: a per-user
//! time-bounded cache, the remote/local merge engine, and the fetch
//! pipeline that ties them to the delivery channels.

pub mod cache;
pub mod fetcher;
pub mod merge;

pub use cache::FeedCache;
pub use fetcher::NotificationFetcher;
