//! # skillswap-delivery
//!
//! Durable notification delivery: an ordered fallback chain over the
//! remote API, the direct row store, and the local queue, wrapped in a
//! bounded-backoff retry engine with a recoverable pending log.

pub mod api;
pub mod client;
pub mod engine;
pub mod retry;
pub mod row_store;
pub mod sweeper;
pub mod traits;

pub use client::DeliveryClient;
pub use engine::{PendingReport, RetryEngine};
pub use retry::RetryPolicy;
pub use sweeper::PendingSweeper;
pub use traits::{Deliverer, NotificationApi, RowStore};
