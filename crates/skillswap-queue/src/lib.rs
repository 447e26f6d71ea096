//! # skillswap-queue
//!
//! The Local Durable Queue: a client-side persisted log of
//! notification-send attempts and locally synthesized notification
//! records, surviving restarts and network loss. Every operation is
//! best-effort — a storage failure never propagates to the caller.

pub mod identity;
pub mod keys;
pub mod queue;
pub mod store;

pub use identity::CachingIdentity;
pub use queue::LocalQueue;
