//! Durable client storage trait.

/// Synchronous key/value storage surviving restarts.
///
/// Values are JSON-serialized collections keyed by well-known strings.
/// Implementations must never panic: an unavailable backend returns
/// `None` from reads and `false` from writes, which the queue layer
/// treats as a degraded no-op environment.
pub trait DurableStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read the raw value stored under a key, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value under a key. Returns `true` on success.
    fn set(&self, key: &str, value: &str) -> bool;

    /// Remove a key. Returns `true` if the key existed and was removed.
    fn remove(&self, key: &str) -> bool;
}
