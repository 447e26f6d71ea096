//! Absent-storage backend.

use skillswap_core::traits::storage::DurableStore;

/// Models an environment without durable client storage.
///
/// Reads return nothing and writes report failure, which the queue
/// layer turns into neutral no-op results.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl DurableStore for UnavailableStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> bool {
        false
    }

    fn remove(&self, _key: &str) -> bool {
        false
    }
}
