//! Durable storage key builders.
//!
//! Centralising key construction prevents typos and makes it easy to
//! find every key the subsystem writes.

/// Prefix applied to all durable storage keys.
const PREFIX: &str = "skillswap";

/// Key holding the array of pending delivery records.
pub fn pending_deliveries() -> String {
    format!("{PREFIX}:pending_deliveries")
}

/// Key holding the array of local notifications.
pub fn local_notifications() -> String {
    format!("{PREFIX}:local_notifications")
}

/// Key caching the current user's id between sessions.
pub fn current_user() -> String {
    format!("{PREFIX}:current_user")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_namespaced() {
        assert_eq!(pending_deliveries(), "skillswap:pending_deliveries");
        assert_eq!(local_notifications(), "skillswap:local_notifications");
        assert_eq!(current_user(), "skillswap:current_user");
    }
}
