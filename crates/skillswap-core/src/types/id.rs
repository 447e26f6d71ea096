//! Newtype wrappers for domain entity identifiers.
//!
//! Identifiers are opaque strings assigned by external systems (the
//! identity provider for users, the hosted store for notifications).
//! Locally synthesized notification ids carry the `local-` namespace
//! prefix so they can never collide with, nor be mistaken for, a
//! store-assigned id.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a newtype wrapper around an opaque string id.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from an existing opaque string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Return the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner string value.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

define_id!(
    /// Unique identifier for a user.
    UserId
);

define_id!(
    /// Unique identifier for a notification.
    NotificationId
);

/// Namespace prefix for locally synthesized notification ids.
pub const LOCAL_ID_PREFIX: &str = "local-";

impl NotificationId {
    /// Generate a fresh local-namespaced identifier.
    ///
    /// The millisecond timestamp keeps ids roughly ordered; the UUID
    /// suffix makes collisions within one millisecond impossible.
    pub fn local() -> Self {
        Self(format!(
            "{}{}-{}",
            LOCAL_ID_PREFIX,
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple()
        ))
    }

    /// Whether this id was synthesized locally rather than assigned
    /// by the store.
    pub fn is_local(&self) -> bool {
        self.0.starts_with(LOCAL_ID_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_id_prefix() {
        let id = NotificationId::local();
        assert!(id.is_local());
        assert!(id.as_str().starts_with("local-"));
    }

    #[test]
    fn test_remote_id_is_not_local() {
        let id = NotificationId::new("f3d9c2aa-1");
        assert!(!id.is_local());
    }

    #[test]
    fn test_local_ids_are_unique() {
        let a = NotificationId::local();
        let b = NotificationId::local();
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde_transparent() {
        let user = UserId::new("u1");
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, "\"u1\"");
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
