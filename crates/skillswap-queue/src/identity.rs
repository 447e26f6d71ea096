//! Identity caching decorator.

use std::sync::Arc;

use tracing::debug;

use skillswap_core::traits::identity::IdentityProvider;
use skillswap_core::traits::storage::DurableStore;
use skillswap_core::types::id::UserId;

use crate::keys;

/// Wraps an identity provider and remembers the last-seen user id in
/// durable storage under a well-known key, avoiding repeated lookups
/// and surviving restarts while the provider is still warming up.
#[derive(Debug)]
pub struct CachingIdentity {
    inner: Arc<dyn IdentityProvider>,
    store: Arc<dyn DurableStore>,
}

impl CachingIdentity {
    /// Wrap a provider with durable caching.
    pub fn new(inner: Arc<dyn IdentityProvider>, store: Arc<dyn DurableStore>) -> Self {
        Self { inner, store }
    }

    /// The cached id, if one was persisted.
    pub fn cached_user(&self) -> Option<UserId> {
        self.store.get(&keys::current_user()).map(UserId::new)
    }

    /// Forget the persisted id (e.g. on sign-out).
    pub fn clear(&self) {
        self.store.remove(&keys::current_user());
    }
}

impl IdentityProvider for CachingIdentity {
    fn current_user(&self) -> Option<UserId> {
        if let Some(user_id) = self.inner.current_user() {
            if self.cached_user().as_ref() != Some(&user_id) {
                debug!(user_id = %user_id, "Caching current user id");
                self.store.set(&keys::current_user(), user_id.as_str());
            }
            return Some(user_id);
        }
        self.cached_user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::store::MemoryStore;

    #[derive(Debug, Default)]
    struct FakeIdentity {
        user: Mutex<Option<UserId>>,
    }

    impl IdentityProvider for FakeIdentity {
        fn current_user(&self) -> Option<UserId> {
            self.user.lock().unwrap().clone()
        }
    }

    #[test]
    fn test_caches_and_falls_back() {
        let inner = Arc::new(FakeIdentity::default());
        let store = Arc::new(MemoryStore::new());
        let identity = CachingIdentity::new(inner.clone(), store);

        assert_eq!(identity.current_user(), None);

        *inner.user.lock().unwrap() = Some(UserId::new("u1"));
        assert_eq!(identity.current_user(), Some(UserId::new("u1")));

        // Provider goes dark; cached value still answers.
        *inner.user.lock().unwrap() = None;
        assert_eq!(identity.current_user(), Some(UserId::new("u1")));

        identity.clear();
        assert_eq!(identity.current_user(), None);
    }
}
