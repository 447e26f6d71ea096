//! Shared fakes for integration tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use skillswap_core::traits::identity::IdentityProvider;
use skillswap_core::types::id::{NotificationId, UserId};
use skillswap_core::{AppError, AppResult};
use skillswap_delivery::traits::{NotificationApi, RowStore};
use skillswap_entity::{NewNotification, Notification};

/// Remote API fake whose availability can be flipped mid-test.
///
/// Successful creates are remembered and served back by `list`.
#[derive(Debug, Default)]
pub struct ToggleApi {
    fail: AtomicBool,
    seq: AtomicUsize,
    create_calls: AtomicUsize,
    list_calls: AtomicUsize,
    created: Mutex<Vec<Notification>>,
}

impl ToggleApi {
    pub fn unreachable() -> Self {
        let api = Self::default();
        api.set_fail(true);
        api
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationApi for ToggleApi {
    async fn create(&self, request: &NewNotification) -> AppResult<Notification> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::external_service("api unreachable"));
        }
        let n = Notification {
            id: NotificationId::new(format!("srv-{}", self.seq.fetch_add(1, Ordering::SeqCst) + 1)),
            user_id: request.user_id.clone(),
            kind: request.kind,
            message: request.message.clone(),
            reference_id: request.reference_id.clone(),
            is_read: false,
            created_at: Utc::now(),
        };
        self.created.lock().unwrap().push(n.clone());
        Ok(n)
    }

    async fn list(&self, user_id: &UserId) -> AppResult<Vec<Notification>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::external_service("api unreachable"));
        }
        Ok(self
            .created
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == *user_id)
            .cloned()
            .collect())
    }
}

/// Direct row-store fake, also toggleable.
#[derive(Debug, Default)]
pub struct ToggleRowStore {
    fail: AtomicBool,
    seq: AtomicUsize,
}

impl ToggleRowStore {
    pub fn unreachable() -> Self {
        let store = Self::default();
        store.fail.store(true, Ordering::SeqCst);
        store
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RowStore for ToggleRowStore {
    async fn insert(&self, request: &NewNotification) -> AppResult<Notification> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::store("store unreachable"));
        }
        Ok(Notification {
            id: NotificationId::new(format!("row-{}", self.seq.fetch_add(1, Ordering::SeqCst) + 1)),
            user_id: request.user_id.clone(),
            kind: request.kind,
            message: request.message.clone(),
            reference_id: request.reference_id.clone(),
            is_read: false,
            created_at: Utc::now(),
        })
    }

    async fn list_for_user(&self, _user_id: &UserId) -> AppResult<Vec<Notification>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::store("store unreachable"));
        }
        Ok(Vec::new())
    }

    async fn mark_read(&self, _id: &NotificationId) -> AppResult<bool> {
        Ok(true)
    }

    async fn mark_all_read(&self, _user_id: &UserId) -> AppResult<u64> {
        Ok(0)
    }
}

/// Identity fake with a fixed answer.
#[derive(Debug)]
pub struct FixedIdentity {
    user: Option<UserId>,
}

impl FixedIdentity {
    pub fn signed_in(user: &str) -> Self {
        Self {
            user: Some(UserId::new(user)),
        }
    }

    pub fn signed_out() -> Self {
        Self { user: None }
    }
}

impl IdentityProvider for FixedIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.user.clone()
    }
}
