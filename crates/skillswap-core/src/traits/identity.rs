//! Current-user identity provider trait.

use crate::types::id::UserId;

/// Opaque source of the current user's identity.
///
/// Authentication itself is out of scope; the subsystem only needs to
/// know who the current user is, or that nobody is signed in.
pub trait IdentityProvider: Send + Sync + std::fmt::Debug + 'static {
    /// The current user's id, or `None` when signed out.
    fn current_user(&self) -> Option<UserId>;
}
