//! Identity-provider seam: sign-in operations plus a cancellable
//! sign-in-state notification stream.
//!
//! SYSTEM CONTEXT
//! ==============
//! `state::session::SessionTracker` is the only subscriber in the app. The
//! concrete browser provider lives in `net::firebase`; tests plug in an
//! in-memory fake.
//!
//! DESIGN
//! ======
//! Listeners are kept in a `ListenerRegistry` and released through a
//! `Subscription` handle. Cancelling is synchronous: once `cancel` returns (or
//! the handle is dropped) the listener is never invoked again, even if a
//! notification pass is already underway.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use super::types::UserIdentity;

/// Callback invoked with the provider's current sign-in state.
pub type Listener = Arc<dyn Fn(Option<UserIdentity>) + Send + Sync>;

/// Failures reported by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account already exists for this email")]
    EmailInUse,
    #[error("password is too weak")]
    WeakPassword,
    #[error("sign-in popup was closed")]
    PopupClosed,
    #[error("not signed in")]
    NotSignedIn,
    #[error("network error: {0}")]
    Network(String),
    #[error("{0}")]
    Provider(String),
}

/// Where signed-in credentials survive a page reload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Persistence {
    /// Browser `localStorage`: survives closing the tab ("remember me").
    Local,
    /// Browser `sessionStorage`: cleared with the tab.
    #[default]
    Session,
}

/// External identity provider consumed by the session tracker and the REST client.
///
/// All futures are single-threaded; callers drive them with `spawn_local`.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    /// Register a sign-in-state listener.
    ///
    /// The provider invokes it at least once after registration (with the
    /// restored state) and again on every sign-in and sign-out, in order.
    fn subscribe(&self, listener: Listener) -> Subscription;

    /// Identity currently signed in, without waiting for a notification.
    fn current_identity(&self) -> Option<UserIdentity>;

    /// # Errors
    ///
    /// `InvalidCredentials` on a bad email/password pair, `Network` or
    /// `Provider` otherwise.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
        persistence: Persistence,
    ) -> Result<UserIdentity, IdentityError>;

    /// # Errors
    ///
    /// `PopupClosed` when the user dismisses the popup, `Network` or
    /// `Provider` otherwise.
    async fn sign_in_with_federated_popup(&self) -> Result<UserIdentity, IdentityError>;

    /// Create an email/password account; the new account is signed in.
    ///
    /// # Errors
    ///
    /// `EmailInUse`, `WeakPassword`, `Network`, or `Provider`.
    async fn create_account(&self, email: &str, password: &str) -> Result<UserIdentity, IdentityError>;

    /// # Errors
    ///
    /// `Provider` when the provider refuses; the sign-in state is unchanged.
    async fn sign_out(&self) -> Result<(), IdentityError>;

    /// Short-lived bearer token for the signed-in identity.
    ///
    /// # Errors
    ///
    /// `NotSignedIn` without an identity, `Network`/`Provider` when a refresh fails.
    async fn id_token(&self, force_refresh: bool) -> Result<String, IdentityError>;
}

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Ordered set of sign-in-state listeners.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `listener` and return the handle that removes it.
    pub fn register(&self, listener: Listener) -> Subscription {
        let mut inner = lock(&self.inner);
        inner.next_id += 1;
        let id = inner.next_id;
        inner.entries.push((id, listener));
        Subscription { registry: Arc::downgrade(&self.inner), id }
    }

    /// Invoke every registered listener, in registration order, with `identity`.
    ///
    /// Listeners run outside the registry lock so they may subscribe or cancel.
    pub fn notify(&self, identity: Option<&UserIdentity>) {
        let snapshot: Vec<(u64, Listener)> = lock(&self.inner).entries.clone();
        for (id, listener) in snapshot {
            // A listener earlier in this pass may have cancelled this one.
            let still_registered = lock(&self.inner).entries.iter().any(|(entry, _)| *entry == id);
            if still_registered {
                listener(identity.cloned());
            }
        }
    }

    /// Invoke only the listener behind `subscription`, if it is still registered.
    pub fn notify_one(&self, subscription: &Subscription, identity: Option<&UserIdentity>) {
        let listener = lock(&self.inner)
            .entries
            .iter()
            .find(|(id, _)| *id == subscription.id)
            .map(|(_, listener)| listener.clone());
        if let Some(listener) = listener {
            listener(identity.cloned());
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle to a registered listener. Cancels on drop.
pub struct Subscription {
    registry: Weak<Mutex<RegistryInner>>,
    id: u64,
}

impl Subscription {
    /// Remove the listener. Idempotent; no callback runs after this returns.
    pub fn cancel(&self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).entries.retain(|(id, _)| *id != self.id);
        }
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| lock(&registry).entries.iter().any(|(id, _)| *id == self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
