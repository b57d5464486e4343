//! In-memory identity provider for unit tests.
//!
//! Nothing is delivered to listeners until the test calls `emit`, which lets
//! tests observe the unresolved window before the first notification.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::identity::{
    IdentityError, IdentityProvider, Listener, ListenerRegistry, Persistence, Subscription, lock,
};
use super::types::UserIdentity;

pub(crate) const GOOD_PASSWORD: &str = "correct horse";

#[derive(Default)]
struct FakeInner {
    registry: ListenerRegistry,
    current: Mutex<Option<UserIdentity>>,
    resolved: AtomicBool,
    refuse_sign_out: AtomicBool,
    silent_sign_out: AtomicBool,
    popup_closes: AtomicBool,
    token_requests: Mutex<Vec<bool>>,
    issued: AtomicUsize,
}

#[derive(Clone, Default)]
pub(crate) struct FakeIdentity {
    inner: Arc<FakeInner>,
}

pub(crate) fn identity(uid: &str, email: &str) -> UserIdentity {
    UserIdentity { uid: uid.to_owned(), email: email.to_owned(), display_image_url: None }
}

impl FakeIdentity {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Report a sign-in state change to every listener.
    pub(crate) fn emit(&self, identity: Option<UserIdentity>) {
        *lock(&self.inner.current) = identity.clone();
        self.inner.resolved.store(true, Ordering::SeqCst);
        self.inner.registry.notify(identity.as_ref());
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.inner.registry.len()
    }

    pub(crate) fn refuse_sign_out(&self) {
        self.inner.refuse_sign_out.store(true, Ordering::SeqCst);
    }

    /// Accept sign-out requests without notifying; the test emits later.
    pub(crate) fn defer_sign_out_event(&self) {
        self.inner.silent_sign_out.store(true, Ordering::SeqCst);
    }

    pub(crate) fn close_popups(&self) {
        self.inner.popup_closes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn token_requests(&self) -> Vec<bool> {
        lock(&self.inner.token_requests).clone()
    }
}

impl IdentityProvider for FakeIdentity {
    fn subscribe(&self, listener: Listener) -> Subscription {
        let subscription = self.inner.registry.register(listener);
        if self.inner.resolved.load(Ordering::SeqCst) {
            let current = lock(&self.inner.current).clone();
            self.inner.registry.notify_one(&subscription, current.as_ref());
        }
        subscription
    }

    fn current_identity(&self) -> Option<UserIdentity> {
        lock(&self.inner.current).clone()
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
        _persistence: Persistence,
    ) -> Result<UserIdentity, IdentityError> {
        if password != GOOD_PASSWORD {
            return Err(IdentityError::InvalidCredentials);
        }
        let signed_in = identity(&format!("uid-{email}"), email);
        self.emit(Some(signed_in.clone()));
        Ok(signed_in)
    }

    async fn sign_in_with_federated_popup(&self) -> Result<UserIdentity, IdentityError> {
        if self.inner.popup_closes.load(Ordering::SeqCst) {
            return Err(IdentityError::PopupClosed);
        }
        let signed_in = identity("uid-federated", "federated@example.com");
        self.emit(Some(signed_in.clone()));
        Ok(signed_in)
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<UserIdentity, IdentityError> {
        if email.starts_with("taken") {
            return Err(IdentityError::EmailInUse);
        }
        self.sign_in_with_password(email, password, Persistence::Session).await
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        if self.inner.refuse_sign_out.load(Ordering::SeqCst) {
            return Err(IdentityError::Provider("sign-out refused".to_owned()));
        }
        if !self.inner.silent_sign_out.load(Ordering::SeqCst) {
            self.emit(None);
        }
        Ok(())
    }

    async fn id_token(&self, force_refresh: bool) -> Result<String, IdentityError> {
        lock(&self.inner.token_requests).push(force_refresh);
        let uid = lock(&self.inner.current)
            .as_ref()
            .map(|identity| identity.uid.clone())
            .ok_or(IdentityError::NotSignedIn)?;
        let n = self.inner.issued.fetch_add(1, Ordering::SeqCst);
        Ok(format!("token-{uid}-{n}"))
    }
}
