//! Session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionTracker` is the single writer: it subscribes to the identity
//! provider and copies every sign-in-state notification into the app-wide
//! `RwSignal<Session>`. Route guards and owner-aware components only read it
//! (see `util::gate`).
//!
//! INVARIANT
//! =========
//! `identity == None` means "signed out" only once `resolving` is false. The
//! first provider notification is authoritative even when it reports no user,
//! and `resolving` never becomes true again afterwards.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex};

use leptos::prelude::*;

use crate::net::identity::{IdentityError, IdentityProvider, Subscription, lock};
use crate::net::types::UserIdentity;

/// Client-local view of the identity provider's state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub identity: Option<UserIdentity>,
    pub resolving: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self { identity: None, resolving: true }
    }
}

/// Resolution state derived from a `Session`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// No provider notification yet; no gated decision may be made.
    Unresolved,
    ResolvedAnonymous,
    ResolvedAuthenticated,
}

impl Session {
    /// Replace the identity wholesale with the provider's latest report.
    pub fn apply_provider_state(&mut self, identity: Option<UserIdentity>) {
        self.identity = identity;
        self.resolving = false;
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.resolving, self.identity.is_some()) {
            (true, _) => SessionPhase::Unresolved,
            (false, false) => SessionPhase::ResolvedAnonymous,
            (false, true) => SessionPhase::ResolvedAuthenticated,
        }
    }

    pub fn uid(&self) -> Option<&str> {
        self.identity.as_ref().map(|identity| identity.uid.as_str())
    }
}

/// Destination for provider notifications.
pub trait SessionWriter: Clone + Send + Sync + 'static {
    fn apply_provider_state(&self, identity: Option<UserIdentity>);
}

impl SessionWriter for RwSignal<Session> {
    fn apply_provider_state(&self, identity: Option<UserIdentity>) {
        // A disposed signal means the owning view is gone; drop the update.
        let _ = self.try_update(|session| session.apply_provider_state(identity));
    }
}

impl SessionWriter for Arc<Mutex<Session>> {
    fn apply_provider_state(&self, identity: Option<UserIdentity>) {
        lock(self).apply_provider_state(identity);
    }
}

struct TrackerInner<P, W> {
    provider: P,
    writer: W,
    subscription: Mutex<Option<Subscription>>,
}

/// Keeps a `Session` in step with the identity provider.
///
/// Cloning yields another handle to the same tracker. The subscription is
/// released by `stop` or when the last handle is dropped.
pub struct SessionTracker<P, W> {
    inner: Arc<TrackerInner<P, W>>,
}

impl<P, W> Clone for SessionTracker<P, W> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<P, W> SessionTracker<P, W>
where
    P: IdentityProvider,
    W: SessionWriter,
{
    pub fn new(provider: P, writer: W) -> Self {
        Self {
            inner: Arc::new(TrackerInner { provider, writer, subscription: Mutex::new(None) }),
        }
    }

    /// Register the tracker's listener with the provider. No-op if already started.
    pub fn start(&self) {
        let mut slot = lock(&self.inner.subscription);
        if slot.is_some() {
            return;
        }
        let writer = self.inner.writer.clone();
        let subscription = self
            .inner
            .provider
            .subscribe(Arc::new(move |identity| writer.apply_provider_state(identity)));
        *slot = Some(subscription);
    }

    /// Deregister the listener. Safe to call repeatedly.
    pub fn stop(&self) {
        let subscription = lock(&self.inner.subscription).take();
        if let Some(subscription) = subscription {
            subscription.cancel();
        }
    }

    pub fn is_started(&self) -> bool {
        lock(&self.inner.subscription).is_some()
    }

    /// Ask the provider to sign out.
    ///
    /// The session is not touched here; the provider's own notification
    /// updates it so local and provider state cannot disagree.
    ///
    /// # Errors
    ///
    /// Returns the provider's error unchanged; the session stays as it was.
    pub async fn logout(&self) -> Result<(), IdentityError> {
        self.inner.provider.sign_out().await
    }

    pub fn provider(&self) -> &P {
        &self.inner.provider
    }
}
