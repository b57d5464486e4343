//! Identity provider backed by the Identity Toolkit / Secure Token REST APIs.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, credentials kept in
//! browser storage so a reload restores the session.
//! Server-side (SSR): the provider never notifies, so every gated view renders
//! its waiting state; network operations fail with a provider error.
//!
//! SYSTEM CONTEXT
//! ==============
//! The first subscriber triggers a restore of stored credentials. Its outcome
//! (an identity, or none) is the first notification every listener sees.
//!
//! ERROR HANDLING
//! ==============
//! Provider error codes are mapped onto `IdentityError` so views can show a
//! readable message. A refresh that fails on the network keeps the stored
//! credentials; a refresh the provider rejects signs the user out.

#[cfg(test)]
#[path = "firebase_test.rs"]
mod firebase_test;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::identity::{
    IdentityError, IdentityProvider, Listener, ListenerRegistry, Persistence, Subscription, lock,
};
use super::types::UserIdentity;
use crate::config::AppConfig;
use crate::util::storage;

#[cfg(any(test, feature = "hydrate"))]
const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
#[cfg(any(test, feature = "hydrate"))]
const SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1/token";
const CREDENTIALS_KEY: &str = "folio_credentials";
#[cfg(feature = "hydrate")]
const FEDERATED_HANDOFF_KEY: &str = "folio_federated_handoff";
#[cfg(feature = "hydrate")]
const POPUP_POLL_MS: u64 = 500;
/// Tokens are refreshed this long before they expire.
const REFRESH_MARGIN_MS: i64 = 60_000;
#[cfg(any(test, feature = "hydrate"))]
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// Signed-in credentials as persisted in browser storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub display_image_url: Option<String>,
    pub id_token: String,
    pub refresh_token: String,
    /// Expiry of `id_token` in milliseconds since the Unix epoch.
    pub expires_at_ms: i64,
    #[serde(default)]
    pub persistence: Persistence,
}

impl StoredCredentials {
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            uid: self.uid.clone(),
            email: self.email.clone(),
            display_image_url: self.display_image_url.clone(),
        }
    }

    /// Whether `id_token` must be refreshed before use.
    pub fn needs_refresh(&self, now_ms: i64, force: bool) -> bool {
        force || now_ms >= self.expires_at_ms.saturating_sub(REFRESH_MARGIN_MS)
    }

    #[cfg(any(test, feature = "hydrate"))]
    fn from_sign_in(resp: SignInResponse, persistence: Persistence, now_ms: i64) -> Self {
        let expires_at_ms = expires_at(now_ms, resp.expires_in.as_deref());
        Self {
            uid: resp.local_id,
            email: resp.email,
            display_image_url: resp.profile_picture.or(resp.photo_url),
            id_token: resp.id_token,
            refresh_token: resp.refresh_token,
            expires_at_ms,
            persistence,
        }
    }

    #[cfg(any(test, feature = "hydrate"))]
    fn apply_refresh(&mut self, resp: RefreshResponse, now_ms: i64) {
        self.expires_at_ms = expires_at(now_ms, resp.expires_in.as_deref());
        self.id_token = resp.id_token;
        self.refresh_token = resp.refresh_token;
    }
}

/// Body of `accounts:signInWithPassword` / `accounts:signUp`.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordPayload<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

/// Sign-in response; also the shape the federated popup hands off.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
    #[serde(default)]
    profile_picture: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(any(test, feature = "hydrate"))]
fn account_endpoint(method: &str, api_key: &str) -> String {
    format!("{IDENTITY_TOOLKIT_URL}/accounts:{method}?key={api_key}")
}

#[cfg(any(test, feature = "hydrate"))]
fn refresh_endpoint(api_key: &str) -> String {
    format!("{SECURE_TOKEN_URL}?key={api_key}")
}

#[cfg(any(test, feature = "hydrate"))]
fn expires_at(now_ms: i64, expires_in: Option<&str>) -> i64 {
    let secs = expires_in
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
    now_ms.saturating_add(secs.saturating_mul(1000))
}

/// Map a provider error code (e.g. `"WEAK_PASSWORD : Password should be..."`).
#[cfg(any(test, feature = "hydrate"))]
fn classify_error(message: &str) -> IdentityError {
    let code = message.split([' ', ':']).next().unwrap_or(message);
    match code {
        "INVALID_PASSWORD" | "EMAIL_NOT_FOUND" | "INVALID_LOGIN_CREDENTIALS" | "INVALID_EMAIL" => {
            IdentityError::InvalidCredentials
        }
        "EMAIL_EXISTS" => IdentityError::EmailInUse,
        "WEAK_PASSWORD" => IdentityError::WeakPassword,
        "TOKEN_EXPIRED" | "USER_NOT_FOUND" | "USER_DISABLED" | "INVALID_REFRESH_TOKEN" => {
            IdentityError::NotSignedIn
        }
        _ => IdentityError::Provider(message.to_owned()),
    }
}

fn now_ms() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        {
            js_sys::Date::now() as i64
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }
}

#[cfg(not(feature = "hydrate"))]
fn unavailable() -> IdentityError {
    IdentityError::Provider("not available on server".to_owned())
}

#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(
    sent: Result<gloo_net::http::Response, gloo_net::Error>,
) -> Result<T, IdentityError> {
    let resp = sent.map_err(|e| IdentityError::Network(e.to_string()))?;
    if !resp.ok() {
        let status = resp.status();
        let message = resp
            .json::<ErrorEnvelope>()
            .await
            .map_or_else(|_| format!("identity request failed: {status}"), |env| env.error.message);
        return Err(classify_error(&message));
    }
    resp.json::<T>()
        .await
        .map_err(|e| IdentityError::Network(e.to_string()))
}

#[cfg(feature = "hydrate")]
async fn post_json<B: Serialize, T: serde::de::DeserializeOwned>(url: &str, body: &B) -> Result<T, IdentityError> {
    let request = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(|e| IdentityError::Network(e.to_string()))?;
    read_json(request.send().await).await
}

struct FirebaseInner {
    api_key: String,
    federated_url: Option<String>,
    registry: ListenerRegistry,
    credentials: Mutex<Option<StoredCredentials>>,
    resolved: AtomicBool,
    restore_started: AtomicBool,
}

/// Browser identity provider. Cloning yields another handle to the same state.
#[derive(Clone)]
pub struct FirebaseIdentity {
    inner: Arc<FirebaseInner>,
}

impl FirebaseIdentity {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            inner: Arc::new(FirebaseInner {
                api_key: config.identity_api_key.clone(),
                federated_url: config.federated_url.clone(),
                registry: ListenerRegistry::new(),
                credentials: Mutex::new(None),
                resolved: AtomicBool::new(false),
                restore_started: AtomicBool::new(false),
            }),
        }
    }

    fn require_configured(&self) -> Result<(), IdentityError> {
        if self.inner.api_key.is_empty() {
            return Err(IdentityError::Provider("identity provider is not configured".to_owned()));
        }
        Ok(())
    }

    /// Replace the signed-in credentials, persist them, and notify listeners.
    fn set_credentials(&self, credentials: Option<StoredCredentials>) {
        persist(credentials.as_ref());
        let identity = credentials.as_ref().map(StoredCredentials::identity);
        *lock(&self.inner.credentials) = credentials;
        self.inner.resolved.store(true, Ordering::SeqCst);
        self.inner.registry.notify(identity.as_ref());
    }

    /// Store refreshed tokens for the same user without notifying.
    #[cfg(feature = "hydrate")]
    fn store_refreshed(&self, refreshed: StoredCredentials) {
        let mut current = lock(&self.inner.credentials);
        if current.as_ref().is_some_and(|c| c.uid == refreshed.uid) {
            persist(Some(&refreshed));
            *current = Some(refreshed);
        }
    }

    fn begin_restore(&self) {
        if self.inner.restore_started.swap(true, Ordering::SeqCst) {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let this = self.clone();
            leptos::task::spawn_local(async move { this.restore().await });
        }
    }

    #[cfg(feature = "hydrate")]
    async fn restore(&self) {
        let stored = storage::load_json::<StoredCredentials>(Persistence::Local, CREDENTIALS_KEY)
            .or_else(|| storage::load_json::<StoredCredentials>(Persistence::Session, CREDENTIALS_KEY));
        let restored = match stored {
            None => None,
            Some(creds) if !creds.needs_refresh(now_ms(), false) => Some(creds),
            Some(mut creds) => match self.refresh(&creds.refresh_token).await {
                Ok(resp) => {
                    creds.apply_refresh(resp, now_ms());
                    Some(creds)
                }
                Err(IdentityError::Network(e)) => {
                    leptos::logging::warn!("credential refresh deferred: {e}");
                    Some(creds)
                }
                Err(e) => {
                    leptos::logging::warn!("stored credentials rejected: {e}");
                    None
                }
            },
        };
        // A sign-in that completed while restoring wins.
        if self.inner.resolved.load(Ordering::SeqCst) {
            return;
        }
        self.set_credentials(restored);
    }

    #[cfg(feature = "hydrate")]
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, IdentityError> {
        let request = gloo_net::http::Request::post(&refresh_endpoint(&self.inner.api_key))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(format!("grant_type=refresh_token&refresh_token={refresh_token}"))
            .map_err(|e| IdentityError::Network(e.to_string()))?;
        read_json(request.send().await).await
    }

    #[cfg(feature = "hydrate")]
    async fn password_request(
        &self,
        method: &str,
        email: &str,
        password: &str,
        persistence: Persistence,
    ) -> Result<UserIdentity, IdentityError> {
        let payload = PasswordPayload { email, password, return_secure_token: true };
        let resp: SignInResponse = post_json(&account_endpoint(method, &self.inner.api_key), &payload).await?;
        let creds = StoredCredentials::from_sign_in(resp, persistence, now_ms());
        let identity = creds.identity();
        self.set_credentials(Some(creds));
        Ok(identity)
    }
}

/// Write `credentials` to the storage its persistence names and clear the other.
fn persist(credentials: Option<&StoredCredentials>) {
    match credentials {
        Some(creds) => {
            let other = match creds.persistence {
                Persistence::Local => Persistence::Session,
                Persistence::Session => Persistence::Local,
            };
            storage::remove(other, CREDENTIALS_KEY);
            storage::save_json(creds.persistence, CREDENTIALS_KEY, creds);
        }
        None => {
            storage::remove(Persistence::Local, CREDENTIALS_KEY);
            storage::remove(Persistence::Session, CREDENTIALS_KEY);
        }
    }
}

impl IdentityProvider for FirebaseIdentity {
    fn subscribe(&self, listener: Listener) -> Subscription {
        let subscription = self.inner.registry.register(listener);
        if self.inner.resolved.load(Ordering::SeqCst) {
            let current = self.current_identity();
            self.inner.registry.notify_one(&subscription, current.as_ref());
        } else {
            self.begin_restore();
        }
        subscription
    }

    fn current_identity(&self) -> Option<UserIdentity> {
        lock(&self.inner.credentials).as_ref().map(StoredCredentials::identity)
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
        persistence: Persistence,
    ) -> Result<UserIdentity, IdentityError> {
        self.require_configured()?;
        #[cfg(feature = "hydrate")]
        {
            self.password_request("signInWithPassword", email, password, persistence)
                .await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password, persistence);
            Err(unavailable())
        }
    }

    async fn sign_in_with_federated_popup(&self) -> Result<UserIdentity, IdentityError> {
        let Some(url) = self.inner.federated_url.clone() else {
            return Err(IdentityError::Provider("federated sign-in is not configured".to_owned()));
        };
        #[cfg(feature = "hydrate")]
        {
            let window = web_sys::window().ok_or_else(|| IdentityError::Provider("no browser window".to_owned()))?;
            storage::remove(Persistence::Local, FEDERATED_HANDOFF_KEY);
            let popup = window
                .open_with_url_and_target_and_features(&url, "folio_federated", "width=500,height=640")
                .ok()
                .flatten()
                .ok_or_else(|| IdentityError::Provider("sign-in popup was blocked".to_owned()))?;
            while !popup.closed().unwrap_or(true) {
                gloo_timers::future::sleep(std::time::Duration::from_millis(POPUP_POLL_MS)).await;
            }
            let handoff: SignInResponse =
                storage::load_json(Persistence::Local, FEDERATED_HANDOFF_KEY).ok_or(IdentityError::PopupClosed)?;
            storage::remove(Persistence::Local, FEDERATED_HANDOFF_KEY);
            let creds = StoredCredentials::from_sign_in(handoff, Persistence::Local, now_ms());
            let identity = creds.identity();
            self.set_credentials(Some(creds));
            Ok(identity)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = url;
            Err(unavailable())
        }
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<UserIdentity, IdentityError> {
        self.require_configured()?;
        #[cfg(feature = "hydrate")]
        {
            self.password_request("signUp", email, password, Persistence::Session)
                .await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(unavailable())
        }
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        // Tokens are bearer-only; signing out forgets them locally.
        self.set_credentials(None);
        Ok(())
    }

    async fn id_token(&self, force_refresh: bool) -> Result<String, IdentityError> {
        let creds = lock(&self.inner.credentials)
            .clone()
            .ok_or(IdentityError::NotSignedIn)?;
        if !creds.needs_refresh(now_ms(), force_refresh) {
            return Ok(creds.id_token);
        }
        #[cfg(feature = "hydrate")]
        {
            let resp = self.refresh(&creds.refresh_token).await?;
            let mut refreshed = creds;
            refreshed.apply_refresh(resp, now_ms());
            let token = refreshed.id_token.clone();
            self.store_refreshed(refreshed);
            Ok(token)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(unavailable())
        }
    }
}
