//! Browser storage helpers for persisted sign-in credentials.
//!
//! SYSTEM CONTEXT
//! ==============
//! These helpers centralize hydrate-only read/write behavior for
//! `localStorage` and `sessionStorage` so the identity provider does not
//! repeat web-sys glue. Outside the browser every call is a no-op.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::net::identity::Persistence;

#[cfg(feature = "hydrate")]
fn storage(scope: Persistence) -> Option<web_sys::Storage> {
    let window = web_sys::window()?;
    match scope {
        Persistence::Local => window.local_storage().ok().flatten(),
        Persistence::Session => window.session_storage().ok().flatten(),
    }
}

/// Load a JSON value stored under `key` in `scope`.
pub fn load_json<T: DeserializeOwned>(scope: Persistence, key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let raw = storage(scope)?.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (scope, key);
        None
    }
}

/// Save a JSON value under `key` in `scope`.
pub fn save_json<T: Serialize>(scope: Persistence, key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = storage(scope) else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        let _ = storage.set_item(key, &raw);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (scope, key, value);
    }
}

/// Remove `key` from `scope`.
pub fn remove(scope: Persistence, key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = storage(scope) {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (scope, key);
    }
}
