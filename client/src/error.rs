//! Failures of user-triggered actions.
//!
//! ERROR HANDLING
//! ==============
//! Every action catches its error where it was triggered and turns it into a
//! toast through `user_message`. Nothing here is fatal and nothing is retried
//! automatically; the previously rendered state stays on screen.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::net::identity::IdentityError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Gated action attempted without a signed-in identity.
    #[error("login required")]
    AuthRequired,
    /// Duplicate action rejected by the backend (e.g. a second like).
    #[error("already done")]
    AlreadyDone,
    #[error("request failed (status {status:?}): {}", .message.as_deref().unwrap_or("no details"))]
    NetworkOrServer { status: Option<u16>, message: Option<String> },
    /// Sign-in or sign-out failure, message verbatim from the provider.
    #[error("{0}")]
    Provider(String),
}

impl ActionError {
    /// Map a non-success HTTP status and the server's `message` field.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 | 403 => Self::AuthRequired,
            409 => Self::AlreadyDone,
            _ => Self::NetworkOrServer { status: Some(status), message },
        }
    }

    /// Transport-level failure (no response).
    pub fn network(detail: impl Into<String>) -> Self {
        Self::NetworkOrServer { status: None, message: Some(detail.into()) }
    }

    /// Text for the toast shown to the user. `fallback` names the failed
    /// action, e.g. "Like failed".
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::AuthRequired => "Login required".to_owned(),
            Self::AlreadyDone => "You already did that".to_owned(),
            Self::NetworkOrServer { status: Some(_), message: Some(message) } if !message.trim().is_empty() => {
                message.clone()
            }
            Self::NetworkOrServer { .. } => fallback.to_owned(),
            Self::Provider(message) => message.clone(),
        }
    }
}

impl From<IdentityError> for ActionError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::NotSignedIn => Self::AuthRequired,
            IdentityError::Network(detail) => Self::network(detail),
            other => Self::Provider(other.to_string()),
        }
    }
}
