//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes and the login/signup pages apply identical redirect
//! behavior, decided by `util::gate::route_decision`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::Session;
use crate::util::gate::{RouteDecision, route_decision};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Navigation that replaces the current history entry.
pub fn replace_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Redirect to `/login` once the session resolves with nobody signed in.
///
/// Nothing happens while the session is still resolving.
pub fn install_login_redirect<F>(session: RwSignal<Session>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        redirect_if_signed_out(&session.get(), &navigate);
    });
}

/// Leave the login/signup screens once someone is signed in.
pub fn install_signed_in_redirect<F>(session: RwSignal<Session>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        redirect_if_signed_in(&session.get(), &navigate);
    });
}

/// Navigate to `/login` only for a resolved anonymous session.
pub(crate) fn redirect_if_signed_out<F>(session: &Session, navigate: &F) -> bool
where
    F: Fn(&str, NavigateOptions),
{
    let redirect = route_decision(session) == RouteDecision::RedirectToLogin;
    if redirect {
        navigate(LOGIN_PATH, replace_options());
    }
    redirect
}

/// Navigate home only for a resolved authenticated session.
pub(crate) fn redirect_if_signed_in<F>(session: &Session, navigate: &F) -> bool
where
    F: Fn(&str, NavigateOptions),
{
    let redirect = route_decision(session) == RouteDecision::Enter;
    if redirect {
        navigate(HOME_PATH, replace_options());
    }
    redirect
}
