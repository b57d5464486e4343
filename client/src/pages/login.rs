//! Login page supporting email/password and federated popup sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! A successful sign-in only reports success here; the provider's
//! notification updates the session, and the signed-in redirect moves the
//! user off this screen.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::AppIdentity;
use crate::components::toaster::{report_error, report_success};
use crate::error::ActionError;
use crate::net::identity::{IdentityProvider, Persistence};
use crate::state::session::Session;
use crate::state::toast::ToastState;
use crate::util::auth::install_signed_in_redirect;
use crate::util::task::spawn_browser_task;

/// First problem with the login form, if any.
pub(crate) fn login_form_error(email: &str, password: &str) -> Option<&'static str> {
    if email.trim().is_empty() {
        return Some("Email is required.");
    }
    if password.is_empty() {
        return Some("Password is required.");
    }
    None
}

/// "Remember me" keeps credentials across browser restarts.
pub(crate) fn persistence_for(remember: bool) -> Persistence {
    if remember { Persistence::Local } else { Persistence::Session }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let identity = expect_context::<AppIdentity>();
    install_signed_in_redirect(session, use_navigate());

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let remember = RwSignal::new(false);
    let show_password = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let info = RwSignal::new(String::new());

    let on_submit = {
        let identity = identity.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if busy.get() {
                return;
            }
            let email_value = email.get().trim().to_owned();
            let password_value = password.get();
            if let Some(problem) = login_form_error(&email_value, &password_value) {
                info.set(problem.to_owned());
                return;
            }
            info.set(String::new());
            busy.set(true);
            let identity = identity.clone();
            let persistence = persistence_for(remember.get());
            spawn_browser_task(async move {
                match identity
                    .sign_in_with_password(&email_value, &password_value, persistence)
                    .await
                {
                    Ok(_) => report_success(toasts, "Logged in successfully"),
                    Err(err) => report_error(toasts, &ActionError::from(err), "Login failed"),
                }
                busy.set(false);
            });
        }
    };

    let on_federated = move |_: leptos::ev::MouseEvent| {
        if busy.get() {
            return;
        }
        busy.set(true);
        let identity = identity.clone();
        spawn_browser_task(async move {
            match identity.sign_in_with_federated_popup().await {
                Ok(_) => report_success(toasts, "Logged in successfully"),
                Err(err) => report_error(toasts, &ActionError::from(err), "Login failed"),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Login"</h1>
                <label class="auth-field">
                    "Email"
                    <input
                        type="email"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="auth-field">
                    "Password"
                    <input
                        type=move || if show_password.get() { "text" } else { "password" }
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <label class="auth-check">
                    <input type="checkbox" prop:checked=move || show_password.get() on:change=move |_| show_password.update(|v| *v = !*v)/>
                    "Show password"
                </label>
                <label class="auth-check">
                    <input type="checkbox" prop:checked=move || remember.get() on:change=move |_| remember.update(|v| *v = !*v)/>
                    "Remember me"
                </label>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Login" }}
                </button>
                <button class="auth-button auth-button--alt" type="button" on:click=on_federated disabled=move || busy.get()>
                    "Continue with Google"
                </button>
                <p class="auth-switch">
                    "No account? "
                    <A href="/signup">"Sign up"</A>
                </p>
            </form>
        </div>
    }
}
