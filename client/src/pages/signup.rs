//! Sign-up page: email/password account creation with confirmation.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::AppIdentity;
use crate::components::toaster::{report_error, report_success};
use crate::error::ActionError;
use crate::net::identity::IdentityProvider;
use crate::state::session::Session;
use crate::state::toast::ToastState;
use crate::util::auth::install_signed_in_redirect;
use crate::util::task::spawn_browser_task;

/// First problem with the sign-up form, if any.
pub(crate) fn signup_form_error(email: &str, password: &str, confirm: &str) -> Option<&'static str> {
    if email.trim().is_empty() {
        return Some("Email is required.");
    }
    if password.is_empty() {
        return Some("Password is required.");
    }
    if password != confirm {
        return Some("Passwords do not match");
    }
    None
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let identity = expect_context::<AppIdentity>();
    install_signed_in_redirect(session, use_navigate());

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        let password_value = password.get();
        if let Some(problem) = signup_form_error(&email_value, &password_value, &confirm.get()) {
            error.set(problem.to_owned());
            return;
        }
        error.set(String::new());
        busy.set(true);
        let identity = identity.clone();
        spawn_browser_task(async move {
            match identity.create_account(&email_value, &password_value).await {
                Ok(_) => report_success(toasts, "Account created successfully!"),
                Err(err) => {
                    let err = ActionError::from(err);
                    error.set(err.user_message("Sign up failed"));
                    report_error(toasts, &err, "Sign up failed");
                }
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Create account"</h1>
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
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <label class="auth-field">
                    "Confirm password"
                    <input
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                </label>
                <Show when=move || !error.get().is_empty()>
                    <p class="auth-message auth-message--error">{move || error.get()}</p>
                </Show>
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Creating account..." } else { "Sign up" }}
                </button>
                <p class="auth-switch">
                    "Already registered? "
                    <A href="/login">"Login"</A>
                </p>
            </form>
        </div>
    }
}
