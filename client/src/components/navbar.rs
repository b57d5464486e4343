//! Top navigation bar with the session-aware account area.
//!
//! DESIGN
//! ======
//! The bar and footer are hidden on the login and signup screens. Signed-in
//! users get add buttons, their avatar, and a logout action; anonymous users
//! get a login link. While the session resolves the account area is empty.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_location, use_navigate};

use crate::app::AppSessionTracker;
use crate::components::toaster::{report_error, report_success};
use crate::error::ActionError;
use crate::state::session::{Session, SessionPhase};
use crate::state::toast::ToastState;
use crate::util::auth::{HOME_PATH, replace_options};
use crate::util::task::spawn_browser_task;

/// Whether the shared layout (navbar, footer) is hidden on `path`.
pub fn layout_hidden(path: &str) -> bool {
    matches!(path.trim_end_matches('/'), "/login" | "/signup")
}

#[component]
pub fn Navbar() -> impl IntoView {
    let location = use_location();
    let hidden = move || layout_hidden(&location.pathname.get());

    view! {
        <Show when=move || !hidden()>
            <nav class="navbar">
                <A href="/home" attr:class="navbar__brand">"Folio"</A>
                <div class="navbar__links">
                    <A href="/home">"Home"</A>
                    <A href="/blogs">"Blogs"</A>
                    <A href="/projects">"Projects"</A>
                    <A href="/about">"About"</A>
                </div>
                <AccountArea/>
            </nav>
        </Show>
    }
}

#[component]
fn AccountArea() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let tracker = expect_context::<AppSessionTracker>();
    let navigate = use_navigate();
    let busy = RwSignal::new(false);

    let on_logout = move |_: leptos::ev::MouseEvent| {
        if busy.get() {
            return;
        }
        busy.set(true);
        let tracker = tracker.clone();
        let navigate = navigate.clone();
        spawn_browser_task(async move {
            match tracker.logout().await {
                Ok(()) => {
                    report_success(toasts, "Logged out");
                    navigate(HOME_PATH, replace_options());
                }
                Err(err) => report_error(toasts, &ActionError::from(err), "Logout failed"),
            }
            busy.set(false);
        });
    };

    move || match session.get().phase() {
        SessionPhase::Unresolved => ().into_any(),
        SessionPhase::ResolvedAnonymous => view! {
            <div class="navbar__account">
                <A href="/login" attr:class="navbar__button">"Login"</A>
            </div>
        }
        .into_any(),
        SessionPhase::ResolvedAuthenticated => {
            let Some(identity) = session.get().identity else {
                return ().into_any();
            };
            let avatar = match identity.display_image_url.clone() {
                Some(url) => view! { <img class="navbar__avatar" src=url alt="avatar"/> }.into_any(),
                None => view! { <span class="navbar__avatar navbar__avatar--initial">{identity.initial()}</span> }
                    .into_any(),
            };
            let on_logout = on_logout.clone();
            view! {
                <div class="navbar__account">
                    <A href="/add-project" attr:class="navbar__button">"+ Project"</A>
                    <A href="/add-blog" attr:class="navbar__button">"+ Blog"</A>
                    {avatar}
                    <span class="navbar__email">{identity.email.clone()}</span>
                    <button class="navbar__button" on:click=on_logout disabled=move || busy.get()>
                        "Logout"
                    </button>
                </div>
            }
            .into_any()
        }
    }
}
