//! Route wrapper that admits only signed-in users.
//!
//! SYSTEM CONTEXT
//! ==============
//! While the session is resolving the wrapper shows a neutral waiting state
//! and never redirects, so a reload of a protected page does not bounce a
//! signed-in user to `/login`.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::session::Session;
use crate::util::auth::install_login_redirect;
use crate::util::gate::{RouteDecision, route_decision};

#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    install_login_redirect(session, use_navigate());

    // Re-render only when the decision changes, not on every session write.
    let decision = Memo::new(move |_| route_decision(&session.get()));

    move || match decision.get() {
        RouteDecision::Wait => view! { <p class="session-check">"Checking session..."</p> }.into_any(),
        RouteDecision::Enter => children(),
        RouteDecision::RedirectToLogin => ().into_any(),
    }
}
