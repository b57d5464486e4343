//! Toast stack rendered at the page corner.

use leptos::prelude::*;

use crate::error::ActionError;
use crate::state::toast::{Toast, ToastKind, ToastState};

#[cfg(feature = "hydrate")]
const TOAST_LIFETIME_MS: u64 = 3500;

/// Queue an error toast for a failed action.
pub fn report_error(toasts: RwSignal<ToastState>, err: &ActionError, fallback: &str) {
    leptos::logging::warn!("{fallback}: {err}");
    let text = err.user_message(fallback);
    let _ = toasts.try_update(|t| t.push_error(text));
}

pub fn report_success(toasts: RwSignal<ToastState>, text: impl Into<String>) {
    let text = text.into();
    let _ = toasts.try_update(|t| t.push_success(text));
}

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toaster" aria-live="polite">
            <For
                each=move || toasts.get().items
                key=|toast| toast.id
                children=move |toast: Toast| view! { <ToastItem toast=toast/> }
            />
        </div>
    }
}

#[component]
fn ToastItem(toast: Toast) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let id = toast.id;

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(std::time::Duration::from_millis(TOAST_LIFETIME_MS)).await;
        let _ = toasts.try_update(|t| t.dismiss(id));
    });

    view! {
        <div
            class="toast"
            class:toast--error={toast.kind == ToastKind::Error}
            class:toast--success={toast.kind == ToastKind::Success}
            role="status"
            on:click=move |_| toasts.update(|t| t.dismiss(id))
        >
            {toast.text}
        </div>
    }
}
