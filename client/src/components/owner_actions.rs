//! Edit/delete controls rendered only for the resource owner.

use leptos::prelude::*;
use leptos_router::components::A;

/// Ask the browser to confirm a destructive action. Always false off-browser.
fn confirm(message: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        false
    }
}

#[component]
pub fn OwnerActions(edit_href: String, label: &'static str, on_delete: Callback<()>) -> impl IntoView {
    let prompt = format!("Delete this {}?", label.to_lowercase());

    view! {
        <div class="owner-actions">
            <A href=edit_href attr:class="owner-actions__edit">"Edit"</A>
            <button
                class="owner-actions__delete"
                on:click=move |ev: leptos::ev::MouseEvent| {
                    ev.stop_propagation();
                    if confirm(&prompt) {
                        on_delete.run(());
                    }
                }
            >
                "Delete"
            </button>
        </div>
    }
}
