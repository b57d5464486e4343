use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::components::navbar::layout_hidden;

#[component]
pub fn Footer() -> impl IntoView {
    let location = use_location();

    view! {
        <Show when=move || !layout_hidden(&location.pathname.get())>
            <footer class="footer">
                <span>"Folio: writing and projects"</span>
                <nav class="footer__links">
                    <A href="/blogs">"Blogs"</A>
                    <A href="/projects">"Projects"</A>
                    <A href="/about">"About"</A>
                </nav>
            </footer>
        </Show>
    }
}
