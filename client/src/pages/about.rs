use leptos::prelude::*;

/// Technologies listed on the about page.
const TECH_STACK: [&str; 6] = ["Rust", "Leptos", "Axum", "JavaScript", "Node", "MongoDB"];

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <section class="about">
            <h1>"About"</h1>
            <p class="about__roles">"Full-stack developer · Freelancer · Travel vlogger"</p>
            <h2>"My journey"</h2>
            <p>
                "I started out building small tools for myself and ended up shipping web "
                "applications for clients. This site collects the projects I am proud of "
                "and the notes I write while working on them."
            </p>
            <h2>"Tech stack"</h2>
            <ul class="card__tags">
                {TECH_STACK.iter().map(|t| view! { <li class="tag">{*t}</li> }).collect_view()}
            </ul>
        </section>
    }
}
