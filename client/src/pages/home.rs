//! Landing page with the latest posts and projects.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::types::{Blog, Project};
use crate::pages::actions::ResourceActions;
use crate::util::task::spawn_browser_task;

/// Items shown per section on the landing page.
const FEATURED_COUNT: usize = 3;

#[component]
pub fn HomePage() -> impl IntoView {
    let actions = ResourceActions::for_view();
    let blogs = RwSignal::new(Vec::<Blog>::new());
    let projects = RwSignal::new(Vec::<Project>::new());

    {
        let api = actions.api.clone();
        let guard = actions.guard.clone();
        spawn_browser_task(async move {
            let (blog_list, project_list) = (api.list::<Blog>().await, api.list::<Project>().await);
            if !guard.is_alive() {
                return;
            }
            match blog_list {
                Ok(mut items) => {
                    items.truncate(FEATURED_COUNT);
                    blogs.set(items);
                }
                Err(err) => leptos::logging::warn!("featured blogs unavailable: {err}"),
            }
            match project_list {
                Ok(mut items) => {
                    items.truncate(FEATURED_COUNT);
                    projects.set(items);
                }
                Err(err) => leptos::logging::warn!("featured projects unavailable: {err}"),
            }
        });
    }

    view! {
        <section class="hero">
            <h1>"Hi, welcome to my corner of the web."</h1>
            <p>"I build full-stack web applications and write about what I learn along the way."</p>
            <div class="hero__actions">
                <A href="/projects" attr:class="button">"See projects"</A>
                <A href="/blogs" attr:class="button button--alt">"Read the blog"</A>
            </div>
        </section>
        <section class="featured">
            <h2>"Latest posts"</h2>
            <ul class="featured__list">
                {move || {
                    blogs
                        .get()
                        .into_iter()
                        .map(|b| view! { <li><A href={format!("/blogs/{}", b.id)}>{b.title}</A></li> })
                        .collect_view()
                }}
            </ul>
            <h2>"Recent projects"</h2>
            <ul class="featured__list">
                {move || {
                    projects
                        .get()
                        .into_iter()
                        .map(|p| view! { <li><A href={format!("/projects/{}", p.id)}>{p.title}</A></li> })
                        .collect_view()
                }}
            </ul>
        </section>
    }
}
