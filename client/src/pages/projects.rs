//! Project list page with per-card like and owner delete.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::resource_card::ProjectCard;
use crate::net::types::{Project, ResourceKind};
use crate::pages::actions::ResourceActions;
use crate::state::mutations::{remove_by_id, replace_by_id};
use crate::util::task::spawn_browser_task;

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let actions = ResourceActions::for_view();
    let session = actions.session;
    let projects = RwSignal::new(Vec::<Project>::new());
    let loading = RwSignal::new(true);
    let load_error = RwSignal::new(None::<String>);

    {
        let api = actions.api.clone();
        let guard = actions.guard.clone();
        spawn_browser_task(async move {
            let result = api.list::<Project>().await;
            if !guard.is_alive() {
                return;
            }
            match result {
                Ok(items) => projects.set(items),
                Err(err) => {
                    leptos::logging::warn!("project list failed: {err}");
                    load_error.set(Some(err.user_message("Failed to load projects")));
                }
            }
            loading.set(false);
        });
    }

    let on_like = Callback::new({
        let actions = actions.clone();
        move |project: Project| {
            actions.toggle_like(&project, move |updated: Project| {
                projects.update(|items| {
                    replace_by_id(items, updated);
                });
            });
        }
    });
    let on_delete = Callback::new({
        let actions = actions.clone();
        move |id: String| {
            let removed = id.clone();
            actions.delete(ResourceKind::Project, &id, move || {
                projects.update(|items| {
                    remove_by_id(items, &removed);
                });
            });
        }
    });

    view! {
        <section class="resource-list">
            <header class="resource-list__header">
                <h1>"Projects"</h1>
                <Show when=move || session.get().identity.is_some()>
                    <A href="/add-project" attr:class="button">"+ Add Project"</A>
                </Show>
            </header>
            <Show when=move || loading.get()>
                <p class="resource-list__status">"Loading projects..."</p>
            </Show>
            {move || load_error.get().map(|msg| view! { <p class="resource-list__error">{msg}</p> })}
            <Show when=move || !loading.get() && load_error.get().is_none() && projects.get().is_empty()>
                <p class="resource-list__status">"No projects yet."</p>
            </Show>
            <div class="resource-grid">
                {move || {
                    session.track();
                    projects
                        .get()
                        .into_iter()
                        .map(|project| view! { <ProjectCard project=project on_like=on_like on_delete=on_delete/> })
                        .collect_view()
                }}
            </div>
        </section>
    }
}
