//! Add/edit form for projects, mounted behind `ProtectedRoute`.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::net::types::{Project, ProjectDraft, ResourceDraft};
use crate::pages::actions::{LoadStatus, ResourceActions, selected_image};
use crate::util::gate::is_owner;

#[component]
pub fn ProjectEditorPage() -> impl IntoView {
    let actions = ResourceActions::for_view();
    let session = actions.session;
    let params = use_params_map();
    let navigate = use_navigate();
    let editing_id = Memo::new(move |_| params.read().get("id"));

    let existing = RwSignal::new(None::<Project>);
    let status = RwSignal::new(if editing_id.get_untracked().is_some() {
        LoadStatus::Loading
    } else {
        LoadStatus::Ready
    });
    let draft = RwSignal::new(ProjectDraft::default());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(String::new());
    let image_input = NodeRef::<leptos::html::Input>::new();

    {
        let actions = actions.clone();
        Effect::new(move || {
            if let Some(id) = editing_id.get() {
                actions.load_into(id, existing, status);
            }
        });
    }
    Effect::new(move || {
        if let Some(project) = existing.get() {
            draft.set(ProjectDraft::from_project(&project));
        }
    });

    // Edit mode is only offered to the owner; add mode to anyone signed in.
    let may_edit = move || match editing_id.get() {
        None => true,
        Some(_) => existing.with(|project| project.as_ref().is_some_and(|b| is_owner(&session.get(), b))),
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let current = draft.get();
        if let Err(problem) = current.validate() {
            error.set(problem.to_owned());
            return;
        }
        error.set(String::new());
        let existing_id = editing_id.get_untracked();
        let target = existing_id
            .as_ref()
            .map_or_else(|| "/projects".to_owned(), |id| format!("/projects/{id}"));
        let navigate = navigate.clone();
        actions.save(existing_id, current, selected_image(image_input), busy, move || {
            navigate(&target, NavigateOptions::default());
        });
    };

    view! {
        <section class="editor">
            <h1>{move || if editing_id.get().is_some() { "Edit Project" } else { "Add Project" }}</h1>
            {move || match status.get() {
                LoadStatus::Loading => view! { <p class="editor__status">"Loading..."</p> }.into_any(),
                LoadStatus::Failed(msg) => view! { <p class="editor__error">{msg}</p> }.into_any(),
                LoadStatus::Ready if !may_edit() => {
                    view! { <p class="editor__error">"Only the owner can edit this project."</p> }.into_any()
                }
                LoadStatus::Ready => ().into_any(),
            }}
            <Show when=move || status.get() == LoadStatus::Ready && may_edit()>
                <form class="editor__form" on:submit=on_submit.clone()>
                    <label class="editor__field">
                        "Title"
                        <input
                            type="text"
                            prop:value=move || draft.get().title
                            on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                        />
                    </label>
                    <label class="editor__field">
                        "Description"
                        <textarea
                            rows="8"
                            prop:value=move || draft.get().description
                            on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                        ></textarea>
                    </label>
                    <label class="editor__field">
                        "Tech stack (comma separated)"
                        <input
                            type="text"
                            placeholder="Rust, Leptos, Axum"
                            prop:value=move || draft.get().tech_stack
                            on:input=move |ev| draft.update(|d| d.tech_stack = event_target_value(&ev))
                        />
                    </label>
                    <label class="editor__field">
                        "Live link"
                        <input
                            type="url"
                            prop:value=move || draft.get().live_link
                            on:input=move |ev| draft.update(|d| d.live_link = event_target_value(&ev))
                        />
                    </label>
                    <label class="editor__field">
                        "Source link"
                        <input
                            type="url"
                            prop:value=move || draft.get().github_link
                            on:input=move |ev| draft.update(|d| d.github_link = event_target_value(&ev))
                        />
                    </label>
                    <label class="editor__field">
                        "Screenshot"
                        <input type="file" accept="image/*" node_ref=image_input/>
                    </label>
                    <Show when=move || !error.get().is_empty()>
                        <p class="editor__error">{move || error.get()}</p>
                    </Show>
                    <button class="editor__submit" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Saving..." } else { "Save" }}
                    </button>
                </form>
            </Show>
        </section>
    }
}
