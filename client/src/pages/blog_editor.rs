//! Add/edit form for blog posts, mounted behind `ProtectedRoute`.
//!
//! `/add-blog` starts from an empty draft; `/edit-blog/:id` loads the post
//! first and only offers the form to its owner.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::net::types::{Blog, BlogDraft, ResourceDraft};
use crate::pages::actions::{LoadStatus, ResourceActions, selected_image};
use crate::util::gate::is_owner;

#[component]
pub fn BlogEditorPage() -> impl IntoView {
    let actions = ResourceActions::for_view();
    let session = actions.session;
    let params = use_params_map();
    let navigate = use_navigate();
    let editing_id = Memo::new(move |_| params.read().get("id"));

    let existing = RwSignal::new(None::<Blog>);
    let status = RwSignal::new(if editing_id.get_untracked().is_some() {
        LoadStatus::Loading
    } else {
        LoadStatus::Ready
    });
    let draft = RwSignal::new(BlogDraft::default());
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
        if let Some(blog) = existing.get() {
            draft.set(BlogDraft::from_blog(&blog));
        }
    });

    // Edit mode is only offered to the owner; add mode to anyone signed in.
    let may_edit = move || match editing_id.get() {
        None => true,
        Some(_) => existing.with(|blog| blog.as_ref().is_some_and(|b| is_owner(&session.get(), b))),
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
            .map_or_else(|| "/blogs".to_owned(), |id| format!("/blogs/{id}"));
        let navigate = navigate.clone();
        actions.save(existing_id, current, selected_image(image_input), busy, move || {
            navigate(&target, NavigateOptions::default());
        });
    };

    view! {
        <section class="editor">
            <h1>{move || if editing_id.get().is_some() { "Edit Blog" } else { "Add Blog" }}</h1>
            {move || match status.get() {
                LoadStatus::Loading => view! { <p class="editor__status">"Loading..."</p> }.into_any(),
                LoadStatus::Failed(msg) => view! { <p class="editor__error">{msg}</p> }.into_any(),
                LoadStatus::Ready if !may_edit() => {
                    view! { <p class="editor__error">"Only the author can edit this blog."</p> }.into_any()
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
                        "Content"
                        <textarea
                            rows="12"
                            prop:value=move || draft.get().content
                            on:input=move |ev| draft.update(|d| d.content = event_target_value(&ev))
                        ></textarea>
                    </label>
                    <label class="editor__field">
                        "Cover image"
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
