//! Comment list and composer for a resource detail page.
//!
//! DESIGN
//! ======
//! Only signed-in users get the composer. The delete control shows on a
//! comment only for its author. Both are display decisions; the backend
//! re-checks on every call.

use leptos::prelude::*;

use crate::net::types::{Comment, email_local_part};
use crate::state::session::Session;
use crate::util::gate::is_comment_author;

#[component]
pub fn CommentSection(
    #[prop(into)] comments: Signal<Vec<Comment>>,
    on_post: Callback<String>,
    on_delete: Callback<usize>,
) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let draft = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = draft.get();
        if text.trim().is_empty() {
            return;
        }
        on_post.run(text);
        draft.set(String::new());
    };

    view! {
        <section class="comments">
            <h2>{move || format!("Comments ({})", comments.get().len())}</h2>
            <Show
                when=move || session.get().identity.is_some()
                fallback=|| view! { <p class="comments__hint">"Login to comment."</p> }
            >
                <form class="comments__form" on:submit=on_submit>
                    <textarea
                        class="comments__input"
                        placeholder="Write a comment..."
                        prop:value=move || draft.get()
                        on:input=move |ev| draft.set(event_target_value(&ev))
                    ></textarea>
                    <button class="comments__post" type="submit">"Post"</button>
                </form>
            </Show>
            <ul class="comments__list">
                {move || {
                    let viewer = session.get();
                    comments
                        .get()
                        .into_iter()
                        .enumerate()
                        .map(|(index, comment)| {
                            let mine = is_comment_author(&viewer, &comment);
                            view! {
                                <li class="comment">
                                    <span class="comment__author">{email_local_part(&comment.email).to_owned()}</span>
                                    <p class="comment__text">{comment.text}</p>
                                    <Show when=move || mine>
                                        <button
                                            class="comment__delete"
                                            on:click=move |_| on_delete.run(index)
                                        >
                                            "Delete"
                                        </button>
                                    </Show>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </section>
    }
}
