//! Blog detail page: full post, like toggle, owner controls, and comments.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::comment_section::CommentSection;
use crate::components::like_button::{LIKER_PREVIEW_LIMIT, LikeButton};
use crate::components::owner_actions::OwnerActions;
use crate::net::types::{Blog, ResourceKind, email_local_part};
use crate::pages::actions::{LoadStatus, ResourceActions};
use crate::util::gate::{LikeAction, has_liked, is_owner, liked_by_summary};

#[component]
pub fn BlogDetailPage() -> impl IntoView {
    let actions = ResourceActions::for_view();
    let session = actions.session;
    let params = use_params_map();
    let navigate = use_navigate();
    let blog = RwSignal::new(None::<Blog>);
    let status = RwSignal::new(LoadStatus::Loading);

    // Route changes between posts do not remount this page.
    {
        let actions = actions.clone();
        Effect::new(move || {
            let id = params.read().get("id").unwrap_or_default();
            actions.load_into(id, blog, status);
        });
    }

    let apply = move |updated: Blog| blog.set(Some(updated));

    let on_like = Callback::new({
        let actions = actions.clone();
        move |()| {
            if let Some(current) = blog.get_untracked() {
                actions.toggle_like(&current, apply);
            }
        }
    });
    let on_post = Callback::new({
        let actions = actions.clone();
        move |text: String| {
            if let Some(current) = blog.get_untracked() {
                actions.comment::<Blog, _>(&current.id, &text, apply);
            }
        }
    });
    let on_delete_comment = Callback::new({
        let actions = actions.clone();
        move |index: usize| {
            if let Some(current) = blog.get_untracked() {
                actions.delete_comment::<Blog, _>(&current.id, index, apply);
            }
        }
    });
    let on_delete = Callback::new({
        let actions = actions.clone();
        move |()| {
            let Some(current) = blog.get_untracked() else {
                return;
            };
            let navigate = navigate.clone();
            actions.delete(ResourceKind::Blog, &current.id, move || navigate("/blogs", NavigateOptions::default()));
        }
    });

    let comments = Signal::derive(move || blog.get().map(|b| b.comments).unwrap_or_default());

    view! {
        <article class="detail">
            <A href="/blogs" attr:class="detail__back">"← Back to Blogs"</A>
            {move || match status.get() {
                LoadStatus::Loading => view! { <p class="detail__status">"Loading..."</p> }.into_any(),
                LoadStatus::Failed(msg) => view! { <p class="detail__error">{msg}</p> }.into_any(),
                LoadStatus::Ready => ().into_any(),
            }}
            {move || {
                let viewer = session.get();
                blog.get().map(|b| {
                    let action = if has_liked(&viewer, &b) { LikeAction::Unlike } else { LikeAction::Like };
                    let owned = is_owner(&viewer, &b);
                    let summary = liked_by_summary(&b, LIKER_PREVIEW_LIMIT);
                    let edit_href = format!("/edit-blog/{}", b.id);
                    view! {
                        {b.image.clone().map(|src| view! { <img class="detail__image" src=src alt={b.title.clone()}/> })}
                        <h1 class="detail__title">{b.title.clone()}</h1>
                        <p class="detail__meta">{format!("by {}", email_local_part(&b.owner_email))}</p>
                        <div class="detail__body">{b.content.clone()}</div>
                        <LikeButton action=action likes=b.likes summary=summary on_toggle=on_like/>
                        <Show when=move || owned>
                            <OwnerActions edit_href=edit_href.clone() label="Blog" on_delete=on_delete/>
                        </Show>
                    }
                })
            }}
            <Show when=move || blog.get().is_some()>
                <CommentSection comments=comments on_post=on_post on_delete=on_delete_comment/>
            </Show>
        </article>
    }
}
