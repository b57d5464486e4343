//! Project detail page: description, stats, links, like toggle, owner
//! controls, and comments.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::comment_section::CommentSection;
use crate::components::like_button::{LIKER_PREVIEW_LIMIT, LikeButton};
use crate::components::owner_actions::OwnerActions;
use crate::net::types::{Project, ResourceKind, email_local_part};
use crate::pages::actions::{LoadStatus, ResourceActions};
use crate::util::gate::{LikeAction, has_liked, is_owner, liked_by_summary};

#[component]
pub fn ProjectDetailPage() -> impl IntoView {
    let actions = ResourceActions::for_view();
    let session = actions.session;
    let params = use_params_map();
    let navigate = use_navigate();
    let project = RwSignal::new(None::<Project>);
    let status = RwSignal::new(LoadStatus::Loading);

    // Route changes between projects do not remount this page.
    {
        let actions = actions.clone();
        Effect::new(move || {
            let id = params.read().get("id").unwrap_or_default();
            actions.load_into(id, project, status);
        });
    }

    let apply = move |updated: Project| project.set(Some(updated));

    let on_like = Callback::new({
        let actions = actions.clone();
        move |()| {
            if let Some(current) = project.get_untracked() {
                actions.toggle_like(&current, apply);
            }
        }
    });
    let on_post = Callback::new({
        let actions = actions.clone();
        move |text: String| {
            if let Some(current) = project.get_untracked() {
                actions.comment::<Project, _>(&current.id, &text, apply);
            }
        }
    });
    let on_delete_comment = Callback::new({
        let actions = actions.clone();
        move |index: usize| {
            if let Some(current) = project.get_untracked() {
                actions.delete_comment::<Project, _>(&current.id, index, apply);
            }
        }
    });
    let on_delete = Callback::new({
        let actions = actions.clone();
        move |()| {
            let Some(current) = project.get_untracked() else {
                return;
            };
            let navigate = navigate.clone();
            actions.delete(ResourceKind::Project, &current.id, move || navigate("/projects", NavigateOptions::default()));
        }
    });

    let comments = Signal::derive(move || project.get().map(|p| p.comments).unwrap_or_default());

    view! {
        <article class="detail">
            <A href="/projects" attr:class="detail__back">"← Back to Projects"</A>
            {move || match status.get() {
                LoadStatus::Loading => view! { <p class="detail__status">"Loading..."</p> }.into_any(),
                LoadStatus::Failed(msg) => view! { <p class="detail__error">{msg}</p> }.into_any(),
                LoadStatus::Ready => ().into_any(),
            }}
            {move || {
                let viewer = session.get();
                project.get().map(|p| {
                    let action = if has_liked(&viewer, &p) { LikeAction::Unlike } else { LikeAction::Like };
                    let owned = is_owner(&viewer, &p);
                    let summary = liked_by_summary(&p, LIKER_PREVIEW_LIMIT);
                    let edit_href = format!("/edit-project/{}", p.id);
                    view! {
                        {p.image.clone().map(|src| view! { <img class="detail__image" src=src alt={p.title.clone()}/> })}
                        <h1 class="detail__title">{p.title.clone()}</h1>
                        <p class="detail__meta">{format!("by {}", email_local_part(&p.owner_email))}</p>
                        <ul class="detail__stats">
                            <li>{format!("{} views", p.views)}</li>
                            <li>{format!("{} likes", p.likes)}</li>
                            <li>{format!("{} comments", p.comments.len())}</li>
                        </ul>
                        <div class="detail__body">{p.description.clone()}</div>
                        <ul class="card__tags">
                            {p.tech_stack.clone().into_iter().map(|t| view! { <li class="tag">{t}</li> }).collect_view()}
                        </ul>
                        <div class="detail__links">
                            {p.live_link.clone().filter(|l| !l.is_empty()).map(|href| view! {
                                <a href=href target="_blank" rel="noopener noreferrer">"Live site"</a>
                            })}
                            {p.github_link.clone().filter(|l| !l.is_empty()).map(|href| view! {
                                <a href=href target="_blank" rel="noopener noreferrer">"Source"</a>
                            })}
                        </div>
                        <LikeButton action=action likes=p.likes summary=summary on_toggle=on_like/>
                        <Show when=move || owned>
                            <OwnerActions edit_href=edit_href.clone() label="Project" on_delete=on_delete/>
                        </Show>
                    }
                })
            }}
            <Show when=move || project.get().is_some()>
                <CommentSection comments=comments on_post=on_post on_delete=on_delete_comment/>
            </Show>
        </article>
    }
}
