//! List cards for blog posts and projects.
//!
//! DESIGN
//! ======
//! Cards are presentational: they read the session for owner and liker
//! decisions and report clicks through callbacks. The owning page performs
//! the request and replaces the resource in its list.

#[cfg(test)]
#[path = "resource_card_test.rs"]
mod resource_card_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::like_button::{LIKER_PREVIEW_LIMIT, LikeButton};
use crate::components::owner_actions::OwnerActions;
use crate::net::types::{Blog, Project, email_local_part};
use crate::state::session::Session;
use crate::util::gate::{LikeAction, has_liked, is_owner, liked_by_summary};

/// First `max_chars` characters of `text`, with an ellipsis when cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head.trim_end())
    } else {
        head
    }
}

fn like_action_for(liked: bool) -> LikeAction {
    if liked { LikeAction::Unlike } else { LikeAction::Like }
}

#[component]
pub fn BlogCard(blog: Blog, on_like: Callback<Blog>, on_delete: Callback<String>) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let viewer = session.get_untracked();
    let owned = is_owner(&viewer, &blog);
    let action = like_action_for(has_liked(&viewer, &blog));
    let summary = liked_by_summary(&blog, LIKER_PREVIEW_LIMIT);
    let href = format!("/blogs/{}", blog.id);
    let edit_href = format!("/edit-blog/{}", blog.id);
    let id = blog.id.clone();
    let likes = blog.likes;
    let author = email_local_part(&blog.owner_email).to_owned();
    let preview = excerpt(&blog.content, 160);
    let title = blog.title.clone();
    let image = blog.image.clone();

    view! {
        <article class="card">
            {image.map(|src| view! { <img class="card__image" src=src alt=""/> })}
            <A href=href attr:class="card__title">{title}</A>
            <p class="card__meta">{format!("by {author}")}</p>
            <p class="card__body">{preview}</p>
            <LikeButton
                action=action
                likes=likes
                summary=summary
                on_toggle=Callback::new(move |()| on_like.run(blog.clone()))
            />
            <Show when=move || owned>
                <OwnerActions
                    edit_href=edit_href.clone()
                    label="Blog"
                    on_delete=Callback::new({
                        let id = id.clone();
                        move |()| on_delete.run(id.clone())
                    })
                />
            </Show>
        </article>
    }
}

#[component]
pub fn ProjectCard(project: Project, on_like: Callback<Project>, on_delete: Callback<String>) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let viewer = session.get_untracked();
    let owned = is_owner(&viewer, &project);
    let action = like_action_for(has_liked(&viewer, &project));
    let summary = liked_by_summary(&project, LIKER_PREVIEW_LIMIT);
    let href = format!("/projects/{}", project.id);
    let edit_href = format!("/edit-project/{}", project.id);
    let id = project.id.clone();
    let likes = project.likes;
    let preview = excerpt(&project.description, 140);
    let title = project.title.clone();
    let image = project.image.clone();
    let tech = project.tech_stack.clone();

    view! {
        <article class="card">
            {image.map(|src| view! { <img class="card__image" src=src alt=""/> })}
            <A href=href attr:class="card__title">{title}</A>
            <p class="card__body">{preview}</p>
            <ul class="card__tags">
                {tech.into_iter().map(|t| view! { <li class="tag">{t}</li> }).collect_view()}
            </ul>
            <LikeButton
                action=action
                likes=likes
                summary=summary
                on_toggle=Callback::new(move |()| on_like.run(project.clone()))
            />
            <Show when=move || owned>
                <OwnerActions
                    edit_href=edit_href.clone()
                    label="Project"
                    on_delete=Callback::new({
                        let id = id.clone();
                        move |()| on_delete.run(id.clone())
                    })
                />
            </Show>
        </article>
    }
}
