//! Like toggle with count and liker preview.
//!
//! The control renders for everyone. Pressing it while signed out produces a
//! "Login required" toast from the action layer instead of a request.

use leptos::prelude::*;

use crate::util::gate::LikeAction;

/// Likers named in the "Liked by ..." preview.
pub const LIKER_PREVIEW_LIMIT: usize = 3;

#[component]
pub fn LikeButton(
    /// The action pressing the button performs for the current viewer.
    action: LikeAction,
    likes: i64,
    summary: Option<String>,
    on_toggle: Callback<()>,
) -> impl IntoView {
    let liked = action == LikeAction::Unlike;

    view! {
        <div class="like">
            <button
                class="like__button"
                class:like__button--liked=liked
                aria-pressed=if liked { "true" } else { "false" }
                on:click=move |ev: leptos::ev::MouseEvent| {
                    ev.stop_propagation();
                    on_toggle.run(());
                }
            >
                {if liked { "♥ Liked" } else { "♡ Like" }}
            </button>
            <span class="like__count">{format!("{likes} Likes")}</span>
            {summary.map(|text| view! { <p class="like__summary">{text}</p> })}
        </div>
    }
}
