//! Load, save, like, comment, and delete flows shared by the resource pages.
//!
//! DESIGN
//! ======
//! Each flow takes a per-resource ticket from the view's `MutationGuard` and
//! hands the server's updated resource to an `apply` callback only if the
//! ticket is still current and the view is still mounted. Mutations also hold
//! the resource's in-flight slot until their response is handled, so repeat
//! clicks while a request is pending are ignored. Failures become toasts; the
//! previously rendered state stays.

use leptos::prelude::*;
use serde::de::DeserializeOwned;

use crate::app::AppIdentity;
use crate::components::toaster::{report_error, report_success};
use crate::net::api::{ApiClient, ImageUpload};
use crate::net::types::{OwnedResource, ResourceDraft, ResourceKind};
use crate::state::mutations::{MutationGuard, PendingMutation};
use crate::state::session::Session;
use crate::state::toast::ToastState;
use crate::util::gate::like_action;
use crate::util::task::spawn_browser_task;

/// Progress of a detail page's initial fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Load-scope key shared by every detail fetch of one view.
const DETAIL_LOAD_KEY: &str = "detail";

#[derive(Clone)]
pub(crate) struct ResourceActions {
    pub session: RwSignal<Session>,
    pub toasts: RwSignal<ToastState>,
    pub identity: AppIdentity,
    pub api: ApiClient,
    pub guard: MutationGuard,
}

impl ResourceActions {
    /// Collect app contexts and end the guard when the calling view unmounts.
    pub fn for_view() -> Self {
        let guard = MutationGuard::new();
        let cleanup = guard.clone();
        on_cleanup(move || cleanup.end());
        Self {
            session: expect_context::<RwSignal<Session>>(),
            toasts: expect_context::<RwSignal<ToastState>>(),
            identity: expect_context::<AppIdentity>(),
            api: expect_context::<ApiClient>(),
            guard,
        }
    }

    /// Fetch resource `id` into `target`. A newer load supersedes an older one.
    pub fn load_into<R>(&self, id: String, target: RwSignal<Option<R>>, status: RwSignal<LoadStatus>)
    where
        R: OwnedResource + DeserializeOwned + Send + Sync + 'static,
    {
        status.set(LoadStatus::Loading);
        let ticket = self.guard.begin_load(DETAIL_LOAD_KEY);
        let this = self.clone();
        spawn_browser_task(async move {
            let result = this.api.get::<R>(&id).await;
            if !this.guard.should_apply(&ticket) {
                return;
            }
            match result {
                Ok(resource) => {
                    target.set(Some(resource));
                    status.set(LoadStatus::Ready);
                }
                Err(err) => {
                    leptos::logging::warn!("{} {id} failed to load: {err}", R::KIND.label());
                    target.set(None);
                    status.set(LoadStatus::Failed(err.user_message(&format!("{} not found", R::KIND.label()))));
                }
            }
        });
    }

    /// In-flight slot for `resource_id`, or `None` while a mutation is pending.
    fn claim(&self, resource_id: &str) -> Option<PendingMutation> {
        let pending = self.guard.try_begin(resource_id);
        if pending.is_none() {
            leptos::logging::log!("ignoring repeat action on {resource_id} while a request is pending");
        }
        pending
    }

    /// Like or unlike `resource` depending on whether the viewer already does.
    pub fn toggle_like<R, F>(&self, resource: &R, apply: F)
    where
        R: OwnedResource + DeserializeOwned + 'static,
        F: Fn(R) + 'static,
    {
        let action = match like_action(&self.session.get_untracked(), resource) {
            Ok(action) => action,
            Err(err) => {
                report_error(self.toasts, &err, "Like failed");
                return;
            }
        };
        let Some(pending) = self.claim(resource.id()) else {
            return;
        };
        let this = self.clone();
        spawn_browser_task(async move {
            let result = this
                .api
                .toggle_like::<R, _>(&this.identity, pending.resource_id(), action)
                .await;
            if !this.guard.should_apply(pending.ticket()) {
                return;
            }
            match result {
                Ok(updated) => apply(updated),
                Err(err) => report_error(this.toasts, &err, &format!("{} failed", action.label())),
            }
        });
    }

    /// Post `text` as a comment. Blank text is ignored.
    pub fn comment<R, F>(&self, resource_id: &str, text: &str, apply: F)
    where
        R: OwnedResource + DeserializeOwned + 'static,
        F: Fn(R) + 'static,
    {
        let text = text.trim().to_owned();
        if text.is_empty() {
            return;
        }
        let Some(pending) = self.claim(resource_id) else {
            return;
        };
        let this = self.clone();
        spawn_browser_task(async move {
            let result = this
                .api
                .comment::<R, _>(&this.identity, pending.resource_id(), &text)
                .await;
            if !this.guard.should_apply(pending.ticket()) {
                return;
            }
            match result {
                Ok(updated) => apply(updated),
                Err(err) => report_error(this.toasts, &err, "Comment failed"),
            }
        });
    }

    pub fn delete_comment<R, F>(&self, resource_id: &str, index: usize, apply: F)
    where
        R: OwnedResource + DeserializeOwned + 'static,
        F: Fn(R) + 'static,
    {
        let Some(pending) = self.claim(resource_id) else {
            return;
        };
        let this = self.clone();
        spawn_browser_task(async move {
            let result = this
                .api
                .delete_comment::<R, _>(&this.identity, pending.resource_id(), index)
                .await;
            if !this.guard.should_apply(pending.ticket()) {
                return;
            }
            match result {
                Ok(updated) => apply(updated),
                Err(err) => report_error(this.toasts, &err, "Delete comment failed"),
            }
        });
    }

    /// Create or update from `draft`; `on_saved` runs after the server confirms.
    pub fn save<D, F>(&self, existing_id: Option<String>, draft: D, image: Option<ImageUpload>, busy: RwSignal<bool>, on_saved: F)
    where
        D: ResourceDraft + 'static,
        F: Fn() + 'static,
    {
        busy.set(true);
        let this = self.clone();
        spawn_browser_task(async move {
            let result = this
                .api
                .save(&this.identity, existing_id.as_deref(), &draft, image)
                .await;
            if !this.guard.is_alive() {
                return;
            }
            busy.set(false);
            match result {
                Ok(()) => {
                    let verb = if existing_id.is_some() { "updated" } else { "added" };
                    report_success(this.toasts, format!("{} {verb}", D::KIND.label()));
                    on_saved();
                }
                Err(err) => report_error(this.toasts, &err, "Save failed"),
            }
        });
    }

    /// Delete a resource; `on_deleted` runs after the server confirms.
    pub fn delete<F>(&self, kind: ResourceKind, id: &str, on_deleted: F)
    where
        F: Fn() + 'static,
    {
        let Some(pending) = self.claim(id) else {
            return;
        };
        let this = self.clone();
        spawn_browser_task(async move {
            let result = this
                .api
                .delete(&this.identity, kind, pending.resource_id())
                .await;
            if !this.guard.should_apply(pending.ticket()) {
                return;
            }
            match result {
                Ok(()) => {
                    report_success(this.toasts, format!("{} deleted", kind.label()));
                    on_deleted();
                }
                Err(err) => report_error(this.toasts, &err, "Delete failed"),
            }
        });
    }
}

/// Image chosen in an editor's file input, read at submit time.
pub(crate) fn selected_image(input: NodeRef<leptos::html::Input>) -> Option<ImageUpload> {
    #[cfg(feature = "hydrate")]
    {
        input.get_untracked()?.files()?.get(0)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = input;
        None
    }
}
