//! REST client for the blog/project backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): reads and writes fail with a network error since the
//! backend is only reached from the browser.
//!
//! DESIGN
//! ======
//! Reads are anonymous. Every mutating call asks the identity provider for a
//! bearer token right before the request; a missing identity surfaces as
//! `ActionError::AuthRequired` without touching the network. Like, unlike,
//! and comment calls return the updated resource so callers can replace
//! their copy wholesale.
//!
//! ERROR HANDLING
//! ==============
//! Non-success statuses go through `ActionError::from_status` together with
//! the server's `message` field when the body carries one.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;

use super::identity::IdentityProvider;
use super::types::{OwnedResource, ResourceDraft, ResourceKind};
use crate::config::AppConfig;
use crate::error::ActionError;
use crate::util::gate::LikeAction;

/// Image file picked in an editor form.
#[cfg(feature = "hydrate")]
pub type ImageUpload = web_sys::File;
/// Image file picked in an editor form.
#[cfg(not(feature = "hydrate"))]
pub type ImageUpload = ();

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, serde::Deserialize)]
struct ServerMessage {
    #[serde(default)]
    message: Option<String>,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, serde::Serialize)]
struct CommentBody<'a> {
    text: &'a str,
}

#[cfg(not(feature = "hydrate"))]
fn unavailable() -> ActionError {
    ActionError::network("not available on server")
}

#[cfg(feature = "hydrate")]
fn js_error(err: &wasm_bindgen::JsValue) -> ActionError {
    ActionError::network(format!("{err:?}"))
}

#[cfg(feature = "hydrate")]
async fn check(sent: Result<gloo_net::http::Response, gloo_net::Error>) -> Result<gloo_net::http::Response, ActionError> {
    let resp = sent.map_err(|e| ActionError::network(e.to_string()))?;
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let message = resp
        .json::<ServerMessage>()
        .await
        .ok()
        .and_then(|body| body.message);
    Err(ActionError::from_status(status, message))
}

#[cfg(feature = "hydrate")]
async fn read_json<T: DeserializeOwned>(sent: Result<gloo_net::http::Response, gloo_net::Error>) -> Result<T, ActionError> {
    let resp = check(sent).await?;
    resp.json::<T>()
        .await
        .map_err(|e| ActionError::network(e.to_string()))
}

/// HTTP client bound to one backend origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_owned() }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn collection_endpoint(&self, kind: ResourceKind) -> String {
        format!("{}/api/{}", self.base_url, kind.collection())
    }

    pub fn item_endpoint(&self, kind: ResourceKind, id: &str) -> String {
        format!("{}/{id}", self.collection_endpoint(kind))
    }

    pub fn like_endpoint(&self, kind: ResourceKind, id: &str, action: LikeAction) -> String {
        format!("{}/{}/{id}", self.collection_endpoint(kind), action.path_segment())
    }

    pub fn comment_endpoint(&self, kind: ResourceKind, id: &str) -> String {
        format!("{}/comment/{id}", self.collection_endpoint(kind))
    }

    pub fn comment_item_endpoint(&self, kind: ResourceKind, id: &str, index: usize) -> String {
        format!("{}/{index}", self.comment_endpoint(kind, id))
    }

    /// `Authorization` header value for the signed-in identity.
    async fn bearer<P: IdentityProvider>(provider: &P, force_refresh: bool) -> Result<String, ActionError> {
        let token = provider.id_token(force_refresh).await?;
        Ok(format!("Bearer {token}"))
    }

    /// Fetch every resource of type `T`.
    ///
    /// # Errors
    ///
    /// `NetworkOrServer` when the request fails.
    pub async fn list<T: OwnedResource + DeserializeOwned>(&self) -> Result<Vec<T>, ActionError> {
        let url = self.collection_endpoint(T::KIND);
        #[cfg(feature = "hydrate")]
        {
            read_json(gloo_net::http::Request::get(&url).send().await).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = url;
            Err(unavailable())
        }
    }

    /// Fetch one resource of type `T`.
    ///
    /// # Errors
    ///
    /// `NetworkOrServer` when the request fails or the id is unknown.
    pub async fn get<T: OwnedResource + DeserializeOwned>(&self, id: &str) -> Result<T, ActionError> {
        let url = self.item_endpoint(T::KIND, id);
        #[cfg(feature = "hydrate")]
        {
            read_json(gloo_net::http::Request::get(&url).send().await).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = url;
            Err(unavailable())
        }
    }

    /// Create (`existing_id == None`) or update a resource from `draft`.
    ///
    /// # Errors
    ///
    /// `AuthRequired` when nobody is signed in, otherwise the mapped HTTP failure.
    pub async fn save<D: ResourceDraft, P: IdentityProvider>(
        &self,
        provider: &P,
        existing_id: Option<&str>,
        draft: &D,
        image: Option<ImageUpload>,
    ) -> Result<(), ActionError> {
        let bearer = Self::bearer(provider, true).await?;
        let url = match existing_id {
            Some(id) => self.item_endpoint(D::KIND, id),
            None => self.collection_endpoint(D::KIND),
        };
        #[cfg(feature = "hydrate")]
        {
            let form = web_sys::FormData::new().map_err(|e| js_error(&e))?;
            for (name, value) in draft.form_fields() {
                form.append_with_str(name, &value).map_err(|e| js_error(&e))?;
            }
            if let Some(file) = image {
                form.append_with_blob("image", &file).map_err(|e| js_error(&e))?;
            }
            let builder = if existing_id.is_some() {
                gloo_net::http::Request::put(&url)
            } else {
                gloo_net::http::Request::post(&url)
            };
            let request = builder
                .header("Authorization", &bearer)
                .body(form)
                .map_err(|e| ActionError::network(e.to_string()))?;
            check(request.send().await).await.map(|_| ())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (bearer, url, draft, image);
            Err(unavailable())
        }
    }

    /// # Errors
    ///
    /// `AuthRequired` when nobody is signed in, otherwise the mapped HTTP failure.
    pub async fn delete<P: IdentityProvider>(&self, provider: &P, kind: ResourceKind, id: &str) -> Result<(), ActionError> {
        let bearer = Self::bearer(provider, false).await?;
        let url = self.item_endpoint(kind, id);
        #[cfg(feature = "hydrate")]
        {
            let sent = gloo_net::http::Request::delete(&url)
                .header("Authorization", &bearer)
                .send()
                .await;
            check(sent).await.map(|_| ())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (bearer, url);
            Err(unavailable())
        }
    }

    /// Issue the like or unlike request chosen by `util::gate::like_action`.
    ///
    /// # Errors
    ///
    /// `AuthRequired` when nobody is signed in, `AlreadyDone` on a duplicate,
    /// otherwise the mapped HTTP failure.
    pub async fn toggle_like<R: OwnedResource + DeserializeOwned, P: IdentityProvider>(
        &self,
        provider: &P,
        id: &str,
        action: LikeAction,
    ) -> Result<R, ActionError> {
        let bearer = Self::bearer(provider, false).await?;
        let url = self.like_endpoint(R::KIND, id, action);
        #[cfg(feature = "hydrate")]
        {
            let sent = gloo_net::http::Request::patch(&url)
                .header("Authorization", &bearer)
                .send()
                .await;
            read_json(sent).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (bearer, url);
            Err(unavailable())
        }
    }

    /// Append a comment and return the updated resource.
    ///
    /// # Errors
    ///
    /// `AuthRequired` when nobody is signed in, otherwise the mapped HTTP failure.
    pub async fn comment<R: OwnedResource + DeserializeOwned, P: IdentityProvider>(
        &self,
        provider: &P,
        id: &str,
        text: &str,
    ) -> Result<R, ActionError> {
        let bearer = Self::bearer(provider, false).await?;
        let url = self.comment_endpoint(R::KIND, id);
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::post(&url)
                .header("Authorization", &bearer)
                .json(&CommentBody { text })
                .map_err(|e| ActionError::network(e.to_string()))?;
            read_json(request.send().await).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (bearer, url, text);
            Err(unavailable())
        }
    }

    /// Remove the comment at `index` and return the updated resource.
    ///
    /// # Errors
    ///
    /// `AuthRequired` when nobody is signed in, otherwise the mapped HTTP failure.
    pub async fn delete_comment<R: OwnedResource + DeserializeOwned, P: IdentityProvider>(
        &self,
        provider: &P,
        id: &str,
        index: usize,
    ) -> Result<R, ActionError> {
        let bearer = Self::bearer(provider, false).await?;
        let url = self.comment_item_endpoint(R::KIND, id, index);
        #[cfg(feature = "hydrate")]
        {
            let sent = gloo_net::http::Request::delete(&url)
                .header("Authorization", &bearer)
                .send()
                .await;
            read_json(sent).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (bearer, url);
            Err(unavailable())
        }
    }
}
