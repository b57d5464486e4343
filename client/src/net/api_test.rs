use futures::executor::block_on;

use super::*;
use crate::net::fake_identity::{FakeIdentity, identity};
use crate::net::types::{Blog, BlogDraft, Project};

fn client() -> ApiClient {
    ApiClient::new("https://api.folio.dev/")
}

#[test]
fn endpoints_follow_collection_layout() {
    let api = client();
    assert_eq!(api.collection_endpoint(ResourceKind::Blog), "https://api.folio.dev/api/blogs");
    assert_eq!(api.item_endpoint(ResourceKind::Project, "p1"), "https://api.folio.dev/api/projects/p1");
    assert_eq!(
        api.like_endpoint(ResourceKind::Blog, "b1", LikeAction::Like),
        "https://api.folio.dev/api/blogs/like/b1"
    );
    assert_eq!(
        api.like_endpoint(ResourceKind::Project, "p1", LikeAction::Unlike),
        "https://api.folio.dev/api/projects/unlike/p1"
    );
    assert_eq!(
        api.comment_endpoint(ResourceKind::Blog, "b1"),
        "https://api.folio.dev/api/blogs/comment/b1"
    );
    assert_eq!(
        api.comment_item_endpoint(ResourceKind::Project, "p1", 2),
        "https://api.folio.dev/api/projects/comment/p1/2"
    );
}

#[test]
fn client_uses_configured_origin() {
    let api = ApiClient::from_config(&AppConfig::default());
    assert_eq!(api.collection_endpoint(ResourceKind::Blog), "http://localhost:5000/api/blogs");
}

#[test]
fn server_message_is_optional() {
    let body: ServerMessage = serde_json::from_str(r#"{"message":"Already liked"}"#).unwrap();
    assert_eq!(body.message.as_deref(), Some("Already liked"));
    let empty: ServerMessage = serde_json::from_str("{}").unwrap();
    assert_eq!(empty.message, None);
}

#[test]
fn comment_body_serializes_text_only() {
    let json = serde_json::to_string(&CommentBody { text: "Nice post" }).unwrap();
    assert_eq!(json, r#"{"text":"Nice post"}"#);
}

#[test]
fn mutations_require_sign_in_before_any_request() {
    let api = client();
    let provider = FakeIdentity::new();
    provider.emit(None);

    let like = block_on(api.toggle_like::<Blog, _>(&provider, "b1", LikeAction::Like));
    assert_eq!(like, Err(ActionError::AuthRequired));

    let comment = block_on(api.comment::<Project, _>(&provider, "p1", "hi"));
    assert_eq!(comment, Err(ActionError::AuthRequired));

    let delete = block_on(api.delete(&provider, ResourceKind::Blog, "b1"));
    assert_eq!(delete, Err(ActionError::AuthRequired));

    let save = block_on(api.save(&provider, None, &BlogDraft::default(), None));
    assert_eq!(save, Err(ActionError::AuthRequired));
}

#[test]
fn each_mutation_fetches_its_own_token() {
    let api = client();
    let provider = FakeIdentity::new();
    provider.emit(Some(identity("u1", "ada@example.com")));

    let _ = block_on(api.toggle_like::<Blog, _>(&provider, "b1", LikeAction::Like));
    let _ = block_on(api.delete_comment::<Blog, _>(&provider, "b1", 0));
    let _ = block_on(api.save(&provider, Some("b1"), &BlogDraft::default(), None));

    assert_eq!(provider.token_requests(), vec![false, false, true]);
}
