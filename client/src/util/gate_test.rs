use super::*;
use crate::net::fake_identity::identity;
use crate::net::types::{Blog, LikeEntry, Project};

fn session(uid: Option<&str>, resolving: bool) -> Session {
    Session { identity: uid.map(|uid| identity(uid, &format!("{uid}@x.com"))), resolving }
}

fn like(uid: &str) -> LikeEntry {
    LikeEntry { uid: uid.to_owned(), email: format!("{uid}@x.com") }
}

fn blog(owner_uid: &str, liked_by: Vec<LikeEntry>) -> Blog {
    Blog {
        id: "b1".to_owned(),
        title: "Post".to_owned(),
        content: "Body".to_owned(),
        image: None,
        owner_uid: owner_uid.to_owned(),
        owner_email: format!("{owner_uid}@x.com"),
        likes: i64::try_from(liked_by.len()).unwrap(),
        liked_by,
        comments: Vec::new(),
    }
}

fn project(owner_uid: &str, liked_by: Vec<LikeEntry>) -> Project {
    Project {
        id: "p1".to_owned(),
        title: "Folio".to_owned(),
        description: "Site".to_owned(),
        tech_stack: vec!["Rust".to_owned()],
        live_link: None,
        github_link: None,
        image: None,
        owner_uid: owner_uid.to_owned(),
        owner_email: format!("{owner_uid}@x.com"),
        views: 0,
        likes: 0,
        liked_by,
        comments: Vec::new(),
    }
}

// =============================================================
// Protected routes
// =============================================================

#[test]
fn resolving_sessions_never_enter_or_redirect() {
    for uid in [None, Some("u1")] {
        let s = session(uid, true);
        assert!(!can_enter_protected_route(&s));
        assert_eq!(route_decision(&s), RouteDecision::Wait);
    }
}

#[test]
fn resolved_anonymous_redirects_to_login() {
    let s = session(None, false);
    assert!(!can_enter_protected_route(&s));
    assert_eq!(route_decision(&s), RouteDecision::RedirectToLogin);
}

#[test]
fn resolved_authenticated_enters() {
    let s = session(Some("u1"), false);
    assert!(can_enter_protected_route(&s));
    assert_eq!(route_decision(&s), RouteDecision::Enter);
}

#[test]
fn scenario_anonymous_refresh_waits_then_redirects() {
    let mut s = Session::default();
    assert_eq!(route_decision(&s), RouteDecision::Wait);
    s.apply_provider_state(None);
    assert_eq!(route_decision(&s), RouteDecision::RedirectToLogin);
}

#[test]
fn scenario_signed_in_refresh_waits_then_enters() {
    let mut s = Session::default();
    assert_eq!(route_decision(&s), RouteDecision::Wait);
    s.apply_provider_state(Some(identity("u1", "a@x.com")));
    assert_eq!(route_decision(&s), RouteDecision::Enter);
}

// =============================================================
// Ownership and likes
// =============================================================

#[test]
fn anonymous_viewer_never_owns_even_ownerless_resources() {
    for resolving in [true, false] {
        let s = session(None, resolving);
        assert!(!is_owner(&s, &blog("", Vec::new())));
        assert!(!is_owner(&s, &blog("u1", Vec::new())));
        assert!(!has_liked(&s, &blog("u1", vec![like("u1")])));
    }
}

#[test]
fn owner_viewer_sees_owner_controls_but_has_not_liked() {
    let s = session(Some("u1"), false);
    let resource = blog("u1", vec![like("u2")]);
    assert!(is_owner(&s, &resource));
    assert!(!has_liked(&s, &resource));
}

#[test]
fn liking_viewer_is_not_owner() {
    let s = session(Some("u2"), false);
    let resource = blog("u1", vec![like("u2")]);
    assert!(!is_owner(&s, &resource));
    assert!(has_liked(&s, &resource));
}

#[test]
fn has_liked_ignores_liker_order() {
    let s = session(Some("u2"), false);
    let orders = [
        vec![like("u1"), like("u2"), like("u3")],
        vec![like("u3"), like("u1"), like("u2")],
        vec![like("u2"), like("u3"), like("u1")],
    ];
    for likers in orders {
        assert!(has_liked(&s, &project("u9", likers)));
    }
}

#[test]
fn like_action_toggles_for_both_resource_kinds() {
    let s = session(Some("u2"), false);
    assert_eq!(like_action(&s, &blog("u1", Vec::new())), Ok(LikeAction::Like));
    assert_eq!(like_action(&s, &blog("u1", vec![like("u2")])), Ok(LikeAction::Unlike));
    assert_eq!(like_action(&s, &project("u1", Vec::new())), Ok(LikeAction::Like));
    assert_eq!(like_action(&s, &project("u1", vec![like("u2")])), Ok(LikeAction::Unlike));
}

#[test]
fn like_action_requires_identity() {
    let s = session(None, false);
    assert_eq!(like_action(&s, &blog("u1", Vec::new())), Err(ActionError::AuthRequired));
}

#[test]
fn logout_mid_request_reevaluates_against_anonymous_session() {
    let mut s = session(Some("u1"), false);
    let before = blog("u1", Vec::new());
    assert!(is_owner(&s, &before));

    s.apply_provider_state(None);
    let response = blog("u1", vec![like("u1")]);

    assert!(!is_owner(&s, &response));
    assert!(!has_liked(&s, &response));
}

#[test]
fn comment_author_check_matches_uid() {
    let comment = Comment { uid: "u2".to_owned(), email: "u2@x.com".to_owned(), text: "hi".to_owned() };
    assert!(is_comment_author(&session(Some("u2"), false), &comment));
    assert!(!is_comment_author(&session(Some("u1"), false), &comment));
    assert!(!is_comment_author(&session(None, false), &comment));
}

#[test]
fn liked_by_summary_truncates_after_limit() {
    let resource = blog("u9", vec![like("ann"), like("bob"), like("cy"), like("dee")]);
    assert_eq!(liked_by_summary(&resource, 3), Some("Liked by ann, bob, cy & others".to_owned()));
    assert_eq!(liked_by_summary(&resource, 4), Some("Liked by ann, bob, cy, dee".to_owned()));
    assert_eq!(liked_by_summary(&blog("u9", Vec::new()), 3), None);
}

#[test]
fn like_action_labels_and_segments() {
    assert_eq!(LikeAction::Like.path_segment(), "like");
    assert_eq!(LikeAction::Unlike.path_segment(), "unlike");
    assert_eq!(LikeAction::Unlike.label(), "Unlike");
}
