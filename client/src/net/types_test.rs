use super::*;

#[test]
fn blog_deserializes_backend_field_names() {
    let blog: Blog = serde_json::from_value(serde_json::json!({
        "_id": "b1",
        "title": "Hello",
        "content": "Body",
        "authorId": "u1",
        "authorEmail": "a@x.com",
        "likes": 2,
        "likedBy": [{ "uid": "u2", "email": "b@x.com" }],
        "comments": [{ "uid": "u3", "email": "c@x.com", "text": "nice" }]
    }))
    .unwrap();
    assert_eq!(blog.id, "b1");
    assert_eq!(blog.owner_uid, "u1");
    assert_eq!(blog.owner_email, "a@x.com");
    assert_eq!(blog.liked_by.len(), 1);
    assert_eq!(blog.comments[0].text, "nice");
    assert_eq!(blog.image, None);
}

#[test]
fn blog_missing_collections_default_to_empty() {
    let blog: Blog = serde_json::from_value(serde_json::json!({
        "_id": "b1",
        "title": "Hello"
    }))
    .unwrap();
    assert!(blog.liked_by.is_empty());
    assert!(blog.comments.is_empty());
    assert_eq!(blog.likes, 0);
    assert_eq!(blog.owner_uid, "");
}

#[test]
fn project_accepts_owner_id_alias() {
    let project: Project = serde_json::from_value(serde_json::json!({
        "_id": "p1",
        "title": "Folio",
        "description": "Site",
        "techStack": ["Rust", "Leptos"],
        "ownerId": "u9",
        "views": 12
    }))
    .unwrap();
    assert_eq!(project.owner_uid, "u9");
    assert_eq!(project.tech_stack, vec!["Rust".to_owned(), "Leptos".to_owned()]);
    assert_eq!(project.views, 12);
    assert_eq!(<Project as OwnedResource>::KIND, ResourceKind::Project);
}

#[test]
fn identity_initial_and_short_name() {
    let identity = UserIdentity {
        uid: "u1".to_owned(),
        email: "alice@example.com".to_owned(),
        display_image_url: None,
    };
    assert_eq!(identity.initial(), "A");
    assert_eq!(identity.short_name(), "alice");
}

#[test]
fn identity_initial_falls_back_for_empty_email() {
    let identity = UserIdentity { uid: "u1".to_owned(), email: String::new(), display_image_url: None };
    assert_eq!(identity.initial(), "?");
}

#[test]
fn parse_tech_stack_trims_and_drops_empty_entries() {
    assert_eq!(
        parse_tech_stack(" React, Node ,, MongoDB ,"),
        vec!["React".to_owned(), "Node".to_owned(), "MongoDB".to_owned()]
    );
    assert!(parse_tech_stack(" , ").is_empty());
}

#[test]
fn blog_draft_requires_title_and_content() {
    let mut draft = BlogDraft::default();
    assert_eq!(draft.validate(), Err("Title is required."));
    draft.title = "T".to_owned();
    assert_eq!(draft.validate(), Err("Content is required."));
    draft.content = "  body ".to_owned();
    assert_eq!(draft.validate(), Ok(()));
    assert_eq!(
        draft.form_fields(),
        vec![("title", "T".to_owned()), ("content", "body".to_owned())]
    );
}

#[test]
fn project_draft_normalizes_tech_stack_field() {
    let draft = ProjectDraft {
        title: "Folio".to_owned(),
        description: "Portfolio".to_owned(),
        tech_stack: "Rust , Leptos,".to_owned(),
        live_link: String::new(),
        github_link: " https://github.com/x/y ".to_owned(),
    };
    assert_eq!(draft.validate(), Ok(()));
    let fields = draft.form_fields();
    assert!(fields.contains(&("techStack", "Rust,Leptos".to_owned())));
    assert!(fields.contains(&("githubLink", "https://github.com/x/y".to_owned())));
}

#[test]
fn project_draft_rejects_empty_tech_stack() {
    let draft = ProjectDraft {
        title: "Folio".to_owned(),
        description: "Portfolio".to_owned(),
        tech_stack: " , ".to_owned(),
        ..ProjectDraft::default()
    };
    assert_eq!(draft.validate(), Err("List at least one technology."));
}

#[test]
fn project_draft_round_trips_from_project() {
    let project = Project {
        id: "p1".to_owned(),
        title: "Folio".to_owned(),
        description: "Site".to_owned(),
        tech_stack: vec!["Rust".to_owned(), "Leptos".to_owned()],
        live_link: Some("https://folio.dev".to_owned()),
        github_link: None,
        image: None,
        owner_uid: "u1".to_owned(),
        owner_email: "a@x.com".to_owned(),
        views: 0,
        likes: 0,
        liked_by: Vec::new(),
        comments: Vec::new(),
    };
    let draft = ProjectDraft::from_project(&project);
    assert_eq!(draft.tech_stack, "Rust, Leptos");
    assert_eq!(draft.live_link, "https://folio.dev");
    assert_eq!(draft.github_link, "");
}
