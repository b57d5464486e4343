use super::*;

#[test]
fn layout_hidden_on_auth_screens() {
    assert!(layout_hidden("/login"));
    assert!(layout_hidden("/signup/"));
}

#[test]
fn layout_shown_elsewhere() {
    assert!(!layout_hidden("/"));
    assert!(!layout_hidden("/blogs"));
    assert!(!layout_hidden("/login-help"));
}
