use super::*;

#[test]
fn excerpt_keeps_short_text() {
    assert_eq!(excerpt("short post", 20), "short post");
}

#[test]
fn excerpt_cuts_on_char_boundary() {
    assert_eq!(excerpt("héllo wörld", 6), "héllo...");
}

#[test]
fn like_control_reflects_membership() {
    assert_eq!(like_action_for(true), LikeAction::Unlike);
    assert_eq!(like_action_for(false), LikeAction::Like);
}
