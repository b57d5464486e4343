use super::*;

#[test]
fn from_status_maps_auth_and_conflict() {
    assert_eq!(ActionError::from_status(401, None), ActionError::AuthRequired);
    assert_eq!(ActionError::from_status(403, Some("not yours".to_owned())), ActionError::AuthRequired);
    assert_eq!(ActionError::from_status(409, None), ActionError::AlreadyDone);
    assert_eq!(
        ActionError::from_status(500, Some("boom".to_owned())),
        ActionError::NetworkOrServer { status: Some(500), message: Some("boom".to_owned()) }
    );
}

#[test]
fn user_message_prefers_server_message() {
    let err = ActionError::from_status(400, Some("Already liked".to_owned()));
    assert_eq!(err.user_message("Like failed"), "Already liked");
}

#[test]
fn user_message_falls_back_without_server_message() {
    assert_eq!(ActionError::from_status(500, None).user_message("Delete failed"), "Delete failed");
    assert_eq!(ActionError::network("fetch aborted").user_message("Comment failed"), "Comment failed");
    assert_eq!(
        ActionError::from_status(502, Some("  ".to_owned())).user_message("Update failed"),
        "Update failed"
    );
}

#[test]
fn user_message_for_gate_failures() {
    assert_eq!(ActionError::AuthRequired.user_message("x"), "Login required");
    assert_eq!(ActionError::AlreadyDone.user_message("x"), "You already did that");
}

#[test]
fn identity_errors_convert() {
    assert_eq!(ActionError::from(IdentityError::NotSignedIn), ActionError::AuthRequired);
    assert_eq!(
        ActionError::from(IdentityError::Network("offline".to_owned())),
        ActionError::network("offline")
    );
    assert_eq!(
        ActionError::from(IdentityError::InvalidCredentials).user_message("x"),
        "invalid email or password"
    );
}

#[test]
fn display_includes_status_and_message() {
    let err = ActionError::from_status(500, Some("boom".to_owned()));
    assert_eq!(err.to_string(), "request failed (status Some(500)): boom");
}
