use super::*;

#[test]
fn login_form_requires_email_and_password() {
    assert_eq!(login_form_error("  ", "pw"), Some("Email is required."));
    assert_eq!(login_form_error("a@b.c", ""), Some("Password is required."));
    assert_eq!(login_form_error("a@b.c", "pw"), None);
}

#[test]
fn remember_me_selects_local_persistence() {
    assert_eq!(persistence_for(true), Persistence::Local);
    assert_eq!(persistence_for(false), Persistence::Session);
}
