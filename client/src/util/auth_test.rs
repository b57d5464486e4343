use std::cell::RefCell;

use super::*;
use crate::net::fake_identity::identity;

fn session(uid: Option<&str>, resolving: bool) -> Session {
    Session { identity: uid.map(|uid| identity(uid, &format!("{uid}@x.com"))), resolving }
}


#[test]
fn redirects_replace_history() {
    assert!(replace_options().replace);
    assert!(replace_options().resolve);
}

#[test]
fn redirect_targets() {
    assert_eq!(LOGIN_PATH, "/login");
    assert_eq!(HOME_PATH, "/");
}

#[test]
fn no_login_redirect_while_resolving() {
    let log = RefCell::new(Vec::<(String, bool)>::new());
    let navigate = |path: &str, opts: NavigateOptions| log.borrow_mut().push((path.to_owned(), opts.replace));

    assert!(!redirect_if_signed_out(&session(None, true), &navigate));
    assert!(!redirect_if_signed_out(&session(Some("u1"), true), &navigate));
    assert!(log.borrow().is_empty());
}

#[test]
fn resolved_anonymous_goes_to_login_with_replace() {
    let log = RefCell::new(Vec::<(String, bool)>::new());
    let navigate = |path: &str, opts: NavigateOptions| log.borrow_mut().push((path.to_owned(), opts.replace));

    assert!(redirect_if_signed_out(&session(None, false), &navigate));
    assert!(!redirect_if_signed_out(&session(Some("u1"), false), &navigate));
    assert_eq!(*log.borrow(), vec![("/login".to_owned(), true)]);
}

#[test]
fn signed_in_redirect_waits_for_identity() {
    let log = RefCell::new(Vec::<(String, bool)>::new());
    let navigate = |path: &str, opts: NavigateOptions| log.borrow_mut().push((path.to_owned(), opts.replace));

    assert!(!redirect_if_signed_in(&session(None, true), &navigate));
    assert!(!redirect_if_signed_in(&session(None, false), &navigate));
    assert!(redirect_if_signed_in(&session(Some("u1"), false), &navigate));
    assert_eq!(*log.borrow(), vec![("/".to_owned(), true)]);
}
