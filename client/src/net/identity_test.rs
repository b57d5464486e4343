use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::net::fake_identity::identity;

fn recording_listener(log: &Arc<Mutex<Vec<Option<String>>>>) -> Listener {
    let log = log.clone();
    Arc::new(move |identity: Option<UserIdentity>| {
        lock(&log).push(identity.map(|i| i.uid));
    })
}

#[test]
fn notify_reaches_listeners_in_registration_order() {
    let registry = ListenerRegistry::new();
    let order = Arc::new(Mutex::new(Vec::new()));
    let first = {
        let order = order.clone();
        registry.register(Arc::new(move |_| lock(&order).push("first")))
    };
    let second = {
        let order = order.clone();
        registry.register(Arc::new(move |_| lock(&order).push("second")))
    };

    registry.notify(None);

    assert_eq!(*lock(&order), vec!["first", "second"]);
    drop((first, second));
}

#[test]
fn cancelled_subscription_receives_nothing() {
    let registry = ListenerRegistry::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    let subscription = registry.register(recording_listener(&log));

    registry.notify(Some(&identity("u1", "a@x.com")));
    subscription.cancel();
    registry.notify(None);

    assert_eq!(*lock(&log), vec![Some("u1".to_owned())]);
    assert!(!subscription.is_active());
    assert!(registry.is_empty());
}

#[test]
fn cancel_is_idempotent() {
    let registry = ListenerRegistry::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    let subscription = registry.register(recording_listener(&log));
    subscription.cancel();
    subscription.cancel();
    assert!(registry.is_empty());
}

#[test]
fn dropping_subscription_cancels_it() {
    let registry = ListenerRegistry::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    {
        let _subscription = registry.register(recording_listener(&log));
        assert_eq!(registry.len(), 1);
    }
    registry.notify(None);
    assert!(lock(&log).is_empty());
}

#[test]
fn listener_cancelled_mid_pass_is_skipped() {
    let registry = ListenerRegistry::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let victim_slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

    let _canceller = {
        let victim_slot = victim_slot.clone();
        registry.register(Arc::new(move |_| {
            if let Some(victim) = lock(&victim_slot).take() {
                victim.cancel();
            }
        }))
    };
    let victim = {
        let calls = calls.clone();
        registry.register(Arc::new(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
        }))
    };
    *lock(&victim_slot) = Some(victim);

    registry.notify(None);

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn notify_one_targets_a_single_listener() {
    let registry = ListenerRegistry::new();
    let first_log = Arc::new(Mutex::new(Vec::new()));
    let second_log = Arc::new(Mutex::new(Vec::new()));
    let _first = registry.register(recording_listener(&first_log));
    let second = registry.register(recording_listener(&second_log));

    registry.notify_one(&second, Some(&identity("u2", "b@x.com")));

    assert!(lock(&first_log).is_empty());
    assert_eq!(*lock(&second_log), vec![Some("u2".to_owned())]);
}

#[test]
fn subscription_outliving_registry_is_inert() {
    let registry = ListenerRegistry::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    let subscription = registry.register(recording_listener(&log));
    drop(registry);
    assert!(!subscription.is_active());
    subscription.cancel();
}

#[test]
fn identity_error_messages_are_user_readable() {
    assert_eq!(IdentityError::InvalidCredentials.to_string(), "invalid email or password");
    assert_eq!(IdentityError::Network("offline".to_owned()).to_string(), "network error: offline");
    assert_eq!(IdentityError::Provider("quota exceeded".to_owned()).to_string(), "quota exceeded");
}
