use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_nothing_is_set() {
    let cfg = AppConfig::from_lookup(lookup(&[]));
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.identity_api_key, "");
    assert_eq!(cfg.federated_url, None);
    assert_eq!(cfg, AppConfig::default());
}

#[test]
fn overrides_are_trimmed() {
    let cfg = AppConfig::from_lookup(lookup(&[
        ("FOLIO_API_URL", " https://api.folio.dev/ "),
        ("FOLIO_IDENTITY_API_KEY", "key-123"),
        ("FOLIO_FEDERATED_URL", "https://folio.dev/__/auth/popup"),
    ]));
    assert_eq!(cfg.api_base_url, "https://api.folio.dev");
    assert_eq!(cfg.identity_api_key, "key-123");
    assert_eq!(cfg.federated_url.as_deref(), Some("https://folio.dev/__/auth/popup"));
}

#[test]
fn blank_values_count_as_unset() {
    let cfg = AppConfig::from_lookup(lookup(&[("FOLIO_API_URL", "   "), ("FOLIO_FEDERATED_URL", "")]));
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.federated_url, None);
}
