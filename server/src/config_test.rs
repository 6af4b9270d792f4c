use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

const FIREBASE_VARS: [(&str, &str); 3] = [
    ("FIREBASE_PROJECT_ID", "web-archive"),
    ("FIREBASE_API_KEY", "api-key"),
    ("FIREBASE_STORAGE_BUCKET", "web-archive.appspot.com"),
];

// =============================================================================
// parse_bool
// =============================================================================

#[test]
fn parse_bool_true_variants() {
    for val in ["1", "true", "yes", "on", "TRUE", " On "] {
        assert_eq!(parse_bool(val), Some(true), "expected true for {val:?}");
    }
}

#[test]
fn parse_bool_false_variants() {
    for val in ["0", "false", "no", "off", "False"] {
        assert_eq!(parse_bool(val), Some(false), "expected false for {val:?}");
    }
}

#[test]
fn parse_bool_invalid_returns_none() {
    assert_eq!(parse_bool("maybe"), None);
    assert_eq!(parse_bool(""), None);
}

// =============================================================================
// ServerConfig
// =============================================================================

#[test]
fn empty_environment_uses_defaults() {
    let config = ServerConfig::from_lookup(&lookup_from(&[])).unwrap();
    assert_eq!(config.port, DEFAULT_PORT);
    assert!(!config.cookie_secure);
    assert!(config.firebase.is_none());
    assert!(config.oauth.google.is_none());
    assert!(config.oauth.github.is_none());
    assert_eq!(config.timeouts.request_secs, DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS);
    assert_eq!(config.timeouts.connect_secs, DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS);
}

#[test]
fn invalid_port_is_rejected() {
    let err = ServerConfig::from_lookup(&lookup_from(&[("PORT", "eighty")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { key: "PORT".to_owned(), value: "eighty".to_owned() });
}

#[test]
fn cookie_secure_inferred_from_https_redirect() {
    let config = ServerConfig::from_lookup(&lookup_from(&[
        ("GOOGLE_CLIENT_ID", "id"),
        ("GOOGLE_CLIENT_SECRET", "secret"),
        ("GOOGLE_REDIRECT_URI", "https://archive.example.com/auth/google/callback"),
    ]))
    .unwrap();
    assert!(config.cookie_secure);
}

#[test]
fn explicit_cookie_secure_wins() {
    let config = ServerConfig::from_lookup(&lookup_from(&[
        ("COOKIE_SECURE", "false"),
        ("GOOGLE_CLIENT_ID", "id"),
        ("GOOGLE_CLIENT_SECRET", "secret"),
        ("GOOGLE_REDIRECT_URI", "https://archive.example.com/auth/google/callback"),
    ]))
    .unwrap();
    assert!(!config.cookie_secure);
}

// =============================================================================
// FirebaseConfig
// =============================================================================

#[test]
fn firebase_config_with_defaults() {
    let config = FirebaseConfig::from_lookup(&lookup_from(&FIREBASE_VARS))
        .unwrap()
        .unwrap();
    assert_eq!(config.project_id, "web-archive");
    assert_eq!(config.articles_collection, "articles");
    assert_eq!(config.endpoints, BackendEndpoints::default());
}

#[test]
fn firebase_partial_config_is_an_error() {
    let err = FirebaseConfig::from_lookup(&lookup_from(&FIREBASE_VARS[..2])).unwrap_err();
    assert_eq!(err, ConfigError::Missing("FIREBASE_STORAGE_BUCKET".to_owned()));
}

#[test]
fn firebase_endpoint_overrides_drop_trailing_slash() {
    let mut vars = FIREBASE_VARS.to_vec();
    vars.push(("FIRESTORE_BASE_URL", "http://localhost:8080/v1/"));
    vars.push(("FIREBASE_ARTICLES_COLLECTION", "clips"));
    let config = FirebaseConfig::from_lookup(&lookup_from(&vars)).unwrap().unwrap();
    assert_eq!(config.endpoints.firestore, "http://localhost:8080/v1");
    assert_eq!(config.articles_collection, "clips");
}

#[test]
fn invalid_timeout_is_rejected() {
    let err = ServerConfig::from_lookup(&lookup_from(&[("BACKEND_REQUEST_TIMEOUT_SECS", "-1")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "BACKEND_REQUEST_TIMEOUT_SECS"));
}

#[test]
fn timeouts_override_defaults() {
    let config = ServerConfig::from_lookup(&lookup_from(&[
        ("BACKEND_REQUEST_TIMEOUT_SECS", "5"),
        ("BACKEND_CONNECT_TIMEOUT_SECS", "2"),
    ]))
    .unwrap();
    assert_eq!(config.timeouts.request(), Duration::from_secs(5));
    assert_eq!(config.timeouts.connect(), Duration::from_secs(2));
}

#[test]
fn blank_firebase_values_count_as_unset() {
    let config = FirebaseConfig::from_lookup(&lookup_from(&[
        ("FIREBASE_PROJECT_ID", " "),
        ("FIREBASE_API_KEY", ""),
    ]))
    .unwrap();
    assert!(config.is_none());
}
