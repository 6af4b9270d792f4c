use super::*;

// =============================================================================
// google_error_message
// =============================================================================

#[test]
fn google_error_message_reads_nested_message() {
    let body = r#"{"error":{"code":403,"message":"Missing or insufficient permissions.","status":"PERMISSION_DENIED"}}"#;
    assert_eq!(google_error_message(body).as_deref(), Some("Missing or insufficient permissions."));
}

#[test]
fn google_error_message_reads_bare_string() {
    let body = r#"{"error":"invalid_grant","error_description":"Bad Request"}"#;
    assert_eq!(google_error_message(body).as_deref(), Some("invalid_grant"));
}

#[test]
fn google_error_message_none_for_non_json() {
    assert_eq!(google_error_message("<html>bad gateway</html>"), None);
    assert_eq!(google_error_message(r#"{"error":{"message":""}}"#), None);
}

// =============================================================================
// BackendError
// =============================================================================

#[test]
fn from_status_uses_backend_message() {
    let err = BackendError::from_status(403, r#"{"error":{"message":"denied"}}"#);
    assert!(matches!(err, BackendError::Status { status: 403, .. }));
    assert_eq!(err.to_string(), "denied");
}

#[test]
fn from_status_falls_back_to_code() {
    let err = BackendError::from_status(500, "");
    assert_eq!(err.to_string(), "backend returned 500");
}

#[test]
fn from_status_401_is_unauthorized() {
    let err = BackendError::from_status(401, r#"{"error":{"message":"token expired"}}"#);
    assert!(matches!(err, BackendError::Unauthorized(ref m) if m == "token expired"));
}

// =============================================================================
// IdpCredential
// =============================================================================

#[test]
fn post_body_for_google_uses_id_token() {
    let credential = IdpCredential { provider: ProviderKind::Google, token: "eyJ.abc".to_owned() };
    assert_eq!(credential.post_body(), "id_token=eyJ.abc&providerId=google.com");
}

#[test]
fn post_body_for_github_uses_access_token() {
    let credential = IdpCredential { provider: ProviderKind::GitHub, token: "gho_123".to_owned() };
    assert_eq!(credential.post_body(), "access_token=gho_123&providerId=github.com");
}

#[test]
fn post_body_encodes_reserved_characters() {
    let credential = IdpCredential { provider: ProviderKind::Google, token: "a+b=c&d".to_owned() };
    assert_eq!(credential.post_body(), "id_token=a%2Bb%3Dc%26d&providerId=google.com");
}
