use super::*;

#[test]
fn status_mapping() {
    assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::BadRequest("x".to_owned()).status(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::NotConfigured.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        AppError::from(BackendError::Unauthorized("expired".to_owned())).status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::from(BackendError::Status { status: 403, message: "denied".to_owned() }).status(),
        StatusCode::BAD_GATEWAY
    );
    assert_eq!(AppError::from(BackendError::Request("timeout".to_owned())).status(), StatusCode::BAD_GATEWAY);
}

#[test]
fn backend_message_passes_through() {
    let err = AppError::from(BackendError::Status { status: 403, message: "Missing or insufficient permissions.".to_owned() });
    assert_eq!(err.to_string(), "Missing or insufficient permissions.");
}

#[tokio::test]
async fn into_response_writes_json_error_body() {
    let response = AppError::BadRequest("path is required".to_owned()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body.error, "path is required");
}
