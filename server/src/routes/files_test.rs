use std::collections::HashMap;
use std::sync::Arc;

use axum::http::StatusCode;
use time::Duration;

use super::*;
use crate::services::session::StoredSession;
use crate::state::test_helpers::{MockBackend, test_app_state_with_backend, test_user};

const PDF_URL: &str = "https://firebasestorage.googleapis.com/v0/b/bucket/o/pdfs%2Fa.pdf?alt=media&token=tok";

fn auth_user() -> AuthUser {
    AuthUser {
        session: StoredSession {
            user: test_user(),
            id_token: "id-1".to_owned(),
            refresh_token: "refresh-1".to_owned(),
            expires_at: time::OffsetDateTime::now_utc() + Duration::hours(1),
            session_expires_at: time::OffsetDateTime::now_utc() + Duration::days(1),
        },
    }
}

fn state_with_file() -> (AppState, Arc<MockBackend>) {
    let backend = Arc::new(MockBackend {
        files: HashMap::from([("pdfs/a.pdf".to_owned(), PDF_URL.to_owned())]),
        ..MockBackend::default()
    });
    (test_app_state_with_backend(backend.clone()), backend)
}

fn query(path: &str) -> Query<FileQuery> {
    Query(FileQuery { path: path.to_owned() })
}

#[tokio::test]
async fn resolves_stored_path() {
    let (state, backend) = state_with_file();
    let Json(body) = download_url(State(state), auth_user(), query("pdfs/a.pdf")).await.unwrap();
    assert_eq!(body.url, PDF_URL);
    assert_eq!(*backend.seen_tokens.lock().unwrap(), ["id-1"]);
}

#[tokio::test]
async fn empty_path_is_bad_request() {
    let (state, backend) = state_with_file();
    let err = download_url(State(state), auth_user(), query("  ")).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert!(backend.seen_tokens.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_object_is_bad_gateway() {
    let (state, _) = state_with_file();
    let err = download_url(State(state), auth_user(), query("pdfs/missing.pdf")).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(err.to_string(), "No such object.");
}

#[tokio::test]
async fn expired_backend_token_is_unauthorized() {
    let backend = Arc::new(MockBackend {
        failure: Some((401, "token expired".to_owned())),
        ..MockBackend::default()
    });
    let state = test_app_state_with_backend(backend);
    let err = download_url(State(state), auth_user(), query("pdfs/a.pdf")).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
}
