//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the backend client, the in-memory session store, and the OAuth
//! provider credentials. The backend is optional so the page shell still
//! serves when the archive is not configured.

use std::sync::Arc;

use crate::services::backend::Backend;
use crate::services::identity::OAuthProviders;
use crate::services::session::SessionStore;

/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    /// Archive backend. `None` if the backend env vars are not configured.
    pub backend: Option<Arc<dyn Backend>>,
    pub sessions: SessionStore,
    pub oauth: Arc<OAuthProviders>,
    /// Client for provider token exchanges.
    pub http: reqwest::Client,
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(
        backend: Option<Arc<dyn Backend>>,
        oauth: OAuthProviders,
        http: reqwest::Client,
        cookie_secure: bool,
    ) -> Self {
        Self { backend, sessions: SessionStore::new(), oauth: Arc::new(oauth), http, cookie_secure }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use time::{Duration, OffsetDateTime};
    use webarchive::net::types::{Article, User};

    use super::*;
    use crate::services::backend::{BackendError, BackendSession, IdpCredential, RefreshedTokens};
    use crate::services::identity::OAuthClientConfig;
    use crate::services::session::StoredSession;

    /// In-memory backend recording the ID tokens it was called with.
    #[derive(Default)]
    pub struct MockBackend {
        pub articles: Vec<Article>,
        pub files: HashMap<String, String>,
        /// When set, every data call fails with this status and message.
        pub failure: Option<(u16, String)>,
        pub seen_tokens: Mutex<Vec<String>>,
        pub refresh_calls: Mutex<u32>,
    }

    impl MockBackend {
        fn record(&self, id_token: &str) -> Result<(), BackendError> {
            self.seen_tokens.lock().unwrap().push(id_token.to_owned());
            match &self.failure {
                Some((401, message)) => Err(BackendError::Unauthorized(message.clone())),
                Some((status, message)) => Err(BackendError::Status { status: *status, message: message.clone() }),
                None => Ok(()),
            }
        }
    }

    #[async_trait::async_trait]
    impl Backend for MockBackend {
        async fn sign_in_with_idp(
            &self,
            credential: &IdpCredential,
            _request_uri: &str,
        ) -> Result<BackendSession, BackendError> {
            Ok(BackendSession {
                user: test_user(),
                id_token: format!("id-for-{}", credential.token),
                refresh_token: "refresh-1".to_owned(),
                expires_at: OffsetDateTime::now_utc() + Duration::hours(1),
            })
        }

        async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, BackendError> {
            let mut calls = self.refresh_calls.lock().unwrap();
            *calls += 1;
            Ok(RefreshedTokens {
                id_token: format!("refreshed-{calls}"),
                refresh_token: refresh_token.to_owned(),
                expires_at: OffsetDateTime::now_utc() + Duration::hours(1),
            })
        }

        async fn query_articles(&self, id_token: &str) -> Result<Vec<Article>, BackendError> {
            self.record(id_token)?;
            Ok(self.articles.clone())
        }

        async fn download_url(&self, id_token: &str, path: &str) -> Result<String, BackendError> {
            self.record(id_token)?;
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| BackendError::Status { status: 404, message: "No such object.".to_owned() })
        }
    }

    #[must_use]
    pub fn test_user() -> User {
        User {
            id: "uid-1".to_owned(),
            name: "Ada".to_owned(),
            email: Some("ada@example.com".to_owned()),
            avatar_url: None,
            provider: "google.com".to_owned(),
        }
    }

    #[must_use]
    pub fn test_oauth() -> OAuthProviders {
        OAuthProviders {
            google: Some(OAuthClientConfig {
                client_id: "google-client".to_owned(),
                client_secret: "google-secret".to_owned(),
                redirect_uri: "http://localhost:3000/auth/google/callback".to_owned(),
            }),
            github: None,
        }
    }

    /// Create a test `AppState` with no backend configured.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(None, test_oauth(), reqwest::Client::new(), false)
    }

    /// Create a test `AppState` backed by a mock.
    #[must_use]
    pub fn test_app_state_with_backend(backend: Arc<MockBackend>) -> AppState {
        AppState::new(Some(backend as Arc<dyn Backend>), test_oauth(), reqwest::Client::new(), false)
    }

    /// Seed a session whose ID token expires `expires_in` from now.
    pub async fn seed_session(state: &AppState, expires_in: Duration) -> String {
        state
            .sessions
            .create(StoredSession {
                user: test_user(),
                id_token: "id-1".to_owned(),
                refresh_token: "refresh-1".to_owned(),
                expires_at: OffsetDateTime::now_utc() + expires_in,
                session_expires_at: OffsetDateTime::now_utc() + crate::services::session::SESSION_TTL,
            })
            .await
    }
}
