//! Managed-backend abstraction.
//!
//! DESIGN
//! ======
//! Route handlers talk to the document store, file store, and identity
//! service only through the [`Backend`] trait. Production uses
//! [`super::firebase::FirebaseClient`]; tests substitute an in-memory mock.

use time::OffsetDateTime;
use webarchive::net::types::{Article, ProviderKind, User};

/// Errors from backend calls.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("unexpected backend response: {0}")]
    Decode(String),

    /// The caller's credentials were rejected.
    #[error("backend rejected credentials: {0}")]
    Unauthorized(String),

    #[error("backend not configured")]
    NotConfigured,
}

impl BackendError {
    /// Map a non-success response to an error, pulling the backend's own
    /// message out of a Google-style error body when there is one.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = google_error_message(body).unwrap_or_else(|| format!("backend returned {status}"));
        if status == 401 {
            Self::Unauthorized(message)
        } else {
            Self::Status { status, message }
        }
    }
}

/// Extract `error.message` from a Google API error body.
///
/// Firestore and Storage wrap the message in an object, the securetoken
/// endpoint sometimes sends a bare string.
#[must_use]
pub fn google_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    let message = match error {
        serde_json::Value::String(s) => s.clone(),
        other => other.get("message")?.as_str()?.to_owned(),
    };
    (!message.is_empty()).then_some(message)
}

/// A provider credential obtained from the OAuth code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdpCredential {
    pub provider: ProviderKind,
    pub token: String,
}

impl IdpCredential {
    /// URL-encoded `postBody` for `accounts:signInWithIdp`.
    ///
    /// Google hands back an OpenID `id_token`; GitHub only has an access token.
    #[must_use]
    pub fn post_body(&self) -> String {
        let token_key = match self.provider {
            ProviderKind::Google => "id_token",
            ProviderKind::GitHub => "access_token",
        };
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair(token_key, &self.token)
            .append_pair("providerId", self.provider.provider_id())
            .finish()
    }
}

/// Backend session returned by a successful identity sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSession {
    pub user: User,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: OffsetDateTime,
}

/// Result of exchanging a refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedTokens {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: OffsetDateTime,
}

/// Calls the gateway makes against the managed backend.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Exchange a provider credential for a backend user session.
    async fn sign_in_with_idp(&self, credential: &IdpCredential, request_uri: &str)
    -> Result<BackendSession, BackendError>;

    /// Mint a fresh ID token from a refresh token.
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, BackendError>;

    /// All articles, newest first.
    async fn query_articles(&self, id_token: &str) -> Result<Vec<Article>, BackendError>;

    /// Fetchable URL for a stored file path.
    async fn download_url(&self, id_token: &str, path: &str) -> Result<String, BackendError>;
}

#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;
