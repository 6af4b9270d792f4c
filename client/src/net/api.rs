//! REST API helpers for communicating with the archive gateway.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`; callers fold failures into the
//! inline error text instead of letting them escape to the runtime.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{Article, ErrorBody, ProviderKind, User};

/// Errors surfaced by gateway calls. `Clone + PartialEq` so they can live in signals.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The gateway answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected schema.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Called outside the browser.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Whether the gateway rejected the call for lack of a session.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}

/// Build an [`ApiError::Status`] from a failed response body, preferring the
/// gateway's `{"error": ...}` message over the bare status code.
#[must_use]
pub fn status_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("request failed: {status}"));
    ApiError::Status { status, message }
}

/// Gateway path that starts the sign-in flow for `provider`.
#[must_use]
pub fn sign_in_path(provider: ProviderKind) -> String {
    format!("/auth/{}", provider.slug())
}

pub const ME_ENDPOINT: &str = "/api/auth/me";
pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout";
pub const ARTICLES_ENDPOINT: &str = "/api/articles";
pub const FILE_URL_ENDPOINT: &str = "/api/files/url";

#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(status_error(status, &body));
    }
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Fetch the currently authenticated user from `/api/auth/me`.
///
/// Returns `Ok(None)` when no session exists.
///
/// # Errors
///
/// Returns an error for network failures or unexpected statuses.
pub async fn fetch_current_user() -> Result<Option<User>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(ME_ENDPOINT)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        match read_json::<User>(resp).await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_unauthorized() => Ok(None),
            Err(e) => Err(e),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// End the current session via `POST /api/auth/logout`.
///
/// # Errors
///
/// Returns an error if the request fails or the gateway rejects it.
pub async fn logout() -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(LOGOUT_ENDPOINT)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if resp.ok() || resp.status() == 401 {
            return Ok(());
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// Load every article, newest first, from `/api/articles`.
///
/// # Errors
///
/// Returns an error if the query fails at the gateway or backend.
pub async fn fetch_articles() -> Result<Vec<Article>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(ARTICLES_ENDPOINT)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// Resolve a stored-file path to a downloadable URL via `/api/files/url`.
///
/// # Errors
///
/// Returns an error if the file cannot be resolved.
pub async fn resolve_download_url(path: &str) -> Result<String, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(FILE_URL_ENDPOINT)
            .query([("path", path)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let body: super::types::DownloadUrl = read_json(resp).await?;
        Ok(body.url)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = path;
        Err(ApiError::Unavailable)
    }
}
