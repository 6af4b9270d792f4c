//! Sign-in: provider OAuth flows and identity-toolkit responses.
//!
//! ARCHITECTURE
//! ============
//! The browser is redirected to the provider's authorize page. The callback
//! exchanges the code for a provider credential (Google `id_token`, GitHub
//! access token), which the identity backend turns into a backend session via
//! `accounts:signInWithIdp`. ID tokens are short-lived and refreshed through
//! the securetoken endpoint.

use serde::Deserialize;
use time::{Duration, OffsetDateTime};
use url::Url;
use webarchive::net::types::{ProviderKind, User};

use super::backend::{BackendError, BackendSession, IdpCredential, RefreshedTokens, google_error_message};

const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_SCOPE: &str = "openid email profile";
const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GITHUB_SCOPE: &str = "read:user user:email";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0} sign-in is not configured")]
    NotConfigured(&'static str),

    /// The provider redirected back with an `error` parameter.
    #[error("sign-in was cancelled or denied: {0}")]
    Denied(String),

    #[error("sign-in state mismatch, please try again")]
    InvalidState,

    #[error("sign-in callback is missing the authorization code")]
    MissingCode,

    #[error("provider token exchange failed: {0}")]
    TokenExchange(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

// =============================================================================
// CONFIG
// =============================================================================

/// OAuth client credentials for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl OAuthClientConfig {
    /// Load `{PREFIX}_CLIENT_ID`, `{PREFIX}_CLIENT_SECRET`, `{PREFIX}_REDIRECT_URI`.
    /// Returns `None` if any are missing (that provider is disabled).
    pub fn from_lookup<F>(lookup: &F, prefix: &str) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{prefix}_{name}")).filter(|v| !v.trim().is_empty());
        Some(Self {
            client_id: var("CLIENT_ID")?,
            client_secret: var("CLIENT_SECRET")?,
            redirect_uri: var("REDIRECT_URI")?,
        })
    }
}

/// Configured sign-in providers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthProviders {
    pub google: Option<OAuthClientConfig>,
    pub github: Option<OAuthClientConfig>,
}

impl OAuthProviders {
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            google: OAuthClientConfig::from_lookup(lookup, "GOOGLE"),
            github: OAuthClientConfig::from_lookup(lookup, "GITHUB"),
        }
    }

    /// Credentials for `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotConfigured`] when the provider is disabled.
    pub fn get(&self, provider: ProviderKind) -> Result<&OAuthClientConfig, AuthError> {
        let config = match provider {
            ProviderKind::Google => self.google.as_ref(),
            ProviderKind::GitHub => self.github.as_ref(),
        };
        config.ok_or(AuthError::NotConfigured(provider.label()))
    }

    /// Whether any configured callback is served over HTTPS.
    #[must_use]
    pub fn any_https_redirect(&self) -> bool {
        [&self.google, &self.github]
            .into_iter()
            .flatten()
            .any(|c| c.redirect_uri.starts_with("https://"))
    }
}

// =============================================================================
// OAUTH
// =============================================================================

/// Provider authorization URL carrying the CSRF `state`.
///
/// # Errors
///
/// Returns [`AuthError::TokenExchange`] if the URL cannot be assembled.
pub fn authorize_url(provider: ProviderKind, config: &OAuthClientConfig, state: &str) -> Result<Url, AuthError> {
    let (endpoint, scope) = match provider {
        ProviderKind::Google => (GOOGLE_AUTHORIZE_URL, GOOGLE_SCOPE),
        ProviderKind::GitHub => (GITHUB_AUTHORIZE_URL, GITHUB_SCOPE),
    };
    Url::parse_with_params(
        endpoint,
        &[
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", scope),
            ("state", state),
        ],
    )
    .map_err(|e| AuthError::TokenExchange(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: Option<String>,
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Exchange an authorization code for the credential the identity backend
/// accepts from `provider`.
///
/// # Errors
///
/// Returns [`AuthError::TokenExchange`] on transport failure or when the
/// provider rejects the code.
pub async fn exchange_code(
    http: &reqwest::Client,
    provider: ProviderKind,
    config: &OAuthClientConfig,
    code: &str,
) -> Result<IdpCredential, AuthError> {
    let token_url = match provider {
        ProviderKind::Google => GOOGLE_TOKEN_URL,
        ProviderKind::GitHub => GITHUB_TOKEN_URL,
    };
    let response = http
        .post(token_url)
        .header(reqwest::header::ACCEPT, "application/json")
        .form(&[
            ("code", code),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| AuthError::TokenExchange(e.to_string()))?;
    credential_from_token_response(provider, status, &body)
}

/// Pick the provider credential out of a token endpoint response.
///
/// GitHub reports failures with a 200 status and an `error` field.
///
/// # Errors
///
/// Returns [`AuthError::TokenExchange`] when no usable credential is present.
pub fn credential_from_token_response(
    provider: ProviderKind,
    status: u16,
    body: &str,
) -> Result<IdpCredential, AuthError> {
    let parsed: TokenResponse = serde_json::from_str(body)
        .map_err(|_| AuthError::TokenExchange(format!("unexpected response ({status})")))?;
    if let Some(error) = parsed.error {
        return Err(AuthError::TokenExchange(parsed.error_description.unwrap_or(error)));
    }
    if !(200..300).contains(&status) {
        return Err(AuthError::TokenExchange(format!("token endpoint returned {status}")));
    }
    let token = match provider {
        ProviderKind::Google => parsed.id_token,
        ProviderKind::GitHub => parsed.access_token,
    };
    token
        .filter(|t| !t.is_empty())
        .map(|token| IdpCredential { provider, token })
        .ok_or_else(|| AuthError::TokenExchange("token endpoint returned no credential".to_owned()))
}

// =============================================================================
// IDENTITY TOOLKIT
// =============================================================================

/// Request body for `accounts:signInWithIdp`.
#[must_use]
pub fn sign_in_body(credential: &IdpCredential, request_uri: &str) -> serde_json::Value {
    serde_json::json!({
        "postBody": credential.post_body(),
        "requestUri": request_uri,
        "returnSecureToken": true,
        "returnIdpCredential": false,
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    id_token: String,
    refresh_token: String,
    expires_in: String,
    display_name: Option<String>,
    screen_name: Option<String>,
    email: Option<String>,
    photo_url: Option<String>,
    provider_id: Option<String>,
}

/// Decode a successful `accounts:signInWithIdp` response.
///
/// # Errors
///
/// Returns [`BackendError::Decode`] on a malformed body.
pub fn decode_sign_in(body: &str, now: OffsetDateTime) -> Result<BackendSession, BackendError> {
    let parsed: SignInResponse =
        serde_json::from_str(body).map_err(|e| BackendError::Decode(format!("signInWithIdp response: {e}")))?;
    let expires_at = expires_at(now, &parsed.expires_in)?;
    let name = [&parsed.display_name, &parsed.screen_name, &parsed.email]
        .into_iter()
        .flatten()
        .find(|n| !n.is_empty())
        .cloned()
        .unwrap_or_else(|| parsed.local_id.clone());
    Ok(BackendSession {
        user: User {
            id: parsed.local_id,
            name,
            email: parsed.email,
            avatar_url: parsed.photo_url,
            provider: parsed.provider_id.unwrap_or_default(),
        },
        id_token: parsed.id_token,
        refresh_token: parsed.refresh_token,
        expires_at,
    })
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

/// Decode a securetoken refresh response.
///
/// # Errors
///
/// Returns [`BackendError::Decode`] on a malformed body.
pub fn decode_refresh(body: &str, now: OffsetDateTime) -> Result<RefreshedTokens, BackendError> {
    let parsed: RefreshResponse =
        serde_json::from_str(body).map_err(|e| BackendError::Decode(format!("token refresh response: {e}")))?;
    Ok(RefreshedTokens {
        expires_at: expires_at(now, &parsed.expires_in)?,
        id_token: parsed.id_token,
        refresh_token: parsed.refresh_token,
    })
}

/// Identity endpoints report failures as `{"error":{"message":"INVALID_IDP_RESPONSE"}}`.
#[must_use]
pub fn identity_error(status: u16, body: &str) -> BackendError {
    match google_error_message(body) {
        Some(message) if (400..500).contains(&status) => BackendError::Unauthorized(message),
        _ => BackendError::from_status(status, body),
    }
}

fn expires_at(now: OffsetDateTime, expires_in: &str) -> Result<OffsetDateTime, BackendError> {
    let seconds: i64 = expires_in
        .trim()
        .parse()
        .map_err(|_| BackendError::Decode(format!("invalid expiresIn {expires_in:?}")))?;
    Ok(now + Duration::seconds(seconds))
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
