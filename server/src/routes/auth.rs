//! Auth routes: provider OAuth flow, session lookup, logout.

use axum::extract::{FromRef, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::{Duration, OffsetDateTime};
use webarchive::net::types::{ProviderKind, User};

use crate::error::AppError;
use crate::services::backend::BackendError;
use crate::services::identity::{self, AuthError};
use crate::services::session::{self, StoredSession};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";
const OAUTH_STATE_COOKIE_NAME: &str = "oauth_state";

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(session::SESSION_TTL)
        .build()
}

fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

/// `/?auth_error=<message>`, read back by the page on load.
pub(crate) fn auth_error_location(message: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("auth_error", message)
        .finish();
    format!("/?{query}")
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated session extracted from the session cookie, with an ID token
/// that is valid for at least another minute.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub session: StoredSession,
}

impl AuthUser {
    #[must_use]
    pub fn id_token(&self) -> &str {
        &self.session.id_token
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(AppError::Unauthorized);
        }

        let app_state = AppState::from_ref(state);
        let session = app_state
            .sessions
            .get(token)
            .await
            .ok_or(AppError::Unauthorized)?;
        if !session.needs_refresh(OffsetDateTime::now_utc()) {
            return Ok(Self { session });
        }

        let backend = app_state.backend.as_ref().ok_or(AppError::NotConfigured)?;
        let refreshed = match backend.refresh(&session.refresh_token).await {
            Ok(tokens) => tokens,
            Err(BackendError::Unauthorized(reason)) => {
                tracing::info!(%reason, "refresh token rejected, ending session");
                app_state.sessions.remove(token).await;
                return Err(AppError::Unauthorized);
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(user = %session.user.id, "refreshed id token");
        let session = app_state
            .sessions
            .update_tokens(token, refreshed)
            .await
            .ok_or(AppError::Unauthorized)?;
        Ok(Self { session })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /auth/{provider}`: redirect to the provider's authorization page.
pub async fn provider_redirect(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let Some(provider) = ProviderKind::from_slug(&slug) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let config = match state.oauth.get(provider) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(provider = provider.slug(), error = %e, "sign-in attempted with unconfigured provider");
            return Redirect::temporary(&auth_error_location(&e.to_string())).into_response();
        }
    };

    let oauth_state = session::generate_token();
    let url = match identity::authorize_url(provider, config, &oauth_state) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(error = %e, "failed to build authorize url");
            return Redirect::temporary(&auth_error_location(&e.to_string())).into_response();
        }
    };

    let cookie = Cookie::build((OAUTH_STATE_COOKIE_NAME, oauth_state))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie_secure)
        .max_age(Duration::minutes(10));

    let jar = CookieJar::new().add(cookie);
    (jar, Redirect::temporary(url.as_str())).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// `GET /auth/{provider}/callback`: exchange the code, open a backend
/// session, set the cookie, and redirect to `/` (or `/?auth_error=` on failure).
pub async fn provider_callback(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    jar: CookieJar,
    Query(params): Query<CallbackQuery>,
) -> Response {
    let Some(provider) = ProviderKind::from_slug(&slug) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let secure = state.cookie_secure;
    let expected_state = jar
        .get(OAUTH_STATE_COOKIE_NAME)
        .map(|c| c.value().to_owned())
        .unwrap_or_default();
    let jar = jar.add(expired_cookie(OAUTH_STATE_COOKIE_NAME, secure));

    match complete_sign_in(&state, provider, &expected_state, params).await {
        Ok(token) => {
            let jar = jar.add(session_cookie(token, secure));
            (jar, Redirect::temporary("/")).into_response()
        }
        Err(e) => {
            tracing::warn!(provider = provider.slug(), error = %e, "sign-in failed");
            (jar, Redirect::temporary(&auth_error_location(&e.to_string()))).into_response()
        }
    }
}

async fn complete_sign_in(
    state: &AppState,
    provider: ProviderKind,
    expected_state: &str,
    params: CallbackQuery,
) -> Result<String, AuthError> {
    let config = state.oauth.get(provider)?;
    if let Some(error) = params.error {
        return Err(AuthError::Denied(params.error_description.unwrap_or(error)));
    }
    // Verify OAuth CSRF state from cookie.
    let callback_state = params.state.unwrap_or_default();
    if expected_state.is_empty() || expected_state != callback_state {
        return Err(AuthError::InvalidState);
    }
    let code = params.code.filter(|c| !c.is_empty()).ok_or(AuthError::MissingCode)?;
    let backend = state.backend.as_ref().ok_or(BackendError::NotConfigured)?;

    let credential = identity::exchange_code(&state.http, provider, config, &code).await?;
    let backend_session = backend.sign_in_with_idp(&credential, &config.redirect_uri).await?;
    tracing::info!(user = %backend_session.user.id, provider = provider.slug(), "signed in");
    let session = StoredSession::start(backend_session, OffsetDateTime::now_utc());
    Ok(state.sessions.create(session).await)
}

/// `GET /api/auth/me`: return current user.
pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.session.user)
}

/// `POST /api/auth/logout`: delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Result<impl IntoResponse, AppError> {
    let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
    if token.is_empty() || !state.sessions.remove(token).await {
        return Err(AppError::Unauthorized);
    }
    let jar = jar.add(expired_cookie(COOKIE_NAME, state.cookie_secure));
    Ok((jar, StatusCode::NO_CONTENT))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
