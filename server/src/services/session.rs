//! Browser sessions.
//!
//! ARCHITECTURE
//! ============
//! The browser holds an opaque random token in an HttpOnly cookie. The token
//! maps to the backend ID and refresh tokens, which never leave the gateway.
//! Sessions live in memory, so a restart signs everyone out. Each session
//! has an absolute lifetime of [`SESSION_TTL`]; refreshing the ID token does
//! not extend it. Expired entries are dropped on lookup and pruned whenever
//! a new session is created.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;

use rand::Rng;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use webarchive::net::types::User;

use super::backend::{BackendSession, RefreshedTokens};

/// ID tokens this close to expiry are refreshed before use.
pub const REFRESH_MARGIN: Duration = Duration::seconds(60);

/// Absolute session lifetime, also used as the cookie `Max-Age`.
pub const SESSION_TTL: Duration = Duration::days(7);

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Backend credentials held for one browser session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub user: User,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: OffsetDateTime,
    /// End of the browser session, independent of the ID token's expiry.
    pub session_expires_at: OffsetDateTime,
}

impl StoredSession {
    /// Start a browser session at `now` for a fresh backend sign-in.
    #[must_use]
    pub fn start(session: BackendSession, now: OffsetDateTime) -> Self {
        Self {
            user: session.user,
            id_token: session.id_token,
            refresh_token: session.refresh_token,
            expires_at: session.expires_at,
            session_expires_at: now + SESSION_TTL,
        }
    }

    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.session_expires_at <= now
    }

    #[must_use]
    pub fn needs_refresh(&self, now: OffsetDateTime) -> bool {
        self.expires_at - now <= REFRESH_MARGIN
    }

    pub fn apply_refresh(&mut self, tokens: RefreshedTokens) {
        self.id_token = tokens.id_token;
        self.refresh_token = tokens.refresh_token;
        self.expires_at = tokens.expires_at;
    }
}

/// Token-keyed session map shared by all handlers.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, StoredSession>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session under a fresh token and return the token. Expired
    /// sessions are pruned first.
    pub async fn create(&self, session: StoredSession) -> String {
        let token = generate_token();
        let now = OffsetDateTime::now_utc();
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        let pruned = before - sessions.len();
        if pruned > 0 {
            tracing::debug!(pruned, "pruned expired sessions");
        }
        sessions.insert(token.clone(), session);
        token
    }

    /// Live session for `token`. An expired session is removed and reported
    /// as absent.
    pub async fn get(&self, token: &str) -> Option<StoredSession> {
        let now = OffsetDateTime::now_utc();
        {
            let sessions = self.inner.read().await;
            match sessions.get(token) {
                None => return None,
                Some(session) if !session.is_expired(now) => return Some(session.clone()),
                Some(_) => {}
            }
        }
        let mut sessions = self.inner.write().await;
        if sessions.get(token).is_some_and(|s| s.is_expired(now)) {
            sessions.remove(token);
        }
        None
    }

    /// Replace the backend tokens of an existing session. Returns the updated
    /// session, or `None` if it was removed meanwhile.
    pub async fn update_tokens(&self, token: &str, tokens: RefreshedTokens) -> Option<StoredSession> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(token)?;
        session.apply_refresh(tokens);
        Some(session.clone())
    }

    /// Remove a session. Returns whether it existed.
    pub async fn remove(&self, token: &str) -> bool {
        self.inner.write().await.remove(token).is_some()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
