//! Authentication session for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`SessionContext`] is created once by the archive page and handed to the
//! app shell explicitly. Consumers get read-only signals; the only writers are
//! the context's own actions and the `/api/auth/me` resolution.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;

use crate::net::api::ApiError;
use crate::net::types::{ProviderKind, User};

/// Current user plus the last authentication failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    /// Human-readable message of the last auth failure.
    pub error: Option<String>,
    /// True until the first `/api/auth/me` answer arrives.
    pub resolving: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self { user: None, error: None, resolving: true }
    }
}

impl SessionState {
    /// Initial state, carrying an error reported by the sign-in redirect.
    #[must_use]
    pub fn with_error(error: Option<String>) -> Self {
        Self { error: error.filter(|e| !e.is_empty()), ..Self::default() }
    }

    /// Apply the answer of `/api/auth/me`.
    pub fn resolved(&mut self, result: Result<Option<User>, ApiError>) {
        self.resolving = false;
        match result {
            Ok(user) => self.user = user,
            Err(e) => {
                self.user = None;
                self.error = Some(format!("Sign-in check failed: {e}"));
            }
        }
    }

    /// A new sign-in attempt clears the previous failure.
    pub fn signing_in(&mut self) {
        self.error = None;
    }

    /// Apply the answer of the logout call. A failed logout keeps the user.
    pub fn signed_out(&mut self, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                self.user = None;
                self.error = None;
            }
            Err(e) => self.error = Some(format!("Logout failed: {e}")),
        }
    }

    /// Record a failure without touching the user.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}

/// Explicit session handle: read-only views plus sign-in/sign-out actions.
#[derive(Clone, Copy)]
pub struct SessionContext {
    state: RwSignal<SessionState>,
}

impl SessionContext {
    /// Create a session, optionally seeded with an error from the sign-in redirect.
    pub fn new(initial_error: Option<String>) -> Self {
        Self { state: RwSignal::new(SessionState::with_error(initial_error)) }
    }

    pub fn user(&self) -> Signal<Option<User>> {
        let state = self.state;
        Memo::new(move |_| state.with(|s| s.user.clone())).into()
    }

    pub fn error(&self) -> Signal<Option<String>> {
        let state = self.state;
        Memo::new(move |_| state.with(|s| s.error.clone())).into()
    }

    pub fn resolving(&self) -> Signal<bool> {
        let state = self.state;
        Memo::new(move |_| state.with(|s| s.resolving)).into()
    }

    /// Ask the gateway who is signed in.
    pub fn resolve(&self) {
        #[cfg(feature = "hydrate")]
        {
            let state = self.state;
            leptos::task::spawn_local(async move {
                let result = crate::net::api::fetch_current_user().await;
                if let Err(e) = &result {
                    log::warn!("session resolve failed: {e}");
                }
                state.update(|s| s.resolved(result));
            });
        }
    }

    /// Start the external sign-in flow for `provider`. The browser leaves the
    /// page; the gateway redirects back when the provider answers.
    pub fn sign_in(&self, provider: ProviderKind) {
        self.state.update(SessionState::signing_in);
        #[cfg(feature = "hydrate")]
        {
            let path = crate::net::api::sign_in_path(provider);
            if window().location().set_href(&path).is_err() {
                self.state
                    .update(|s| s.fail(format!("Could not start {} sign-in", provider.label())));
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = provider;
    }

    /// End the session at the gateway, then drop the user.
    pub fn sign_out(&self) {
        #[cfg(feature = "hydrate")]
        {
            let state = self.state;
            leptos::task::spawn_local(async move {
                let result = crate::net::api::logout().await;
                state.update(|s| s.signed_out(result));
            });
        }
    }
}
