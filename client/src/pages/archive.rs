//! The archive page: creates the session and mounts the app shell.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gateway's sign-in callback redirects here, with `?auth_error=` set when
//! the provider exchange failed. That message seeds the session error.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::app_shell::AppShell;
use crate::state::session::SessionContext;

/// Single page of the application.
#[component]
pub fn ArchivePage() -> impl IntoView {
    let query = use_query_map();
    let auth_error = query.with_untracked(|q| q.get("auth_error"));

    let session = SessionContext::new(auth_error);
    session.resolve();

    view! { <AppShell session/> }
}
