//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the auth and archive API endpoints and stitches them
//! with Leptos SSR rendering under a single Axum router. Compiled client
//! assets are served from `/pkg`.

pub mod articles;
pub mod auth;
pub mod files;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Auth and archive API routes.
fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/auth/{provider}", get(auth::provider_redirect))
        .route("/auth/{provider}/callback", get(auth::provider_callback))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/articles", get(articles::list_articles))
        .route("/api/files/url", get(files::download_url))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// API routes plus the Leptos SSR page and its static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[workspace.metadata.leptos]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(webarchive::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || webarchive::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // Serve Leptos static assets (WASM, CSS, JS) from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
