#![recursion_limit = "256"]

mod config;
mod error;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use crate::services::backend::Backend;
use crate::services::firebase::FirebaseClient;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid configuration");

    let http = config.timeouts.http_client().expect("http client init failed");

    // Archive backend is optional: without it the page still serves and the
    // API answers 503.
    let backend: Option<Arc<dyn Backend>> = match config.firebase {
        Some(firebase) => {
            let client = FirebaseClient::new(http.clone(), firebase);
            tracing::info!(project = client.project_id(), "archive backend configured");
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!("FIREBASE_* not set, archive routes disabled");
            None
        }
    };
    for provider in webarchive::net::types::ProviderKind::ALL {
        if config.oauth.get(provider).is_err() {
            tracing::warn!(provider = provider.slug(), "sign-in provider not configured");
        }
    }

    let port = config.port;
    let state = state::AppState::new(backend, config.oauth, http, config.cookie_secure);

    let app = routes::leptos_app(state).expect("leptos app init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "webarchive listening");
    axum::serve(listener, app).await.expect("server failed");
}
