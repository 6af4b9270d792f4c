//! Article listing.

use axum::Json;
use axum::extract::State;
use webarchive::net::types::Article;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/articles`: every article, newest first.
pub async fn list_articles(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<Article>>, AppError> {
    let backend = state.backend.as_ref().ok_or(AppError::NotConfigured)?;
    let articles = backend.query_articles(auth.id_token()).await?;
    tracing::debug!(count = articles.len(), user = %auth.session.user.id, "listed articles");
    Ok(Json(articles))
}

#[cfg(test)]
#[path = "articles_test.rs"]
mod tests;
