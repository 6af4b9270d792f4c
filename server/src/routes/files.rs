//! Stored-file download URLs.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use webarchive::net::types::DownloadUrl;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FileQuery {
    #[serde(default)]
    path: String,
}

/// `GET /api/files/url?path=`: fetchable URL for a stored file.
pub async fn download_url(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<FileQuery>,
) -> Result<Json<DownloadUrl>, AppError> {
    let path = query.path.trim();
    if path.is_empty() {
        return Err(AppError::BadRequest("path is required".to_owned()));
    }
    let backend = state.backend.as_ref().ok_or(AppError::NotConfigured)?;
    let url = backend.download_url(auth.id_token(), path).await?;
    Ok(Json(DownloadUrl { url }))
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;
