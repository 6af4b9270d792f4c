//! HTTP error responses.
//!
//! Every failing API route answers `{"error": "<message>"}` with a status
//! matching the failure, which the browser shows inline.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use webarchive::net::types::ErrorBody;

use crate::services::backend::BackendError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not signed in")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("archive backend is not configured")]
    NotConfigured,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl AppError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::Backend(BackendError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotConfigured | Self::Backend(BackendError::NotConfigured) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Backend(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, %status, "request failed");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
