//! Firebase Storage download URLs.
//!
//! A stored file is fetchable at its object URL with `alt=media` and one of
//! the object's download tokens. The token comes from the object metadata,
//! which requires the caller's ID token to read.

use serde::Deserialize;
use url::Url;

use super::backend::BackendError;

/// Object URL `{base}/b/{bucket}/o/{path}` with the path encoded as a single
/// segment (`/` becomes `%2F`).
///
/// # Errors
///
/// Returns [`BackendError::Decode`] if the base URL is not absolute.
pub fn object_url(base: &str, bucket: &str, path: &str) -> Result<Url, BackendError> {
    let mut url = Url::parse(base).map_err(|e| BackendError::Decode(format!("storage base url {base:?}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| BackendError::Decode(format!("storage base url {base:?} cannot have a path")))?
        .pop_if_empty()
        .extend(["b", bucket, "o", path]);
    Ok(url)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectMetadata {
    #[serde(default)]
    download_tokens: Option<String>,
}

/// First token of a comma-separated `downloadTokens` metadata value.
///
/// # Errors
///
/// Returns [`BackendError::Decode`] if the body is not object metadata or the
/// object has no download token.
pub fn first_download_token(body: &str) -> Result<String, BackendError> {
    let metadata: ObjectMetadata =
        serde_json::from_str(body).map_err(|e| BackendError::Decode(format!("object metadata: {e}")))?;
    metadata
        .download_tokens
        .as_deref()
        .and_then(|tokens| tokens.split(',').map(str::trim).find(|t| !t.is_empty()))
        .map(str::to_owned)
        .ok_or_else(|| BackendError::Decode("object has no download token".to_owned()))
}

/// Public download URL for an object.
#[must_use]
pub fn download_url(mut object_url: Url, token: &str) -> String {
    object_url
        .query_pairs_mut()
        .clear()
        .append_pair("alt", "media")
        .append_pair("token", token);
    object_url.into()
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
