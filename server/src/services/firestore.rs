//! Firestore `runQuery` request building and response decoding.
//!
//! Firestore returns every field as a typed value object (`{"stringValue": ..}`,
//! `{"timestampValue": ..}`, ...). Decoding flattens those into [`Article`]s
//! so the browser only ever sees plain JSON.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use webarchive::net::types::Article;

use super::backend::BackendError;

/// Field the archive is ordered by, newest first.
pub const ORDER_FIELD: &str = "created_at";

#[must_use]
pub fn run_query_url(base: &str, project_id: &str) -> String {
    format!("{base}/projects/{project_id}/databases/(default)/documents:runQuery")
}

/// Structured query selecting the whole collection, newest first.
#[must_use]
pub fn run_query_body(collection: &str) -> Value {
    serde_json::json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "orderBy": [{
                "field": { "fieldPath": ORDER_FIELD },
                "direction": "DESCENDING",
            }],
        }
    })
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    document: Option<Document>,
}

#[derive(Debug, Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: HashMap<String, Value>,
}

/// Decode a `runQuery` response body, preserving result order.
///
/// Entries without a `document` (progress markers, empty result sets) are
/// skipped. Documents missing a required field are logged and skipped.
///
/// # Errors
///
/// Returns [`BackendError::Decode`] if the body is not a `runQuery` response.
pub fn decode_articles(body: &str) -> Result<Vec<Article>, BackendError> {
    let results: Vec<QueryResult> =
        serde_json::from_str(body).map_err(|e| BackendError::Decode(format!("runQuery response: {e}")))?;

    let mut articles = Vec::with_capacity(results.len());
    for document in results.into_iter().filter_map(|r| r.document) {
        match decode_document(&document) {
            Ok(article) => articles.push(article),
            Err(reason) => tracing::warn!(document = %document.name, %reason, "skipping malformed article"),
        }
    }
    Ok(articles)
}

fn decode_document(document: &Document) -> Result<Article, String> {
    let fields = &document.fields;
    let title = string_field(fields, "title").ok_or("missing title")?;
    let created_at = timestamp_field(fields, ORDER_FIELD).ok_or("missing or invalid created_at")?;
    let url = string_field(fields, "url").ok_or("missing url")?;
    Ok(Article {
        title,
        created_at,
        thumb: bytes_field(fields, "thumb").filter(|t| !t.is_empty()),
        pdf: string_field(fields, "pdf").filter(|p| !p.is_empty()),
        url,
    })
}

fn string_field(fields: &HashMap<String, Value>, key: &str) -> Option<String> {
    fields.get(key)?.get("stringValue")?.as_str().map(str::to_owned)
}

/// Blob fields arrive base64-encoded already; some writers store the
/// encoded text as a plain string instead.
fn bytes_field(fields: &HashMap<String, Value>, key: &str) -> Option<String> {
    let value = fields.get(key)?;
    value
        .get("bytesValue")
        .or_else(|| value.get("stringValue"))?
        .as_str()
        .map(str::to_owned)
}

fn timestamp_field(fields: &HashMap<String, Value>, key: &str) -> Option<OffsetDateTime> {
    let raw = fields.get(key)?.get("timestampValue")?.as_str()?;
    OffsetDateTime::parse(raw, &Rfc3339).ok()
}

#[cfg(test)]
#[path = "firestore_test.rs"]
mod tests;
