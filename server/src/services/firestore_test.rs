use super::*;
use time::macros::datetime;

fn doc(name: &str, title: &str, created_at: &str, extra: &str) -> String {
    format!(
        r#"{{"document":{{"name":"projects/p/databases/(default)/documents/articles/{name}","fields":{{
            "title":{{"stringValue":"{title}"}},
            "created_at":{{"timestampValue":"{created_at}"}},
            "url":{{"stringValue":"https://example.com/{name}"}}{extra}
        }}}},"readTime":"2024-01-01T00:00:00Z"}}"#
    )
}

// =============================================================================
// request building
// =============================================================================

#[test]
fn run_query_url_targets_default_database() {
    assert_eq!(
        run_query_url("https://firestore.googleapis.com/v1", "web-archive"),
        "https://firestore.googleapis.com/v1/projects/web-archive/databases/(default)/documents:runQuery"
    );
}

#[test]
fn run_query_body_orders_by_created_at_descending() {
    let body = run_query_body("articles");
    let query = &body["structuredQuery"];
    assert_eq!(query["from"][0]["collectionId"], "articles");
    assert_eq!(query["orderBy"][0]["field"]["fieldPath"], "created_at");
    assert_eq!(query["orderBy"][0]["direction"], "DESCENDING");
    assert!(query.get("limit").is_none());
}

// =============================================================================
// decode_articles
// =============================================================================

#[test]
fn decodes_documents_in_order() {
    let body = format!(
        "[{},{}]",
        doc("b", "Newer", "2021-06-01T08:00:00.123456Z", r#","pdf":{"stringValue":"pdfs/b.pdf"}"#),
        doc("a", "Older", "2020-01-02T00:00:00Z", r#","thumb":{"bytesValue":"iVBORw0KGgo="}"#),
    );
    let articles = decode_articles(&body).unwrap();
    assert_eq!(articles.len(), 2);

    assert_eq!(articles[0].title, "Newer");
    assert_eq!(articles[0].pdf.as_deref(), Some("pdfs/b.pdf"));
    assert!(articles[0].thumb.is_none());
    assert_eq!(articles[0].created_at.date(), time::macros::date!(2021 - 06 - 01));

    assert_eq!(articles[1].title, "Older");
    assert_eq!(articles[1].created_at, datetime!(2020-01-02 00:00:00 UTC));
    assert_eq!(articles[1].thumb.as_deref(), Some("iVBORw0KGgo="));
    assert_eq!(articles[1].url, "https://example.com/a");
}

#[test]
fn empty_result_set_decodes_to_empty_list() {
    let body = r#"[{"readTime":"2024-01-01T00:00:00Z"}]"#;
    assert!(decode_articles(body).unwrap().is_empty());
}

#[test]
fn empty_pdf_and_thumb_count_as_absent() {
    let body = format!(
        "[{}]",
        doc("c", "C", "2020-01-02T00:00:00Z", r#","pdf":{"stringValue":""},"thumb":{"bytesValue":""}"#)
    );
    let articles = decode_articles(&body).unwrap();
    assert!(articles[0].pdf.is_none());
    assert!(articles[0].thumb.is_none());
}

#[test]
fn thumb_stored_as_string_is_accepted() {
    let body = format!("[{}]", doc("d", "D", "2020-01-02T00:00:00Z", r#","thumb":{"stringValue":"AAAA"}"#));
    assert_eq!(decode_articles(&body).unwrap()[0].thumb.as_deref(), Some("AAAA"));
}

#[test]
fn malformed_document_is_skipped() {
    let body = format!(
        r#"[{},{{"document":{{"name":"x","fields":{{"title":{{"stringValue":"no date"}}}}}}}}]"#,
        doc("a", "Kept", "2020-01-02T00:00:00Z", "")
    );
    let articles = decode_articles(&body).unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "Kept");
}

#[test]
fn non_array_body_is_decode_error() {
    let err = decode_articles(r#"{"error":{"message":"nope"}}"#).unwrap_err();
    assert!(matches!(err, BackendError::Decode(_)));
}
