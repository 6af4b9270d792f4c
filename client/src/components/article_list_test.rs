use super::*;
use time::macros::datetime;

fn article(name: &str) -> Article {
    Article {
        title: name.to_uppercase(),
        created_at: datetime!(2020-01-02 00:00:00 UTC),
        thumb: None,
        pdf: None,
        url: format!("https://example.com/{name}"),
    }
}

#[test]
fn window_rows_keys_by_index_and_url() {
    let items = vec![article("a"), article("b"), article("c")];
    let rows = window_rows(&items, RowWindow { start: 1, end: 3 });
    let keys: Vec<RowKey> = rows.iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(
        keys,
        [
            RowKey { index: 1, url: "https://example.com/b".to_owned() },
            RowKey { index: 2, url: "https://example.com/c".to_owned() },
        ]
    );
    assert_eq!(rows[0].1.title, "B");
}

#[test]
fn window_rows_skips_indices_past_the_end() {
    let items = vec![article("a")];
    let rows = window_rows(&items, RowWindow { start: 0, end: 4 });
    assert_eq!(rows.len(), 1);
    assert!(window_rows(&[], RowWindow { start: 0, end: 4 }).is_empty());
}

#[test]
fn scrolling_keeps_keys_of_rows_still_in_window() {
    let items: Vec<Article> = ["a", "b", "c", "d"].into_iter().map(article).collect();
    let before = window_rows(&items, RowWindow { start: 0, end: 3 });
    let after = window_rows(&items, RowWindow { start: 1, end: 4 });
    assert_eq!(before[1].0, after[0].0);
    assert_eq!(before[2].0, after[1].0);
}

#[test]
fn selection_does_not_follow_index_into_reloaded_collection() {
    let old = vec![article("a"), article("b")];
    let selected = window_rows(&old, RowWindow { start: 0, end: 2 })[1].0.clone();

    // Reload puts a different article at index 1.
    let reloaded = vec![article("a"), article("z")];
    let rows = window_rows(&reloaded, RowWindow { start: 0, end: 2 });
    assert_eq!(rows[1].0.index, selected.index);
    assert_ne!(rows[1].0, selected);
}

#[test]
fn selection_survives_reload_of_same_article() {
    let old = vec![article("a"), article("b")];
    let selected = window_rows(&old, RowWindow { start: 0, end: 2 })[0].0.clone();
    let reloaded = vec![article("a"), article("c")];
    assert_eq!(window_rows(&reloaded, RowWindow { start: 0, end: 2 })[0].0, selected);
}
