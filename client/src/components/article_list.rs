//! Virtualized list of article summaries.
//!
//! ARCHITECTURE
//! ============
//! A scroll container holds a spacer of the full list height; only the rows
//! in the current render window are mounted, absolutely positioned by
//! [`row_layout`]. Scroll offset, scroll direction, and the selected row
//! are local to this component.

use leptos::prelude::*;

use crate::net::types::Article;
use crate::util::format::{display_date, thumb_src};
use crate::util::layout::{ROW_HEIGHT, row_layout, title_weight};
use crate::util::virtual_list::{RowWindow, ScrollDirection, Viewport, render_window, total_height};

#[cfg(test)]
#[path = "article_list_test.rs"]
mod article_list_test;

/// Identity of a mounted row: its position plus the article's link.
///
/// A reload that puts a different article at the same index yields a new
/// key, so the row is rebuilt and a stale selection no longer matches.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RowKey {
    pub index: usize,
    pub url: String,
}

impl RowKey {
    #[must_use]
    pub fn new(index: usize, article: &Article) -> Self {
        Self { index, url: article.url.clone() }
    }
}

/// Keyed rows inside `window`, skipping indices past the end of `items`.
#[must_use]
pub fn window_rows(items: &[Article], window: RowWindow) -> Vec<(RowKey, Article)> {
    window
        .indices()
        .filter_map(|index| items.get(index).map(|article| (RowKey::new(index, article), article.clone())))
        .collect()
}

/// Windowed article list of `width` x `height` pixels.
#[component]
pub fn ArticleList(
    #[prop(into)] articles: Signal<Vec<Article>>,
    #[prop(into)] width: Signal<f64>,
    #[prop(into)] height: Signal<f64>,
    on_row_click: Callback<Article>,
) -> impl IntoView {
    let selected = RwSignal::new(None::<RowKey>);
    let scroll_top = RwSignal::new(0.0_f64);
    let direction = RwSignal::new(ScrollDirection::default());

    let row_count = move || articles.with(Vec::len);
    let window = Memo::new(move |_| {
        let viewport = Viewport { scroll_top: scroll_top.get(), height: height.get(), direction: direction.get() };
        render_window(row_count(), ROW_HEIGHT, &viewport)
    });

    let on_scroll = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let Some(el) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            else {
                return;
            };
            let next = f64::from(el.scroll_top());
            let previous = scroll_top.get_untracked();
            direction.update(|d| *d = ScrollDirection::between(previous, next, *d));
            scroll_top.set(next);
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let container_style = move || format!("width: {}px; height: {}px;", width.get(), height.get());
    let spacer_style = move || format!("height: {}px;", total_height(row_count(), ROW_HEIGHT));

    let rows = move || {
        let window = window.get();
        articles.with(|items| window_rows(items, window))
    };

    view! {
        <div class="article-list" style=container_style on:scroll=on_scroll>
            <div class="article-list__spacer" style=spacer_style>
                <For
                    each=rows
                    key=|(key, _)| key.clone()
                    children=move |(row_key, article)| {
                        view! { <ArticleRow row_key article width selected on_row_click/> }
                    }
                />
            </div>
        </div>
    }
}

#[component]
fn ArticleRow(
    row_key: RowKey,
    article: Article,
    #[prop(into)] width: Signal<f64>,
    selected: RwSignal<Option<RowKey>>,
    on_row_click: Callback<Article>,
) -> impl IntoView {
    let index = row_key.index;
    let row_style = move || row_layout(index, width.get()).style();
    let thumb_style = row_layout(index, 0.0).thumb_style();
    let thumb = thumb_src(article.thumb.as_deref());
    let date = display_date(article.created_at);
    let title = article.title.clone();

    let is_selected = {
        let row_key = row_key.clone();
        move || selected.with(|s| s.as_ref() == Some(&row_key))
    };
    let title_style = move || format!("font-weight: {};", title_weight(is_selected()));

    let on_click = move |_| {
        selected.set(Some(row_key.clone()));
        on_row_click.run(article.clone());
    };

    view! {
        <div class="article-row" style=row_style on:click=on_click>
            <img class="article-row__thumb" src=thumb alt="" style=thumb_style/>
            <div class="article-row__title" style=title_style>{title}</div>
            <div class="article-row__date">{date}</div>
        </div>
    }
}
