//! App shell: top bar over the list pane and the content pane.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns the article collection and the content view state. Article loading is
//! gated on the session user; row clicks drive blob resolution and the content
//! viewer's frame load clears the progress indicator.

use leptos::prelude::*;

use crate::components::article_list::ArticleList;
use crate::components::content_viewer::ContentViewer;
use crate::components::top_bar::TopBar;
use crate::net::types::Article;
use crate::state::articles::{ArticlesState, LoadTrigger};
use crate::state::session::SessionContext;
use crate::state::view::{ContentRequest, ViewState};
use crate::util::layout::split_panes;
use crate::util::measure::{FALLBACK_WINDOW_WIDTH, use_element_width, use_window_height};

/// Root layout for a session.
#[component]
pub fn AppShell(session: SessionContext) -> impl IntoView {
    let articles = RwSignal::new(ArticlesState::default());
    let view_state = RwSignal::new(ViewState::default());

    let list_ref = NodeRef::<leptos::html::Div>::new();
    let content_ref = NodeRef::<leptos::html::Div>::new();
    let (list_fallback, content_fallback) = split_panes(FALLBACK_WINDOW_WIDTH);
    let list_width = use_element_width(list_ref, list_fallback);
    let content_width = use_element_width(content_ref, content_fallback);
    let pane_height = use_window_height();

    // Load the collection once per user arrival; clear everything on departure.
    let user = session.user();
    Effect::new(move || {
        let current = user.get();
        let trigger = articles
            .try_update_untracked(|a| a.observe_user(current.as_ref()))
            .unwrap_or(LoadTrigger::Idle);
        match trigger {
            LoadTrigger::Idle => {}
            LoadTrigger::Cleared => {
                articles.notify();
                view_state.update(ViewState::reset);
            }
            LoadTrigger::Start(generation) => {
                view_state.update(ViewState::articles_load_started);
                spawn_article_load(articles, view_state, generation);
            }
        }
    });

    let on_row_click = Callback::new(move |article: Article| {
        if let Some(request) = view_state.try_update(|v| v.select(&article)).flatten() {
            spawn_content_resolve(view_state, request);
        }
    });
    let on_load = Callback::new(move |()| {
        view_state.update(|v| {
            v.frame_loaded();
        });
    });

    let session_error = session.error();
    let error = Signal::derive(move || session_error.get().or_else(|| view_state.with(|v| v.error.clone())));
    let loading = Memo::new(move |_| view_state.with(ViewState::loading));

    let items = Memo::new(move |_| articles.with(|a| a.items.clone()));
    // Memos so the viewer only sees real changes, not every view-state write.
    let has_content = Memo::new(move |_| view_state.with(|v| v.content_url.is_some()));
    let content_url = Memo::new(move |_| view_state.with(|v| v.content_url.clone().unwrap_or_default()));
    let content_title = Memo::new(move |_| view_state.with(|v| v.content_title.clone()));
    let no_pdf = Memo::new(move |_| view_state.with(|v| v.no_pdf));

    view! {
        <div class="app-shell">
            <TopBar loading error session/>
            <div class="app-shell__panes">
                <div class="app-shell__list-pane" node_ref=list_ref>
                    <ArticleList articles=items width=list_width height=pane_height on_row_click/>
                </div>
                <div class="app-shell__content-pane" node_ref=content_ref>
                    <Show when=move || has_content.get()>
                        <ContentViewer
                            url=content_url
                            title=content_title
                            no_pdf
                            width=content_width
                            height=pane_height
                            on_load
                        />
                    </Show>
                </div>
            </div>
        </div>
    }
}

fn spawn_article_load(articles: RwSignal<ArticlesState>, view_state: RwSignal<ViewState>, generation: u64) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = crate::net::api::fetch_articles().await;
        let Some(outcome) = articles.try_update(|a| a.finish_load(generation, result)) else {
            return;
        };
        match &outcome {
            crate::state::articles::LoadOutcome::Replaced(count) => log::info!("loaded {count} articles"),
            crate::state::articles::LoadOutcome::Failed(e) => log::warn!("article query failed: {e}"),
            crate::state::articles::LoadOutcome::Stale => log::debug!("dropped stale article load {generation}"),
        }
        view_state.update(|v| v.articles_load_finished(&outcome));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (articles, view_state, generation);
}

fn spawn_content_resolve(view_state: RwSignal<ViewState>, request: ContentRequest) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = crate::net::api::resolve_download_url(&request.path).await;
        if let Err(e) = &result {
            log::warn!("could not resolve {}: {e}", request.path);
        }
        let applied = view_state.try_update(|v| v.resolved(request.token, result)).unwrap_or(false);
        if !applied {
            log::debug!("dropped stale resolution for request {}", request.token);
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (view_state, request);
}
