//! Top bar with progress indicator, title, inline error text, and session control.

use leptos::prelude::*;

use crate::components::session_button::SessionButton;
use crate::state::session::SessionContext;

/// Application bar above both panes.
#[component]
pub fn TopBar(
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] error: Signal<Option<String>>,
    session: SessionContext,
) -> impl IntoView {
    view! {
        <header class="top-bar">
            <Show when=move || loading.get()>
                <span class="top-bar__progress" role="progressbar" aria-label="Loading"></span>
            </Show>
            <h1 class="top-bar__title">
                "WebArchive"
                <Show when=move || error.with(Option::is_some)>
                    <span class="top-bar__error">{move || error.get().unwrap_or_default()}</span>
                </Show>
            </h1>
            <SessionButton session/>
        </header>
    }
}
