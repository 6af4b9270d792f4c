//! Browser measurement hooks for responsive pane sizing.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app shell measures its own panes and passes pixel sizes down. Sizes are
//! re-read on window `resize`. During SSR the fallbacks are used unchanged.

use leptos::prelude::*;

/// Window size assumed before the browser reports one.
pub const FALLBACK_WINDOW_WIDTH: f64 = 1280.0;
pub const FALLBACK_WINDOW_HEIGHT: f64 = 800.0;

/// Rendered width of `node`, tracked across window resizes.
pub fn use_element_width(node: NodeRef<leptos::html::Div>, fallback: f64) -> Signal<f64> {
    let width = RwSignal::new(fallback);

    #[cfg(feature = "hydrate")]
    {
        let measure = move || {
            if let Some(el) = node.get_untracked() {
                width.set(el.get_bounding_client_rect().width());
            }
        };
        Effect::new(move || {
            if node.get().is_some() {
                measure();
            }
        });
        let handle = window_event_listener(leptos::ev::resize, move |_| measure());
        on_cleanup(move || handle.remove());
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = node;

    width.into()
}

/// Window inner height, tracked across resizes.
pub fn use_window_height() -> Signal<f64> {
    let height = RwSignal::new(FALLBACK_WINDOW_HEIGHT);

    #[cfg(feature = "hydrate")]
    {
        let measure = move || {
            if let Some(h) = window().inner_height().ok().and_then(|v| v.as_f64()) {
                height.set(h);
            }
        };
        measure();
        let handle = window_event_listener(leptos::ev::resize, move |_| measure());
        on_cleanup(move || handle.remove());
    }

    height.into()
}
