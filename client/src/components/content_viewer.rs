//! Embedded document frame, or a plain external link when no file exists.

use leptos::prelude::*;

use crate::util::layout::frame_size;

#[cfg(test)]
#[path = "content_viewer_test.rs"]
mod content_viewer_test;

/// Lets one frame `load` through per framed URL.
///
/// Armed when the viewer starts framing a URL; the first load event for that
/// URL disarms it. Later loads (reloads, navigation inside the frame) and
/// loads for a URL the viewer has moved away from are swallowed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameLoadGate {
    armed: Option<String>,
}

impl FrameLoadGate {
    /// Point the gate at what is on screen now. Link mode and empty URLs
    /// leave it disarmed.
    pub fn arm(&mut self, url: &str, framed: bool) {
        self.armed = (framed && !url.is_empty()).then(|| url.to_owned());
    }

    /// Whether a load event for `url` should be reported.
    pub fn fire(&mut self, url: &str) -> bool {
        if self.armed.as_deref() == Some(url) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}

/// Shows `url` either framed (`no_pdf == false`) or as an outbound link.
///
/// In frame mode `on_load` runs once per displayed URL when the frame
/// finishes loading. Link mode never calls it.
#[component]
pub fn ContentViewer(
    #[prop(into)] url: Signal<String>,
    #[prop(into)] title: Signal<String>,
    #[prop(into)] no_pdf: Signal<bool>,
    #[prop(into)] width: Signal<f64>,
    #[prop(into)] height: Signal<f64>,
    on_load: Callback<()>,
) -> impl IntoView {
    let gate = StoredValue::new(FrameLoadGate::default());
    Effect::new(move || {
        let current = url.get();
        let framed = !no_pdf.get();
        gate.update_value(|g| g.arm(&current, framed));
    });

    let on_frame_load = move |_| {
        let current = url.get_untracked();
        if gate.try_update_value(|g| g.fire(&current)).unwrap_or(false) {
            on_load.run(());
        }
    };

    let frame_style = move || {
        let (w, h) = frame_size(width.get(), height.get());
        format!("width: {w}px; height: {h}px; border: none;")
    };

    view! {
        <Show
            when=move || no_pdf.get()
            fallback=move || {
                view! {
                    <iframe
                        class="content-viewer__frame"
                        src=move || url.get()
                        title=move || title.get()
                        style=frame_style
                        on:load=on_frame_load
                    ></iframe>
                }
            }
        >
            <div class="content-viewer__link">
                <a href=move || url.get() target="_blank" rel="noopener noreferrer">
                    {move || url.get()}
                </a>
            </div>
        </Show>
    }
}
