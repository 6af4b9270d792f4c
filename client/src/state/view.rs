//! Content view state owned by the app shell.
//!
//! STATE MACHINE
//! =============
//! `Idle -> Loading -> Loaded`. A query or URL resolution in flight keeps the
//! progress indicator on. A resolved URL that differs from the one on screen
//! keeps it on until the embedded frame reports `load`; an identical URL
//! clears it at once because no new frame load will happen.
//!
//! Every content request takes a fresh token. Only the newest token's
//! resolution or frame load touches the state; anything older is dropped.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::net::api::ApiError;
use crate::net::types::Article;
use crate::state::articles::LoadOutcome;

/// Token identifying one content-load request.
pub type RequestToken = u64;

/// A stored file that must be resolved before it can be shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentRequest {
    pub token: RequestToken,
    pub path: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    /// URL currently displayed (frame source or external link).
    pub content_url: Option<String>,
    pub content_title: String,
    /// Link mode instead of frame mode.
    pub no_pdf: bool,
    /// Non-auth failure shown in the top bar.
    pub error: Option<String>,
    articles_loading: bool,
    content_loading: bool,
    latest_token: RequestToken,
    awaiting_frame: Option<RequestToken>,
}

impl ViewState {
    /// Whether the progress indicator is shown.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.articles_loading || self.content_loading
    }

    pub fn articles_load_started(&mut self) {
        self.articles_loading = true;
        self.error = None;
    }

    pub fn articles_load_finished(&mut self, outcome: &LoadOutcome) {
        match outcome {
            LoadOutcome::Replaced(_) => self.articles_loading = false,
            LoadOutcome::Failed(e) => {
                self.articles_loading = false;
                self.error = Some(format!("Could not load articles: {e}"));
            }
            // A newer load owns the indicator.
            LoadOutcome::Stale => {}
        }
    }

    /// Drop everything on sign-out, invalidating in-flight requests.
    pub fn reset(&mut self) {
        let latest_token = self.latest_token + 1;
        *self = Self { latest_token, ..Self::default() };
    }

    /// React to a row selection. Returns the file to resolve, if any.
    pub fn select(&mut self, article: &Article) -> Option<ContentRequest> {
        self.latest_token += 1;
        self.awaiting_frame = None;
        self.error = None;
        self.content_title.clone_from(&article.title);

        match article.pdf_path() {
            Some(path) => {
                self.content_loading = true;
                if self.no_pdf {
                    // Never frame an external link while the file resolves.
                    self.content_url = None;
                    self.no_pdf = false;
                }
                Some(ContentRequest { token: self.latest_token, path: path.to_owned() })
            }
            None => {
                // A superseded resolution must not leave the indicator on.
                self.content_loading = false;
                self.no_pdf = true;
                self.content_url = Some(article.url.clone());
                None
            }
        }
    }

    /// Apply the resolution of request `token`. Returns `false` if stale.
    pub fn resolved(&mut self, token: RequestToken, result: Result<String, ApiError>) -> bool {
        if token != self.latest_token {
            return false;
        }
        match result {
            Ok(url) => {
                if self.content_url.as_deref() == Some(url.as_str()) {
                    self.content_loading = false;
                    self.awaiting_frame = None;
                } else {
                    self.awaiting_frame = Some(token);
                }
                self.content_url = Some(url);
            }
            Err(e) => {
                self.content_loading = false;
                self.awaiting_frame = None;
                self.content_url = None;
                self.error = Some(format!("Could not open \"{}\": {e}", self.content_title));
            }
        }
        true
    }

    /// The embedded frame finished loading. Returns `false` if nothing was waiting.
    pub fn frame_loaded(&mut self) -> bool {
        if self.awaiting_frame != Some(self.latest_token) {
            return false;
        }
        self.awaiting_frame = None;
        self.content_loading = false;
        true
    }
}
