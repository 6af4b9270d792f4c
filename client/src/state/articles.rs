//! The loaded article collection and its load gate.
//!
//! DESIGN
//! ======
//! The collection is fetched once per signed-in user and replaced wholesale;
//! it is never sorted or edited locally. Each load carries a generation so a
//! response that arrives after the user changed is dropped.

#[cfg(test)]
#[path = "articles_test.rs"]
mod articles_test;

use crate::net::api::ApiError;
use crate::net::types::{Article, User};

/// What the app shell should do after observing the session user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadTrigger {
    /// Nothing changed.
    Idle,
    /// A user became present: start load `generation`.
    Start(u64),
    /// The user went away: the collection was cleared.
    Cleared,
}

/// Result of applying a finished load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The collection was replaced with this many articles.
    Replaced(usize),
    /// The query failed; the previous collection is kept.
    Failed(ApiError),
    /// The response belonged to a superseded load and was dropped.
    Stale,
}

/// Articles in backend order plus load bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArticlesState {
    pub items: Vec<Article>,
    loaded_for: Option<String>,
    generation: u64,
}

impl ArticlesState {
    /// Observe the current session user and decide whether to load.
    ///
    /// Exactly one `Start` is produced per absent→present transition (or
    /// switch to a different user); repeated observations are `Idle`.
    pub fn observe_user(&mut self, user: Option<&User>) -> LoadTrigger {
        match user {
            None => {
                if self.loaded_for.take().is_none() {
                    return LoadTrigger::Idle;
                }
                self.items.clear();
                self.generation += 1;
                LoadTrigger::Cleared
            }
            Some(u) if self.loaded_for.as_deref() == Some(u.id.as_str()) => LoadTrigger::Idle,
            Some(u) => {
                self.loaded_for = Some(u.id.clone());
                self.generation += 1;
                LoadTrigger::Start(self.generation)
            }
        }
    }

    /// Apply the response of load `generation`.
    pub fn finish_load(&mut self, generation: u64, result: Result<Vec<Article>, ApiError>) -> LoadOutcome {
        if generation != self.generation {
            return LoadOutcome::Stale;
        }
        match result {
            Ok(items) => {
                let count = items.len();
                self.items = items;
                LoadOutcome::Replaced(count)
            }
            Err(e) => LoadOutcome::Failed(e),
        }
    }
}
