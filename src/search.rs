//! Full-text search over the remote source.
//!
//! A search bypasses the suggestion flow: it asks the server for every
//! row matching the complete input value, with no row cap and no cache
//! writes, and reports a single terminal event instead of incremental
//! deliveries. The embedder is expected to stop issuing suggestion
//! requests while a search is active, the way a UI disables its input.

use std::cell::RefCell;
use std::rc::Rc;

use crate::candidate::Candidate;
use crate::matcher::{CachingMatcher, ListenerHandle};

/// Terminal outcome of one search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    Matches {
        token: String,
        matches: Vec<Candidate>,
    },
    /// Nothing matched, or the request failed.
    NoMatch { token: String },
}

#[derive(Debug)]
struct ActiveSearch {
    token: String,
    handle: ListenerHandle,
    /// Filled by the capture listener when the result delivery arrives.
    captured: Rc<RefCell<Option<Vec<Candidate>>>>,
}

/// Drives full-text searches through a `CachingMatcher`.
///
/// One search runs at a time. While it runs, cache writes on the matcher
/// are suspended so the unbounded result set never pollutes the
/// suggestion cache; they are restored when the search completes.
#[derive(Debug)]
pub struct FullTextSearch {
    last_token: Option<String>,
    /// When set, a search for the same token as the previous one is
    /// skipped rather than repeated.
    force_unique_token: bool,
    active: Option<ActiveSearch>,
}

impl Default for FullTextSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl FullTextSearch {
    pub fn new() -> Self {
        Self {
            last_token: None,
            force_unique_token: true,
            active: None,
        }
    }

    pub fn set_force_unique_token(&mut self, force: bool) {
        self.force_unique_token = force;
    }

    /// Starts a search for `token`. Returns whether one actually started:
    /// a search already in progress, or a repeat of the previous token
    /// while unique tokens are forced, is skipped.
    pub fn begin(&mut self, matcher: &mut CachingMatcher, token: &str) -> bool {
        if self.active.is_some() {
            return false;
        }
        if self.force_unique_token && self.last_token.as_deref() == Some(token) {
            return false;
        }
        self.last_token = Some(token.to_string());

        matcher.set_local_cache_disabled(true);

        // Result deliveries are the ones that follow a remote outcome;
        // those carry preserve_highlight.
        let captured: Rc<RefCell<Option<Vec<Candidate>>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&captured);
        let handle = matcher.subscribe(move |delivery| {
            if delivery.preserve_highlight {
                *sink.borrow_mut() = Some(delivery.matches.to_vec());
            }
        });

        matcher.request_full_text(token);
        self.active = Some(ActiveSearch {
            token: token.to_string(),
            handle,
            captured,
        });
        true
    }

    /// Polls the matcher and returns the search's terminal event once its
    /// results have arrived. A failed request reports `NoMatch`, since
    /// the displayed list was cleared when the search began.
    pub fn poll(&mut self, matcher: &mut CachingMatcher) -> Option<SearchEvent> {
        matcher.poll();

        let done = self
            .active
            .as_ref()
            .is_some_and(|a| a.captured.borrow().is_some());
        if !done {
            return None;
        }

        let active = self.active.take()?;
        matcher.unsubscribe(active.handle);
        matcher.set_local_cache_disabled(false);

        let matches = active.captured.borrow_mut().take().unwrap_or_default();
        if matches.is_empty() {
            Some(SearchEvent::NoMatch {
                token: active.token,
            })
        } else {
            Some(SearchEvent::Matches {
                token: active.token,
                matches,
            })
        }
    }

    pub fn searching(&self) -> bool {
        self.active.is_some()
    }

    pub fn last_token(&self) -> Option<&str> {
        self.last_token.as_deref()
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
