//! The caching layer between a text input and a remote suggestion source.
//!
//! Every keystroke becomes a `request_matches` call. The matcher answers
//! immediately from its local cache, arms a trailing throttle window, and
//! once the window elapses sends the newest request to the remote worker.
//! Remote rows are merged into whatever is already displayed rather than
//! replacing it, so the visible list only ever grows between keystrokes
//! and the user's highlight survives.
//!
//! The matcher is single-owner and poll-driven: the owning thread calls
//! `poll` regularly (each UI tick) to fire due dispatches and apply
//! outcomes that arrived from the worker. Responses are stamped with the
//! generation of the request that produced them; anything stale is
//! dropped without touching displayed state.

use std::collections::HashSet;
use std::fmt;
use std::sync::mpsc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::cache::CandidateCache;
use crate::candidate::Candidate;
use crate::config::MatcherConfig;
use crate::remote::spawn_remote_worker;
use crate::remote::types::{
    RemoteMatcher, RemoteOutcome, RemoteQuery, RemoteRequest, RemoteResponse,
};
use crate::scorer::{cached_matches, MatchLimit};

use super::delivery::{ListenerHandle, ListenerRegistry, MatchDelivery};
use super::state::{MatcherState, Placeholder};
use super::throttle::ThrottleGate;

/// Row cap sent with throttled remote fetches unless overridden.
pub const DEFAULT_REMOTE_FETCH_LIMIT: usize = 100;

/// The most recent request. This is what the next dispatch sends and what
/// remote outcomes are interpreted against.
#[derive(Debug)]
struct PendingRequest {
    token: String,
    full_string: String,
    limit: MatchLimit,
    generation: u64,
}

#[derive(Debug)]
struct InFlight {
    generation: u64,
    cancel: CancellationToken,
}

pub struct CachingMatcher {
    cache: CandidateCache,
    throttle: ThrottleGate,
    listeners: ListenerRegistry,
    pending: Option<PendingRequest>,
    /// Rows currently delivered to listeners, in display order.
    displayed: Vec<Candidate>,
    state: MatcherState,
    /// Bumped on every request; responses carrying an older stamp are
    /// discarded in `poll`.
    generation: u64,
    in_flight: Option<InFlight>,
    remote_fetch_limit: MatchLimit,
    local_cache_disabled: bool,
    request_tx: mpsc::Sender<RemoteRequest>,
    response_rx: mpsc::Receiver<RemoteResponse>,
}

impl CachingMatcher {
    pub fn new<M>(matcher: M) -> Self
    where
        M: RemoteMatcher + 'static,
    {
        Self::with_config(matcher, MatcherConfig::default())
    }

    /// Creates the matcher and spawns its remote worker thread. The worker
    /// exits when the matcher is dropped.
    pub fn with_config<M>(matcher: M, config: MatcherConfig) -> Self
    where
        M: RemoteMatcher + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();
        spawn_remote_worker(matcher, request_rx, response_tx);

        Self {
            cache: CandidateCache::with_max_size(config.max_cache_size),
            throttle: ThrottleGate::new(Duration::from_millis(config.throttle_interval_ms)),
            listeners: ListenerRegistry::default(),
            pending: None,
            displayed: Vec::new(),
            state: MatcherState::Ready,
            generation: 0,
            in_flight: None,
            remote_fetch_limit: MatchLimit::AtMost(config.remote_fetch_limit),
            local_cache_disabled: false,
            request_tx,
            response_rx,
        }
    }

    // ------------------------------------------------------------------
    // Requests
    // ------------------------------------------------------------------

    /// Requests matches for `token`, typically on each edit of the input.
    ///
    /// Cached rows are delivered synchronously before this returns, with
    /// `preserve_highlight` unset. The remote fetch happens later, once
    /// the throttle window elapses and `poll` runs; only the newest
    /// request at that moment is sent.
    ///
    /// `full_string` is the complete input value, for inputs that hold
    /// several comma-separated entries alongside the token being edited.
    pub fn request_matches(&mut self, token: &str, full_string: &str, limit: MatchLimit) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(PendingRequest {
            token: token.to_string(),
            full_string: full_string.to_string(),
            limit,
            generation: self.generation,
        });
        // Empty tokens still go to the server (it may choose to answer),
        // but they never show a fetching placeholder or a no-match state.
        self.state = if should_fetch(token) {
            MatcherState::Fetching
        } else {
            MatcherState::Ready
        };
        self.throttle.arm();

        self.displayed = cached_matches(self.cache.rows(), token, limit);
        self.notify(false);
    }

    /// Requests an unlimited remote search over the complete input value.
    ///
    /// Unlike `request_matches` there is no synchronous delivery: the
    /// displayed list is cleared so the eventual results replace rather
    /// than augment it, and the dispatch skips the throttle window.
    pub fn request_full_text(&mut self, full_string: &str) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(PendingRequest {
            token: String::new(),
            full_string: full_string.to_string(),
            limit: MatchLimit::All,
            generation: self.generation,
        });
        self.state = MatcherState::Fetching;
        self.displayed.clear();
        self.throttle.arm_immediate();
    }

    // ------------------------------------------------------------------
    // Polling
    // ------------------------------------------------------------------

    /// Drives the matcher forward: dispatches the pending request if its
    /// throttle window has elapsed, then applies any outcomes the worker
    /// has sent back. Call this on every tick of the owning loop.
    pub fn poll(&mut self) {
        if self.throttle.should_fire() {
            self.dispatch_pending();
        }
        self.drain_outcomes();
    }

    fn dispatch_pending(&mut self) {
        self.throttle.mark_fired();
        let Some(pending) = &self.pending else {
            return;
        };

        // A dispatch supersedes whatever is still in flight.
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel.cancel();
        }

        let limit = match pending.limit {
            MatchLimit::All => MatchLimit::All,
            MatchLimit::AtMost(_) => self.remote_fetch_limit,
        };
        let cancel = CancellationToken::new();
        let request = RemoteRequest {
            query: RemoteQuery {
                token: pending.token.clone(),
                limit,
                full_string: pending.full_string.clone(),
            },
            generation: pending.generation,
            cancel: cancel.clone(),
        };

        let generation = pending.generation;
        log::debug!("dispatching remote fetch for token {:?}", pending.token);
        if let Err(e) = self.request_tx.send(request) {
            log::warn!("remote worker unavailable: {e}");
            return;
        }
        self.in_flight = Some(InFlight { generation, cancel });
    }

    fn drain_outcomes(&mut self) {
        while let Ok(response) = self.response_rx.try_recv() {
            if response.generation != self.generation {
                log::debug!(
                    "discarding stale remote response (generation {}, current {})",
                    response.generation,
                    self.generation
                );
                continue;
            }
            if self
                .in_flight
                .as_ref()
                .is_some_and(|f| f.generation == response.generation)
            {
                self.in_flight = None;
            }
            self.on_remote_outcome(response.outcome);
        }
    }

    /// Applies one remote outcome for the current request. `poll` calls
    /// this for worker responses; embedders running their own transport
    /// can call it directly.
    ///
    /// Successful matches are cached, merged into the displayed list
    /// without disturbing rows already shown, and delivered with
    /// `preserve_highlight` set. Failures keep the displayed rows and
    /// redeliver them unchanged.
    pub fn on_remote_outcome(&mut self, outcome: RemoteOutcome) {
        match outcome {
            RemoteOutcome::Matches(matches) => {
                if !self.local_cache_disabled {
                    for row in &matches {
                        self.cache.insert(row.clone());
                    }
                }

                let shown: HashSet<&str> =
                    self.displayed.iter().map(|c| c.display_string()).collect();
                let new_rows: Vec<Candidate> = matches
                    .into_iter()
                    .filter(|m| !shown.contains(m.display_string()))
                    .collect();
                self.displayed.extend(new_rows);
                if let Some(pending) = &self.pending {
                    pending.limit.truncate(&mut self.displayed);
                }

                let fetched = self.pending.as_ref().is_some_and(|p| should_fetch(&p.token));
                self.state = if fetched && self.displayed.is_empty() {
                    MatcherState::NoMatch
                } else {
                    MatcherState::Ready
                };
                self.notify(true);
                // Eviction waits until after delivery so a full cache
                // never costs the request its own rows.
                self.cache.clear_if_over_capacity();
            }
            RemoteOutcome::FailedRequest(err) | RemoteOutcome::InvalidResponse(err) => {
                log::warn!("remote matcher failed: {err}");
                self.state = MatcherState::Error;
                self.notify(true);
            }
        }
    }

    fn notify(&mut self, preserve_highlight: bool) {
        let token = self.pending.as_ref().map_or("", |p| p.token.as_str());
        let delivery = MatchDelivery {
            token,
            matches: &self.displayed,
            preserve_highlight,
        };
        self.listeners.notify(&delivery);
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&MatchDelivery<'_>) + 'static,
    ) -> ListenerHandle {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Returns whether the handle was still registered.
    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        self.listeners.unsubscribe(handle)
    }

    // ------------------------------------------------------------------
    // Cache and tuning
    // ------------------------------------------------------------------

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Takes effect at the next overflow check, not retroactively.
    pub fn set_max_cache_size(&mut self, max_size: usize) {
        self.cache.set_max_size(max_size);
    }

    pub fn set_remote_fetch_limit(&mut self, limit: usize) {
        self.remote_fetch_limit = MatchLimit::AtMost(limit);
    }

    /// Changes the throttle interval. A dispatch already waiting is
    /// re-timed to come due a full new interval from now.
    pub fn set_throttle_interval(&mut self, interval: Duration) {
        self.throttle.set_interval(interval);
    }

    /// Suspends cache writes; lookups still read the rows already there.
    /// Full-text searches use this so unbounded result sets stay out of
    /// the cache.
    pub fn set_local_cache_disabled(&mut self, disabled: bool) {
        self.local_cache_disabled = disabled;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> MatcherState {
        self.state
    }

    pub fn placeholder(&self) -> Placeholder {
        self.state.placeholder()
    }

    pub fn displayed(&self) -> &[Candidate] {
        &self.displayed
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn local_cache_disabled(&self) -> bool {
        self.local_cache_disabled
    }
}

/// Empty and whitespace-only tokens are sent to the server but never
/// drive the fetching or no-match states.
fn should_fetch(token: &str) -> bool {
    !token.trim().is_empty()
}

impl Drop for CachingMatcher {
    fn drop(&mut self) {
        // Closing request_tx stops the worker; cancelling lets it skip
        // waiting out an in-flight call first.
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel.cancel();
        }
    }
}

impl fmt::Debug for CachingMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingMatcher")
            .field("state", &self.state)
            .field("displayed", &self.displayed.len())
            .field("cached", &self.cache.len())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "caching_matcher_tests.rs"]
mod caching_matcher_tests;
