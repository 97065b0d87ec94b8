//! Client-side suggestion cache for typeahead inputs.
//!
//! Sits between a text input and a remote suggestion service: every edit
//! gets an immediate answer from a local cache (prefix matches first,
//! fuzzy similarity as a fallback) while remote fetches are throttled,
//! deduplicated into the cache, and merged into the displayed list as
//! they arrive. A separate full-text search path runs uncapped queries
//! over the whole input without polluting the cache.

pub mod cache;
pub mod candidate;
pub mod config;
pub mod matcher;
pub mod remote;
pub mod scorer;
pub mod search;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use candidate::Candidate;
pub use config::MatcherConfig;
pub use matcher::{CachingMatcher, ListenerHandle, MatchDelivery, MatcherState, Placeholder};
pub use remote::{HttpRemoteMatcher, RemoteError, RemoteMatcher, RemoteOutcome, RemoteQuery};
pub use scorer::MatchLimit;
pub use search::{FullTextSearch, SearchEvent};
