//! Caching matcher module
//!
//! Owns the request lifecycle between a text input and the remote
//! suggestion source: synchronous cache lookups, throttled remote
//! dispatch, merge of remote rows into the displayed list, and listener
//! notification.

mod caching_matcher;
mod delivery;
mod state;
mod throttle;

pub use caching_matcher::{CachingMatcher, DEFAULT_REMOTE_FETCH_LIMIT};
pub use delivery::{ListenerHandle, MatchDelivery};
pub use state::{MatcherState, Placeholder};
pub use throttle::{ThrottleGate, DEFAULT_THROTTLE_MS};
