use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::candidate::Candidate;
use crate::scorer::MatchLimit;

/// A single remote lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteQuery {
    /// Token being completed; empty for full-text searches.
    pub token: String,
    /// Cap on the number of rows the server should return.
    pub limit: MatchLimit,
    /// The complete input value, for inputs holding multiple entries.
    pub full_string: String,
}

impl RemoteQuery {
    pub fn is_full_text(&self) -> bool {
        self.limit == MatchLimit::All
    }
}

/// Failures surfaced by remote matcher implementations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RemoteError {
    /// The transport never produced a response.
    #[error("network error: {message}")]
    Network { message: String },

    /// The server answered with a non-success status.
    #[error("server returned status {code}")]
    Http { code: u16 },

    /// The response body could not be decoded into candidates.
    #[error("parse error: {message}")]
    Parse { message: String },
}

/// Everything a remote lookup can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOutcome {
    /// The server answered with rows, possibly none.
    Matches(Vec<Candidate>),
    /// The request never completed.
    FailedRequest(RemoteError),
    /// The request completed but the payload was unusable.
    InvalidResponse(RemoteError),
}

/// Source of suggestion matches, typically an HTTP endpoint.
///
/// Implementations only turn a query into an outcome; cancellation and
/// staleness are handled by the worker and the caching layer around it.
#[async_trait]
pub trait RemoteMatcher: Send + Sync {
    async fn request_matches(&self, query: &RemoteQuery) -> RemoteOutcome;
}

/// Request handed to the remote worker thread.
#[derive(Debug)]
pub struct RemoteRequest {
    pub query: RemoteQuery,
    /// Stamp of the request that produced this lookup; responses carry it
    /// back so stale ones can be discarded.
    pub generation: u64,
    /// Cancelling aborts the in-flight call; no response is sent.
    pub cancel: CancellationToken,
}

/// Response sent back from the remote worker thread.
#[derive(Debug)]
pub struct RemoteResponse {
    pub generation: u64,
    pub outcome: RemoteOutcome,
}
