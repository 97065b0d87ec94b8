// Tuning knobs for the caching matcher.
// All fields are optional in TOML; missing ones take the defaults below.

use serde::Deserialize;

use crate::cache::DEFAULT_MAX_CACHE_SIZE;
use crate::matcher::{DEFAULT_REMOTE_FETCH_LIMIT, DEFAULT_THROTTLE_MS};

#[derive(Debug, Clone, Deserialize)]
pub struct MatcherConfig {
    /// Trailing delay between a request and its remote dispatch.
    #[serde(default = "default_throttle_interval_ms")]
    pub throttle_interval_ms: u64,

    /// Rows the local cache may hold before it is cleared.
    #[serde(default = "default_max_cache_size")]
    pub max_cache_size: usize,

    /// Row cap sent with throttled remote fetches.
    #[serde(default = "default_remote_fetch_limit")]
    pub remote_fetch_limit: usize,
}

fn default_throttle_interval_ms() -> u64 {
    DEFAULT_THROTTLE_MS
}

fn default_max_cache_size() -> usize {
    DEFAULT_MAX_CACHE_SIZE
}

fn default_remote_fetch_limit() -> usize {
    DEFAULT_REMOTE_FETCH_LIMIT
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            throttle_interval_ms: default_throttle_interval_ms(),
            max_cache_size: default_max_cache_size(),
            remote_fetch_limit: default_remote_fetch_limit(),
        }
    }
}
