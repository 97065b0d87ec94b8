//! Shared test fixtures: remote matcher fakes and polling helpers used
//! across the matcher and search test modules.

#[cfg(test)]
pub mod test_helpers {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::candidate::Candidate;
    use crate::config::MatcherConfig;
    use crate::matcher::CachingMatcher;
    use crate::remote::{RemoteMatcher, RemoteOutcome, RemoteQuery};

    /// Remote fake that replays a fixed list of outcomes and records every
    /// query it was asked. Once the script runs out it answers with empty
    /// match lists.
    pub struct ScriptedRemote {
        outcomes: Mutex<VecDeque<RemoteOutcome>>,
        queries: Arc<Mutex<Vec<RemoteQuery>>>,
    }

    impl ScriptedRemote {
        pub fn new(outcomes: Vec<RemoteOutcome>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                queries: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Handle onto the query log; clone it out before moving the
        /// remote into a matcher.
        pub fn query_log(&self) -> Arc<Mutex<Vec<RemoteQuery>>> {
            Arc::clone(&self.queries)
        }
    }

    #[async_trait]
    impl RemoteMatcher for ScriptedRemote {
        async fn request_matches(&self, query: &RemoteQuery) -> RemoteOutcome {
            self.queries.lock().unwrap().push(query.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| RemoteOutcome::Matches(Vec::new()))
        }
    }

    /// Remote fake that answers every query with a single row derived from
    /// its token, after an optional delay. Useful when a test races
    /// requests and cannot rely on script order.
    pub struct TokenEchoRemote {
        delay: Duration,
    }

    impl TokenEchoRemote {
        pub fn new() -> Self {
            Self {
                delay: Duration::ZERO,
            }
        }

        pub fn with_delay(delay: Duration) -> Self {
            Self { delay }
        }
    }

    #[async_trait]
    impl RemoteMatcher for TokenEchoRemote {
        async fn request_matches(&self, query: &RemoteQuery) -> RemoteOutcome {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            RemoteOutcome::Matches(vec![Candidate::text(format!("{}-match", query.token))])
        }
    }

    pub fn matches(entries: &[&str]) -> RemoteOutcome {
        RemoteOutcome::Matches(entries.iter().map(|e| Candidate::text(*e)).collect())
    }

    /// Config with no throttle delay, so a single poll dispatches.
    pub fn zero_throttle_config() -> MatcherConfig {
        MatcherConfig {
            throttle_interval_ms: 0,
            ..MatcherConfig::default()
        }
    }

    pub fn displays(rows: &[Candidate]) -> Vec<String> {
        rows.iter().map(|r| r.display_string().to_string()).collect()
    }

    /// Polls the matcher until `done` holds or a deadline passes. Returns
    /// whether the condition was reached.
    pub fn pump_until(
        matcher: &mut CachingMatcher,
        mut done: impl FnMut(&CachingMatcher) -> bool,
    ) -> bool {
        for _ in 0..200 {
            matcher.poll();
            if done(matcher) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }
}
