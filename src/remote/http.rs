//! HTTP implementation of the remote matcher.
//!
//! Sends the query as GET parameters and decodes a JSON array of strings
//! or objects into candidates. The wire contract: `token` is the search
//! term, `max_matches` the row cap (`-1` for unlimited), `fullstring` the
//! complete input value, `use_similar` asks the server for fuzzy matches
//! ("1"/"0"), and `fulltextsearch=1` is added for unlimited searches.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::types::{RemoteError, RemoteMatcher, RemoteOutcome, RemoteQuery};
use crate::candidate::Candidate;
use crate::scorer::MatchLimit;

/// Remote matcher backed by an HTTP endpoint returning JSON arrays.
///
/// Timeout policy lives here, not in the caching layer; without
/// `with_timeout` the client default applies.
#[derive(Debug, Clone)]
pub struct HttpRemoteMatcher {
    client: Client,
    url: String,
    headers: Vec<(String, String)>,
    use_similar: bool,
    timeout: Option<Duration>,
}

impl HttpRemoteMatcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            headers: Vec::new(),
            use_similar: true,
            timeout: None,
        }
    }

    /// Adds a header to every request, e.g. for auth tokens.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Whether the server should include similarity matches.
    pub fn with_use_similar(mut self, use_similar: bool) -> Self {
        self.use_similar = use_similar;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn query_params(&self, query: &RemoteQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("token", query.token.clone()),
            ("max_matches", wire_limit(query.limit).to_string()),
            ("fullstring", query.full_string.clone()),
            (
                "use_similar",
                if self.use_similar { "1" } else { "0" }.to_string(),
            ),
        ];
        if query.is_full_text() {
            params.push(("fulltextsearch", "1".to_string()));
        }
        params
    }
}

fn wire_limit(limit: MatchLimit) -> i64 {
    match limit {
        MatchLimit::AtMost(n) => n as i64,
        MatchLimit::All => -1,
    }
}

fn parse_candidates(body: &str) -> Result<Vec<Candidate>, RemoteError> {
    let value: Value = serde_json::from_str(body).map_err(|e| RemoteError::Parse {
        message: e.to_string(),
    })?;
    match value {
        Value::Array(items) => Ok(items.into_iter().map(Candidate::from_json).collect()),
        other => Err(RemoteError::Parse {
            message: format!("expected a JSON array of matches, got {}", kind_of(&other)),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl RemoteMatcher for HttpRemoteMatcher {
    async fn request_matches(&self, query: &RemoteQuery) -> RemoteOutcome {
        let mut request = self.client.get(&self.url).query(&self.query_params(query));
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                return RemoteOutcome::FailedRequest(RemoteError::Network {
                    message: e.to_string(),
                });
            }
        };

        if !response.status().is_success() {
            return RemoteOutcome::FailedRequest(RemoteError::Http {
                code: response.status().as_u16(),
            });
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return RemoteOutcome::InvalidResponse(RemoteError::Parse {
                    message: e.to_string(),
                });
            }
        };

        match parse_candidates(&body) {
            Ok(matches) => RemoteOutcome::Matches(matches),
            Err(e) => RemoteOutcome::InvalidResponse(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(token: &str, limit: MatchLimit) -> RemoteQuery {
        RemoteQuery {
            token: token.to_string(),
            limit,
            full_string: token.to_string(),
        }
    }

    #[test]
    fn test_wire_limit_encoding() {
        assert_eq!(wire_limit(MatchLimit::AtMost(100)), 100);
        assert_eq!(wire_limit(MatchLimit::AtMost(0)), 0);
        assert_eq!(wire_limit(MatchLimit::All), -1);
    }

    #[test]
    fn test_query_params_for_suggestions() {
        let matcher = HttpRemoteMatcher::new("http://example.test/ac");
        let params = matcher.query_params(&query("gho", MatchLimit::AtMost(100)));

        assert_eq!(
            params,
            vec![
                ("token", "gho".to_string()),
                ("max_matches", "100".to_string()),
                ("fullstring", "gho".to_string()),
                ("use_similar", "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_params_for_full_text_search() {
        let matcher = HttpRemoteMatcher::new("http://example.test/ac");
        let params = matcher.query_params(&RemoteQuery {
            token: String::new(),
            limit: MatchLimit::All,
            full_string: "ghost stories".to_string(),
        });

        assert!(params.contains(&("max_matches", "-1".to_string())));
        assert!(params.contains(&("fulltextsearch", "1".to_string())));
        assert!(params.contains(&("fullstring", "ghost stories".to_string())));
    }

    #[test]
    fn test_use_similar_flag() {
        let matcher =
            HttpRemoteMatcher::new("http://example.test/ac").with_use_similar(false);
        let params = matcher.query_params(&query("gho", MatchLimit::AtMost(10)));
        assert!(params.contains(&("use_similar", "0".to_string())));
    }

    #[test]
    fn test_parse_mixed_candidates() {
        let body = r#"["ghost", {"caption": "Ghast", "id": 3}, {"id": 4}]"#;
        let candidates = parse_candidates(body).unwrap();

        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].display_string(), "ghost");
        assert_eq!(candidates[1].display_string(), "Ghast");
        assert_eq!(candidates[2].display_string(), r#"{"id":4}"#);
    }

    #[test]
    fn test_parse_empty_array() {
        assert_eq!(parse_candidates("[]").unwrap(), Vec::new());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_candidates(r#"{"matches": []}"#).unwrap_err();
        assert!(matches!(err, RemoteError::Parse { .. }));
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = parse_candidates("not json").unwrap_err();
        assert!(matches!(err, RemoteError::Parse { .. }));
    }
}
