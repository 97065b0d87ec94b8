//! Local match scoring over cached candidate rows.
//!
//! Two strategies: case-insensitive prefix matching at word starts, and a
//! similarity walk that tolerates typos and skipped characters. Prefix
//! matches always win; the similarity pass only runs when no row matched
//! by prefix.

use regex::Regex;

use crate::candidate::Candidate;

/// A row is rejected once its similarity score reaches
/// `token_chars * SCORE_REJECT_FACTOR`.
const SCORE_REJECT_FACTOR: usize = 6;

/// Starting cost of a token character missing from the row entirely.
/// Each further miss costs 5 more.
const MISS_PENALTY: usize = 10;

/// Cap on the number of rows a lookup may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLimit {
    AtMost(usize),
    /// No truncation. Full-text searches run with this.
    All,
}

impl MatchLimit {
    /// Whether a result list currently holding `count` rows may grow.
    pub fn allows(&self, count: usize) -> bool {
        match self {
            MatchLimit::AtMost(n) => count < *n,
            MatchLimit::All => true,
        }
    }

    pub(crate) fn truncate(&self, rows: &mut Vec<Candidate>) {
        if let MatchLimit::AtMost(n) = self {
            rows.truncate(*n);
        }
    }
}

/// Returns rows whose display form contains `token` at the start of the
/// string or of a word, in row order, up to `limit`.
pub fn prefix_matches(rows: &[Candidate], token: &str, limit: MatchLimit) -> Vec<Candidate> {
    let mut matches = Vec::new();
    if token.trim().is_empty() {
        return matches;
    }

    // Word boundary means one or more non-word characters before the token.
    let pattern = format!(r"(?i)(^|\W+){}", regex::escape(token));
    let matcher = Regex::new(&pattern).expect("escaped token always compiles");

    for row in rows {
        if !limit.allows(matches.len()) {
            break;
        }
        if matcher.is_match(row.display_string()) {
            matches.push(row.clone());
        }
    }
    matches
}

/// Returns rows similar to `token`, best first, up to `limit`.
///
/// Scoring is a distance: a row containing the token scores by how far
/// from the start it appears, otherwise each token character is charged
/// for the gap walked to reach it, or a growing penalty when the row has
/// no further occurrence of it. Rows scoring past the rejection threshold
/// are dropped; ties keep row order. An empty token makes the threshold
/// zero, so it matches nothing.
pub fn similarity_matches(rows: &[Candidate], token: &str, limit: MatchLimit) -> Vec<Candidate> {
    let needle = token.to_lowercase();
    let reject_at = needle.chars().count() * SCORE_REJECT_FACTOR;

    let mut scored: Vec<(usize, Candidate)> = Vec::new();
    for row in rows {
        let haystack = row.display_string().to_lowercase();
        let score = match haystack.find(&needle) {
            Some(byte_idx) => haystack[..byte_idx].chars().count() / 4,
            None => similarity_walk(&haystack, &needle),
        };
        if score < reject_at {
            scored.push((score, row.clone()));
        }
    }

    // Stable sort keeps row order for equal scores
    scored.sort_by_key(|(score, _)| *score);

    let mut matches: Vec<Candidate> = scored.into_iter().map(|(_, row)| row).collect();
    limit.truncate(&mut matches);
    matches
}

/// Walks the token characters through the row, charging each one the gap
/// since the previous match (capped) or a growing penalty when the row has
/// no occurrence of it after the cursor.
fn similarity_walk(haystack: &str, needle: &str) -> usize {
    let chars: Vec<char> = haystack.chars().collect();
    let mut score = 0usize;
    let mut next_start = 0usize;
    let mut penalty = MISS_PENALTY;

    for c in needle.chars() {
        match chars[next_start..].iter().position(|&h| h == c) {
            Some(gap) => {
                score += gap.min(penalty - 5);
                next_start += gap + 1;
            }
            None => {
                score += penalty;
                penalty += 5;
            }
        }
    }
    score
}

/// Prefix matches when any exist, otherwise similarity matches.
pub fn cached_matches(rows: &[Candidate], token: &str, limit: MatchLimit) -> Vec<Candidate> {
    let matches = prefix_matches(rows, token, limit);
    if matches.is_empty() {
        return similarity_matches(rows, token, limit);
    }
    matches
}
