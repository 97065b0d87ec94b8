/// Lifecycle of the most recent match request.
///
/// Written on request entry and on remote outcomes, nowhere else. A new
/// request is the only way out of `Error`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatcherState {
    /// Nothing outstanding.
    #[default]
    Ready,
    /// A remote fetch for the current token is in flight.
    Fetching,
    /// The remote source answered and nothing matched the token.
    NoMatch,
    /// The last remote fetch failed; displayed rows may be stale.
    Error,
}

/// What a suggestion UI should render alongside its row list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Loading,
    NoMatches,
    Hidden,
}

impl MatcherState {
    /// Maps the state to the placeholder a UI should show. Errors show
    /// nothing extra, since the stale rows stay visible.
    pub fn placeholder(&self) -> Placeholder {
        match self {
            MatcherState::Fetching => Placeholder::Loading,
            MatcherState::NoMatch => Placeholder::NoMatches,
            MatcherState::Ready | MatcherState::Error => Placeholder::Hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_ready() {
        assert_eq!(MatcherState::default(), MatcherState::Ready);
    }

    #[test]
    fn test_placeholder_mapping() {
        assert_eq!(MatcherState::Fetching.placeholder(), Placeholder::Loading);
        assert_eq!(MatcherState::NoMatch.placeholder(), Placeholder::NoMatches);
        assert_eq!(MatcherState::Ready.placeholder(), Placeholder::Hidden);
        assert_eq!(MatcherState::Error.placeholder(), Placeholder::Hidden);
    }
}
