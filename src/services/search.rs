//! AI search session state
//!
//! Tracks the query, loading flag, results and error of the search view.
//! Each submission is tagged with a sequence number; only the completion
//! matching the latest number is applied, so a slow earlier request can
//! never overwrite a newer one.

use crate::models::Title;
use crate::services::recommendations::SearchOutcome;
use serde::Serialize;

/// Renderable state of the search view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    #[default]
    Idle,
    Searching,
    Results,
    Empty,
    Error,
}

/// Proof that a search was started, used to complete it later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    issued: u64,
    query: String,
    status: SearchStatus,
    results: Vec<Title>,
    error: Option<String>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a search, clearing previous results and error
    ///
    /// Blank queries are refused and leave the session untouched.
    pub fn begin(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.issued += 1;
        self.query = query.to_string();
        self.status = SearchStatus::Searching;
        self.results.clear();
        self.error = None;

        Some(SearchTicket(self.issued))
    }

    /// Applies an outcome if its ticket is still the latest
    ///
    /// Returns false when the completion was stale and discarded.
    pub fn complete(&mut self, ticket: SearchTicket, outcome: SearchOutcome) -> bool {
        if ticket.0 != self.issued {
            tracing::warn!(
                ticket = ticket.0,
                latest = self.issued,
                "Discarding stale search completion"
            );
            return false;
        }

        match outcome {
            SearchOutcome::Completed(titles) if titles.is_empty() => {
                self.status = SearchStatus::Empty;
            }
            SearchOutcome::Completed(titles) => {
                self.results = titles;
                self.status = SearchStatus::Results;
            }
            SearchOutcome::Failed(message) => {
                self.error = Some(message);
                self.status = SearchStatus::Error;
            }
            SearchOutcome::Rejected => {
                self.status = SearchStatus::Idle;
            }
        }

        true
    }

    /// Hides the error message; the search box stays usable
    pub fn dismiss_error(&mut self) {
        if self.status == SearchStatus::Error {
            self.error = None;
            self.status = SearchStatus::Idle;
        }
    }

    /// Discards results and invalidates anything still in flight
    pub fn reset(&mut self) {
        self.issued += 1;
        self.query.clear();
        self.status = SearchStatus::Idle;
        self.results.clear();
        self.error = None;
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Searching
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Title] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find(&self, title_id: &str) -> Option<&Title> {
        self.results.iter().find(|t| t.id == title_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecommendationRecord, RecommendationResponse};
    use crate::services::recommendations::{map_recommendations, SEARCH_FAILED_MESSAGE};

    fn titles(count: usize) -> Vec<Title> {
        map_recommendations(RecommendationResponse {
            recommendations: (0..count)
                .map(|i| RecommendationRecord {
                    title: format!("Resultado {}", i),
                    description: String::new(),
                    genre: "Drama".to_string(),
                    visual_key: "city".to_string(),
                })
                .collect(),
        })
    }

    #[test]
    fn test_blank_query_leaves_state() {
        let mut session = SearchSession::new();
        assert!(session.begin("  ").is_none());
        assert_eq!(session.status(), SearchStatus::Idle);
    }

    #[test]
    fn test_searching_then_results() {
        let mut session = SearchSession::new();
        let ticket = session.begin(" aventura ").unwrap();
        assert!(session.is_loading());
        assert_eq!(session.query(), "aventura");

        assert!(session.complete(ticket, SearchOutcome::Completed(titles(3))));
        assert_eq!(session.status(), SearchStatus::Results);
        assert_eq!(session.results().len(), 3);
        assert!(session.find("ai-2").is_some());
    }

    #[test]
    fn test_three_distinct_terminal_states() {
        let mut session = SearchSession::new();

        let ticket = session.begin("nada").unwrap();
        session.complete(ticket, SearchOutcome::Completed(vec![]));
        assert_eq!(session.status(), SearchStatus::Empty);
        assert!(session.error().is_none());

        let ticket = session.begin("falha").unwrap();
        session.complete(ticket, SearchOutcome::Failed(SEARCH_FAILED_MESSAGE.to_string()));
        assert_eq!(session.status(), SearchStatus::Error);
        assert_eq!(session.error(), Some(SEARCH_FAILED_MESSAGE));

        session.dismiss_error();
        assert_eq!(session.status(), SearchStatus::Idle);
        assert!(session.error().is_none());
    }

    #[test]
    fn test_new_search_clears_previous_results() {
        let mut session = SearchSession::new();
        let ticket = session.begin("um").unwrap();
        session.complete(ticket, SearchOutcome::Completed(titles(2)));

        session.begin("dois").unwrap();
        assert!(session.results().is_empty());
        assert!(session.is_loading());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut session = SearchSession::new();
        let first = session.begin("primeira").unwrap();
        let second = session.begin("segunda").unwrap();

        assert!(session.complete(second, SearchOutcome::Completed(titles(1))));
        assert!(!session.complete(first, SearchOutcome::Completed(titles(4))));

        assert_eq!(session.results().len(), 1);
        assert_eq!(session.query(), "segunda");
        assert!(second.sequence() > first.sequence());
    }

    #[test]
    fn test_reset_invalidates_in_flight() {
        let mut session = SearchSession::new();
        let ticket = session.begin("perdida").unwrap();
        session.reset();

        assert!(!session.complete(ticket, SearchOutcome::Completed(titles(2))));
        assert_eq!(session.status(), SearchStatus::Idle);
        assert!(session.results().is_empty());
    }
}
