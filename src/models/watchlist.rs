use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// Titles the user has marked to watch later
///
/// Membership checks are hash lookups; `ids()` yields arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchlistSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl WatchlistSet {
    /// Creates an empty watchlist
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, title_id: &str) -> bool {
        self.members.contains(title_id)
    }

    /// Flips membership of a title, returning whether it is now present
    pub fn toggle(&mut self, title_id: &str) -> bool {
        if self.members.remove(title_id) {
            self.order.retain(|id| id != title_id);
            false
        } else {
            self.members.insert(title_id.to_string());
            self.order.push(title_id.to_string());
            true
        }
    }

    /// Ids in the order they were added
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Serialize for WatchlistSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.ids())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_watchlist() {
        let watchlist = WatchlistSet::new();
        assert!(watchlist.is_empty());
        assert!(!watchlist.contains("1"));
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut watchlist = WatchlistSet::new();
        assert!(watchlist.toggle("3"));
        assert!(watchlist.contains("3"));
        assert!(!watchlist.toggle("3"));
        assert!(!watchlist.contains("3"));
        assert!(watchlist.is_empty());
    }

    #[test]
    fn test_arrival_order_is_kept() {
        let mut watchlist = WatchlistSet::new();
        watchlist.toggle("5");
        watchlist.toggle("2");
        watchlist.toggle("7");
        watchlist.toggle("2");
        watchlist.toggle("2");
        assert_eq!(watchlist.ids().collect::<Vec<_>>(), vec!["5", "7", "2"]);
    }

    #[test]
    fn test_serializes_as_id_list() {
        let mut watchlist = WatchlistSet::new();
        watchlist.toggle("8");
        watchlist.toggle("1");
        assert_eq!(serde_json::to_string(&watchlist).unwrap(), r#"["8","1"]"#);
    }
}
