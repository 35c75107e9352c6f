// SPDX-License-Identifier: Apache-2.0

//! Key-value persistence port.
//!
//! The browser original leaned on `localStorage` for search history, theme,
//! and consent flags. Here that surface is a trait so the core stays free of
//! storage concerns; hosts inject whatever backs it (an in-memory map in
//! tests, a file or real store in an application).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Injected persistence capability. Values are opaque strings; anything
/// structured goes through JSON at the call site.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store for tests and the CLI.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

const SEARCH_HISTORY_KEY: &str = "faceta_search_history";

/// Recent queries kept for the search bar's dropdown.
pub const MAX_SEARCH_HISTORY: usize = 5;

/// Queries shorter than this are noise and never recorded.
const MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredQueries(Vec<String>);

/// Most-recent-first list of past queries, persisted through a
/// [`KeyValueStore`].
pub struct SearchHistory<'a, S: KeyValueStore> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore> SearchHistory<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        SearchHistory { store }
    }

    pub fn entries(&self) -> Vec<String> {
        self.store
            .get(SEARCH_HISTORY_KEY)
            .and_then(|raw| serde_json::from_str::<StoredQueries>(&raw).ok())
            .map(|q| q.0)
            .unwrap_or_default()
    }

    /// Record a submitted query: trimmed, deduplicated, capped at
    /// [`MAX_SEARCH_HISTORY`], newest first. Too-short queries are ignored.
    pub fn record(&mut self, query: &str) {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return;
        }
        let mut entries = self.entries();
        entries.retain(|q| q != query);
        entries.insert(0, query.to_owned());
        entries.truncate(MAX_SEARCH_HISTORY);
        self.save(&entries);
    }

    pub fn forget(&mut self, query: &str) {
        let mut entries = self.entries();
        entries.retain(|q| q != query);
        self.save(&entries);
    }

    pub fn clear(&mut self) {
        self.store.remove(SEARCH_HISTORY_KEY);
    }

    fn save(&mut self, entries: &[String]) {
        // Serializing a Vec<String> cannot fail
        if let Ok(raw) = serde_json::to_string(&StoredQueries(entries.to_vec())) {
            self.store.set(SEARCH_HISTORY_KEY, &raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_read_back() {
        let mut store = MemoryStore::new();
        let mut history = SearchHistory::new(&mut store);
        history.record("cardiologia");
        history.record("pediatria");
        assert_eq!(history.entries(), vec!["pediatria", "cardiologia"]);
    }

    #[test]
    fn test_duplicate_moves_to_front() {
        let mut store = MemoryStore::new();
        let mut history = SearchHistory::new(&mut store);
        history.record("cardiologia");
        history.record("pediatria");
        history.record("cardiologia");
        assert_eq!(history.entries(), vec!["cardiologia", "pediatria"]);
    }

    #[test]
    fn test_capped_at_max() {
        let mut store = MemoryStore::new();
        let mut history = SearchHistory::new(&mut store);
        for q in ["aa", "bb", "cc", "dd", "ee", "ff"] {
            history.record(q);
        }
        let entries = history.entries();
        assert_eq!(entries.len(), MAX_SEARCH_HISTORY);
        assert_eq!(entries[0], "ff");
        assert!(!entries.contains(&"aa".to_owned()));
    }

    #[test]
    fn test_short_queries_ignored() {
        let mut store = MemoryStore::new();
        let mut history = SearchHistory::new(&mut store);
        history.record("x");
        history.record("  ");
        assert!(history.entries().is_empty());
    }

    #[test]
    fn test_forget_and_clear() {
        let mut store = MemoryStore::new();
        let mut history = SearchHistory::new(&mut store);
        history.record("cardiologia");
        history.record("pediatria");
        history.forget("cardiologia");
        assert_eq!(history.entries(), vec!["pediatria"]);
        history.clear();
        assert!(history.entries().is_empty());
    }

    #[test]
    fn test_corrupt_persisted_value_treated_as_empty() {
        let mut store = MemoryStore::new();
        store.set(SEARCH_HISTORY_KEY, "not json at all");
        let history = SearchHistory::new(&mut store);
        assert!(history.entries().is_empty());
    }
}
