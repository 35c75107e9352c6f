// SPDX-License-Identifier: Apache-2.0

//! Fuzzy matching: typo tolerance via edit distance.
//!
//! Two layers: the raw Levenshtein primitives in `levenshtein`, and the
//! word-level `fuzzy_match` predicate built on top of them. The predicate is
//! what the query gate of the constraint engine uses.

mod levenshtein;

pub use levenshtein::{levenshtein_distance, levenshtein_within};

use crate::normalize::normalize;

/// Minimum query-word length before substring containment counts as a match.
/// Below this, two-letter fragments would match inside almost any label.
pub const MIN_CONTAINS_LEN: usize = 3;

/// Edit-distance budget for a query word: 20% of its length, at least 1.
///
/// Short words tolerate a single typo; longer words scale up. "cardiologa"
/// (10 chars) gets a budget of 2, enough for the missing "i".
pub fn edit_threshold(word_len: usize) -> usize {
    (word_len / 5).max(1)
}

/// Does `query` fuzzy-match `text`?
///
/// Both sides are normalized (lowercase, accents stripped). The empty query
/// matches everything. Verbatim containment short-circuits before any edit
/// distance work - that is the common case while the user is still typing.
///
/// Otherwise the query is split on whitespace and every query word must match
/// some target word by one of:
/// - exact equality
/// - containment or prefix (query word length >= [`MIN_CONTAINS_LEN`])
/// - edit distance within [`edit_threshold`]
pub fn fuzzy_match(text: &str, query: &str) -> bool {
    let text = normalize(text);
    let query = normalize(query);

    if query.is_empty() {
        return true;
    }
    if text.contains(&query) {
        return true;
    }

    let target_words: Vec<&str> = text.split(' ').collect();
    query
        .split(' ')
        .all(|q_word| word_matches_any(q_word, &target_words))
}

/// Does a single (already normalized) query word match any of the target words?
pub(crate) fn word_matches_any(q_word: &str, target_words: &[&str]) -> bool {
    let q_len = q_word.chars().count();
    let threshold = edit_threshold(q_len);

    target_words.iter().any(|t_word| {
        if *t_word == q_word {
            return true;
        }
        if q_len >= MIN_CONTAINS_LEN && t_word.contains(q_word) {
            return true;
        }
        levenshtein_within(t_word, q_word, threshold)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(fuzzy_match("Cardiologia", ""));
        assert!(fuzzy_match("", ""));
        assert!(fuzzy_match("anything at all", "   "));
    }

    #[test]
    fn test_verbatim_containment() {
        assert!(fuzzy_match("Clínica Médica", "clinica"));
        assert!(fuzzy_match("Clínica Médica", "ica méd"));
    }

    #[test]
    fn test_reflexive() {
        for s in ["Cardiologia", "Clínica Médica", "ENARE"] {
            assert!(fuzzy_match(s, s));
        }
    }

    #[test]
    fn test_accent_insensitive() {
        assert!(fuzzy_match("Cirúrgica", "cirurgica"));
        assert!(fuzzy_match("cirurgica", "Cirúrgica"));
    }

    #[test]
    fn test_single_typo() {
        // "cardiologa" is one deletion away from "cardiologia"; budget is 2
        assert!(fuzzy_match("Cardiologia", "cardiologa"));
        assert!(fuzzy_match("Pediatria", "pediatira"));
    }

    #[test]
    fn test_threshold_scales_with_length() {
        assert_eq!(edit_threshold(3), 1);
        assert_eq!(edit_threshold(4), 1);
        assert_eq!(edit_threshold(9), 1);
        assert_eq!(edit_threshold(10), 2);
        assert_eq!(edit_threshold(15), 3);
    }

    #[test]
    fn test_unrelated_does_not_match() {
        assert!(!fuzzy_match("Cardiologia", "nefrologia"));
        assert!(!fuzzy_match("ENARE", "usp"));
    }

    #[test]
    fn test_multi_word_query_needs_every_word() {
        assert!(fuzzy_match("Clínica Médica Cardiologia", "clinica cardio"));
        assert!(!fuzzy_match("Clínica Médica", "clinica dermatologia"));
    }
}
