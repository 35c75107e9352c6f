// SPDX-License-Identifier: Apache-2.0

//! Relevance scoring for facet suggestions.
//!
//! The ladder is bucketed: a full-query exact match beats a full-query prefix
//! match beats anything assembled out of word-level partials. Word-level
//! points are cumulative across query words, so a two-word query that hits
//! two label words outranks one that hits a single word.
//!
//! # Constants
//!
//! | Tier                        | Points | Why this value |
//! |-----------------------------|--------|----------------|
//! | Label equals full query     | 100    | Best possible, nothing stacks above it |
//! | Label starts with query     | 90     | Below exact, above any partial pile-up |
//! | Label contains query        | +40    | Additive base under the word-level sums |
//! | Word equality               | +30    | Per query word |
//! | Word prefix                 | +20    | Per query word |
//! | Word containment (len >= 3) | +10    | Per query word; short fragments excluded |
//!
//! Ties between facet values break on aggregate question count, then on
//! first-seen catalog order - see the engine's sort.

use crate::fuzzy::MIN_CONTAINS_LEN;
use crate::normalize::normalize;

/// Score for a label that equals the full joined query.
pub const EXACT_SCORE: u32 = 100;

/// Score for a label that starts with the full joined query.
pub const PREFIX_SCORE: u32 = 90;

/// Additive base when the label contains the full query as a substring.
pub const CONTAINS_BASE: u32 = 40;

/// Per query word: exact equality with a label word.
pub const WORD_EXACT: u32 = 30;

/// Per query word: a label word starts with it.
pub const WORD_PREFIX: u32 = 20;

/// Per query word: a label word contains it (query word length >= 3).
pub const WORD_CONTAINS: u32 = 10;

/// A query pre-split for repeated scoring against many labels.
///
/// Normalization happens once here instead of once per candidate label;
/// the engine scores every alive facet value against the same query.
#[derive(Debug, Clone, Default)]
pub struct ScoredQuery {
    joined: String,
    words: Vec<String>,
}

impl ScoredQuery {
    pub fn new(query: &str) -> Self {
        let joined = normalize(query);
        let words = if joined.is_empty() {
            Vec::new()
        } else {
            joined.split(' ').map(str::to_owned).collect()
        };
        ScoredQuery { joined, words }
    }

    /// An empty query scores nothing and filters nothing.
    pub fn is_empty(&self) -> bool {
        self.joined.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The normalized query with single spaces between words.
    pub fn joined(&self) -> &str {
        &self.joined
    }
}

/// Integer relevance of `label` against the query. Zero means "no match".
///
/// Only one full-query tier applies per label; word-level points stack on
/// top of the containment base but never reach the prefix tier from a single
/// word pair (40 + 30 < 90 needs at least two word hits to cross).
pub fn score_label(label: &str, query: &ScoredQuery) -> u32 {
    if query.is_empty() {
        return 0;
    }

    let normalized = normalize(label);
    if normalized == query.joined {
        return EXACT_SCORE;
    }
    if normalized.starts_with(&query.joined) {
        return PREFIX_SCORE;
    }

    let mut score = if normalized.contains(&query.joined) {
        CONTAINS_BASE
    } else {
        0
    };

    let label_words: Vec<&str> = normalized.split(' ').collect();
    for q_word in &query.words {
        score += best_word_score(q_word, &label_words);
    }
    score
}

/// Best word-tier award for one query word against all label words.
///
/// Equality implies prefix implies containment, so only the highest tier
/// that any label word reaches is counted - awarding all three would
/// triple-count a single hit.
fn best_word_score(q_word: &str, label_words: &[&str]) -> u32 {
    let mut best = 0;
    for l_word in label_words {
        let tier = if *l_word == q_word {
            WORD_EXACT
        } else if l_word.starts_with(q_word) {
            WORD_PREFIX
        } else if q_word.chars().count() >= MIN_CONTAINS_LEN && l_word.contains(q_word) {
            WORD_CONTAINS
        } else {
            0
        };
        best = best.max(tier);
    }
    best
}
