// SPDX-License-Identifier: Apache-2.0

//! The catalog constraint engine.
//!
//! One pass over the combination list per recomputation. For each
//! combination that survives the free-text query gate, every facet
//! accumulates counts against the *other four* facets' pinned selections -
//! never against its own. That self-exclusion is what keeps sibling options
//! alive: with `institution = "USP"` pinned, the institution list still
//! shows ENARE so the user can switch without clearing first.
//!
//! O(N) per keystroke over a catalog in the low thousands is well inside a
//! frame budget; there is deliberately no pre-indexing here. The host is
//! expected to debounce query keystrokes ([`crate::debounce`]) but to apply
//! facet picks immediately.

use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::fuzzy::{word_matches_any, MIN_CONTAINS_LEN};
use crate::scoring::{score_label, ScoredQuery};

/// The five filterable dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Institution,
    Year,
    Area,
    Specialty,
    Topic,
}

/// Current facet picks plus nothing else: the free-text query travels as a
/// separate argument so hosts can debounce it independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub institution: Option<String>,
    pub year: Option<u16>,
    pub area: Option<String>,
    pub specialty: Option<String>,
    pub topic: Option<String>,
}

impl Selection {
    /// The explicit "clear" action: all facets back to unconstrained.
    pub fn clear(&mut self) {
        *self = Selection::default();
    }

    pub fn is_empty(&self) -> bool {
        self.institution.is_none()
            && self.year.is_none()
            && self.area.is_none()
            && self.specialty.is_none()
            && self.topic.is_none()
    }

    /// Pin one facet to a concrete value. Pinning an intent from a
    /// suggestion list lands here.
    pub fn pin(&mut self, facet: Facet, value: &str) {
        match facet {
            Facet::Institution => self.institution = Some(value.to_owned()),
            Facet::Year => self.year = value.parse().ok(),
            Facet::Area => self.area = Some(value.to_owned()),
            Facet::Specialty => self.specialty = Some(value.to_owned()),
            Facet::Topic => self.topic = Some(value.to_owned()),
        }
    }
}

/// One still-selectable facet value with its aggregate count and relevance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliveOption {
    pub value: String,
    pub count: u64,
    pub score: u32,
}

/// A year option. Years sort numerically, not by relevance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliveYear {
    pub year: u16,
    pub count: u64,
    pub score: u32,
}

/// A pooled cross-facet suggestion, for "best match" presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestMatch {
    pub facet: Facet,
    pub value: String,
    pub count: u64,
    pub score: u32,
}

/// Everything the UI needs after one recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedView {
    pub institutions: Vec<AliveOption>,
    pub years: Vec<AliveYear>,
    pub areas: Vec<AliveOption>,
    pub specialties: Vec<AliveOption>,
    pub topics: Vec<AliveOption>,
    /// Questions matching the query AND all five pinned facets.
    pub total_count: u64,
}

/// Insertion-ordered accumulator: value -> (count, score).
///
/// Insertion order is the deterministic tiebreaker after score and count,
/// so values are kept in a Vec with a side map of indices.
#[derive(Default)]
struct FacetAccumulator {
    index: HashMap<String, usize>,
    options: Vec<AliveOption>,
}

impl FacetAccumulator {
    fn add(&mut self, value: &str, count: u64, query: &ScoredQuery) {
        match self.index.get(value) {
            Some(&i) => self.options[i].count += count,
            None => {
                self.index.insert(value.to_owned(), self.options.len());
                // Score depends only on the label; compute it once at first sight
                self.options.push(AliveOption {
                    value: value.to_owned(),
                    count,
                    score: score_label(value, query),
                });
            }
        }
    }

    fn finish(mut self, query_active: bool) -> Vec<AliveOption> {
        if query_active {
            self.options.retain(|o| o.score > 0);
        }
        // Stable sort: first-seen catalog order breaks remaining ties
        self.options
            .sort_by(|a, b| b.score.cmp(&a.score).then(b.count.cmp(&a.count)));
        self.options
    }
}

/// Recompute the alive option lists and total count for one input state.
///
/// Pure and total: an empty catalog, an all-unset selection, or a query that
/// matches nothing all produce empty lists and a zero count, never an error.
pub fn compute_alive_options(catalog: &Catalog, selection: &Selection, query: &str) -> DerivedView {
    let scored = ScoredQuery::new(query);
    let query_active = !scored.is_empty();

    let mut institutions = FacetAccumulator::default();
    let mut areas = FacetAccumulator::default();
    let mut specialties = FacetAccumulator::default();
    let mut topics = FacetAccumulator::default();
    let mut years: HashMap<u16, (u64, u32)> = HashMap::new();
    let mut total: u64 = 0;

    for (combo, search_text) in catalog
        .combinations()
        .iter()
        .zip(catalog.search_texts())
    {
        if !passes_query_gate(search_text, &scored) {
            continue;
        }

        let m_inst = matches_label(&selection.institution, &combo.institution);
        let m_year = selection.year.map_or(true, |y| y == combo.year);
        let m_area = matches_label(&selection.area, &combo.area);
        let m_spec = matches_label(&selection.specialty, &combo.specialty);
        let m_topic = matches_label(&selection.topic, &combo.topic);
        let count = u64::from(combo.question_count);

        if m_year && m_area && m_spec && m_topic {
            institutions.add(&combo.institution, count, &scored);
        }
        if m_inst && m_area && m_spec && m_topic {
            let entry = years.entry(combo.year).or_insert_with(|| {
                (0, score_label(&combo.year.to_string(), &scored))
            });
            entry.0 += count;
        }
        if m_inst && m_year && m_spec && m_topic {
            areas.add(&combo.area, count, &scored);
        }
        if m_inst && m_year && m_area && m_topic {
            specialties.add(&combo.specialty, count, &scored);
        }
        if m_inst && m_year && m_area && m_spec {
            topics.add(&combo.topic, count, &scored);
        }
        if m_inst && m_year && m_area && m_spec && m_topic {
            total += count;
        }
    }

    let mut year_options: Vec<AliveYear> = years
        .into_iter()
        .map(|(year, (count, score))| AliveYear { year, count, score })
        .filter(|y| !query_active || y.score > 0)
        .collect();
    year_options.sort_by(|a, b| b.year.cmp(&a.year));

    DerivedView {
        institutions: institutions.finish(query_active),
        years: year_options,
        areas: areas.finish(query_active),
        specialties: specialties.finish(query_active),
        topics: topics.finish(query_active),
        total_count: total,
    }
}

/// Pool every facet's alive options and keep the top `k` by score then count.
///
/// The UI surfaces the top 3 as "best suggestion" chips above the facet
/// dropdowns.
pub fn best_matches(view: &DerivedView, k: usize) -> Vec<BestMatch> {
    let mut pooled: Vec<BestMatch> = Vec::new();
    for o in &view.institutions {
        pooled.push(pool_entry(Facet::Institution, &o.value, o.count, o.score));
    }
    for y in &view.years {
        pooled.push(pool_entry(Facet::Year, &y.year.to_string(), y.count, y.score));
    }
    for o in &view.areas {
        pooled.push(pool_entry(Facet::Area, &o.value, o.count, o.score));
    }
    for o in &view.specialties {
        pooled.push(pool_entry(Facet::Specialty, &o.value, o.count, o.score));
    }
    for o in &view.topics {
        pooled.push(pool_entry(Facet::Topic, &o.value, o.count, o.score));
    }
    pooled.sort_by(|a, b| b.score.cmp(&a.score).then(b.count.cmp(&a.count)));
    pooled.truncate(k);
    pooled
}

fn pool_entry(facet: Facet, value: &str, count: u64, score: u32) -> BestMatch {
    BestMatch {
        facet,
        value: value.to_owned(),
        count,
        score,
    }
}

fn matches_label(selected: &Option<String>, value: &str) -> bool {
    selected.as_deref().map_or(true, |s| s == value)
}

/// The free-text gate over a combination's concatenated label text.
///
/// Tokens shorter than [`MIN_CONTAINS_LEN`] must prefix a whole word; a
/// two-letter query should not light up inside unrelated long words. Longer
/// tokens get the full word-level fuzzy treatment. The verbatim-containment
/// short-circuit only applies when no short token is present, for the same
/// reason.
fn passes_query_gate(search_text: &str, query: &ScoredQuery) -> bool {
    if query.is_empty() {
        return true;
    }

    let words = query.words();
    let has_short = words
        .iter()
        .any(|w| w.chars().count() < MIN_CONTAINS_LEN);
    if !has_short && search_text.contains(query.joined()) {
        return true;
    }

    let target_words: Vec<&str> = search_text.split(' ').collect();
    words.iter().all(|q_word| {
        if q_word.chars().count() < MIN_CONTAINS_LEN {
            target_words.iter().any(|t| t.starts_with(q_word.as_str()))
        } else {
            word_matches_any(q_word, &target_words)
        }
    })
}
