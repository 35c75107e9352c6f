// SPDX-License-Identifier: Apache-2.0

//! The combination catalog: ingestion, validation, and the cached source.
//!
//! A combination is one `(institution, year, specialty, area, topic)`
//! grouping with its question count. The backend only materializes groupings
//! that actually contain questions, so the catalog is sparse - low thousands
//! of entries, small enough to re-scan on every keystroke.
//!
//! Validation happens once at ingestion. The constraint engine assumes a
//! clean catalog and never revalidates per pass.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// How long a fetched catalog stays fresh before the cache refetches.
pub const CATALOG_TTL: Duration = Duration::from_secs(30 * 60);

/// Wire form of a combination: a 6-element JSON array, matching the backend
/// metadata-summary payload.
type CombinationWire = (String, u16, String, String, String, u32);

/// One catalog entry with its question count.
///
/// Invariants (enforced by [`Catalog::new`]):
/// - `question_count >= 1`
/// - no two entries share all five key fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CombinationWire", into = "CombinationWire")]
pub struct Combination {
    pub institution: String,
    pub year: u16,
    pub specialty: String,
    pub area: String,
    pub topic: String,
    pub question_count: u32,
}

impl Combination {
    /// The five-field identity, used for duplicate detection.
    pub(crate) fn key(&self) -> (&str, u16, &str, &str, &str) {
        (
            &self.institution,
            self.year,
            &self.specialty,
            &self.area,
            &self.topic,
        )
    }
}

impl From<CombinationWire> for Combination {
    fn from(w: CombinationWire) -> Self {
        Combination {
            institution: w.0,
            year: w.1,
            specialty: w.2,
            area: w.3,
            topic: w.4,
            question_count: w.5,
        }
    }
}

impl From<Combination> for CombinationWire {
    fn from(c: Combination) -> Self {
        (
            c.institution,
            c.year,
            c.specialty,
            c.area,
            c.topic,
            c.question_count,
        )
    }
}

/// Summary statistics shipped alongside the combination list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_questions: u64,
    pub unique_institutions: usize,
    pub unique_areas: usize,
}

/// The bulk payload a [`CatalogSource`] returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPayload {
    pub combinations: Vec<Combination>,
    #[serde(default)]
    pub stats: Option<CatalogStats>,
}

/// Error type for catalog ingestion and cache access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A combination arrived with `question_count == 0`.
    NonPositiveCount { index: usize },
    /// Two combinations share all five key fields; counts would double.
    DuplicateCombination { index: usize },
    /// The cache was queried before the first successful load.
    NotLoaded,
    /// The upstream source failed; retryable.
    FetchFailed { message: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NonPositiveCount { index } => {
                write!(f, "combination {} has question_count 0", index)
            }
            CatalogError::DuplicateCombination { index } => {
                write!(f, "combination {} duplicates an earlier entry", index)
            }
            CatalogError::NotLoaded => write!(f, "catalog has not been loaded yet"),
            CatalogError::FetchFailed { message } => {
                write!(f, "catalog fetch failed: {}", message)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// A validated, immutable combination catalog.
///
/// Normalized per-entry search text is built once at ingestion; the engine
/// re-scans it on every recomputation without re-normalizing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    combinations: Vec<Combination>,
    search_texts: Vec<String>,
}

impl Catalog {
    /// Validate and ingest a combination list.
    ///
    /// Rejects zero counts and duplicate five-field keys; either would make
    /// the engine's aggregate counts lie.
    pub fn new(combinations: Vec<Combination>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for (index, combo) in combinations.iter().enumerate() {
            if combo.question_count == 0 {
                return Err(CatalogError::NonPositiveCount { index });
            }
            if !seen.insert(combo.key()) {
                return Err(CatalogError::DuplicateCombination { index });
            }
        }
        let search_texts = combinations
            .iter()
            .map(|c| {
                crate::normalize::normalize(&format!(
                    "{} {} {} {}",
                    c.institution, c.specialty, c.area, c.topic
                ))
            })
            .collect();
        Ok(Catalog {
            combinations,
            search_texts,
        })
    }

    pub fn from_payload(payload: CatalogPayload) -> Result<Self, CatalogError> {
        Catalog::new(payload.combinations)
    }

    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    /// Normalized "institution specialty area topic" text per combination,
    /// parallel to [`Catalog::combinations`].
    pub(crate) fn search_texts(&self) -> &[String] {
        &self.search_texts
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    /// Summary stats derived from the combinations themselves.
    pub fn stats(&self) -> CatalogStats {
        let mut institutions = std::collections::HashSet::new();
        let mut areas = std::collections::HashSet::new();
        let mut total: u64 = 0;
        for c in &self.combinations {
            institutions.insert(c.institution.as_str());
            areas.insert(c.area.as_str());
            total += u64::from(c.question_count);
        }
        CatalogStats {
            total_questions: total,
            unique_institutions: institutions.len(),
            unique_areas: areas.len(),
        }
    }

    /// Every distinct label occurring in any combination, sorted.
    ///
    /// Feeds autocomplete surfaces that want a flat vocabulary rather than
    /// per-facet lists.
    pub fn searchable_terms(&self) -> Vec<String> {
        let mut terms = std::collections::BTreeSet::new();
        for c in &self.combinations {
            for label in [&c.institution, &c.specialty, &c.area, &c.topic] {
                if !label.is_empty() {
                    terms.insert(label.clone());
                }
            }
        }
        terms.into_iter().collect()
    }
}

/// One-shot bulk supplier of the combination catalog.
///
/// The backend RPC layer is an external collaborator; tests and the CLI use
/// in-memory or file-backed implementations.
pub trait CatalogSource {
    fn fetch(&mut self) -> Result<CatalogPayload, CatalogError>;
}

impl<F> CatalogSource for F
where
    F: FnMut() -> Result<CatalogPayload, CatalogError>,
{
    fn fetch(&mut self) -> Result<CatalogPayload, CatalogError> {
        self()
    }
}

/// Stale-after cache over a [`CatalogSource`].
///
/// The clock is injected: callers pass `Instant::now()` so tests can drive
/// staleness deterministically. A failed refresh keeps any previously loaded
/// catalog untouched; the next call retries.
pub struct CatalogCache<S> {
    source: S,
    ttl: Duration,
    loaded: Option<(Catalog, Instant)>,
}

impl<S: CatalogSource> CatalogCache<S> {
    pub fn new(source: S) -> Self {
        CatalogCache::with_ttl(source, CATALOG_TTL)
    }

    pub fn with_ttl(source: S, ttl: Duration) -> Self {
        CatalogCache {
            source,
            ttl,
            loaded: None,
        }
    }

    /// The catalog, refreshing from the source if missing or stale.
    pub fn get(&mut self, now: Instant) -> Result<&Catalog, CatalogError> {
        let stale = match &self.loaded {
            None => true,
            Some((_, at)) => now.duration_since(*at) >= self.ttl,
        };
        if stale {
            match self.source.fetch().and_then(Catalog::from_payload) {
                Ok(catalog) => self.loaded = Some((catalog, now)),
                Err(err) => {
                    if self.loaded.is_none() {
                        return Err(err);
                    }
                    // Serve the stale copy; staleness is preferable to an
                    // empty search surface.
                }
            }
        }
        match &self.loaded {
            Some((catalog, _)) => Ok(catalog),
            None => Err(CatalogError::NotLoaded),
        }
    }

    /// The catalog without triggering a refresh. `NotLoaded` until the first
    /// successful [`CatalogCache::get`].
    pub fn current(&self) -> Result<&Catalog, CatalogError> {
        self.loaded
            .as_ref()
            .map(|(c, _)| c)
            .ok_or(CatalogError::NotLoaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo(inst: &str, year: u16, spec: &str, area: &str, topic: &str, n: u32) -> Combination {
        Combination {
            institution: inst.to_owned(),
            year,
            specialty: spec.to_owned(),
            area: area.to_owned(),
            topic: topic.to_owned(),
            question_count: n,
        }
    }

    fn payload(combos: Vec<Combination>) -> CatalogPayload {
        CatalogPayload {
            combinations: combos,
            stats: None,
        }
    }

    #[test]
    fn test_rejects_zero_count() {
        let err = Catalog::new(vec![combo("ENARE", 2023, "Cardio", "CM", "Arritmias", 0)])
            .unwrap_err();
        assert_eq!(err, CatalogError::NonPositiveCount { index: 0 });
    }

    #[test]
    fn test_rejects_duplicate_key() {
        let err = Catalog::new(vec![
            combo("ENARE", 2023, "Cardio", "CM", "Arritmias", 5),
            combo("ENARE", 2023, "Cardio", "CM", "Arritmias", 3),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateCombination { index: 1 });
    }

    #[test]
    fn test_same_labels_different_year_is_not_duplicate() {
        assert!(Catalog::new(vec![
            combo("ENARE", 2023, "Cardio", "CM", "Arritmias", 5),
            combo("ENARE", 2022, "Cardio", "CM", "Arritmias", 3),
        ])
        .is_ok());
    }

    #[test]
    fn test_stats() {
        let catalog = Catalog::new(vec![
            combo("ENARE", 2023, "Cardiologia", "Clínica Médica", "Arritmias", 5),
            combo("USP", 2023, "Cardiologia", "Clínica Médica", "Arritmias", 3),
            combo("USP", 2022, "Cirurgia Geral", "Cirúrgica", "Trauma", 7),
        ])
        .unwrap();
        let stats = catalog.stats();
        assert_eq!(stats.total_questions, 15);
        assert_eq!(stats.unique_institutions, 2);
        assert_eq!(stats.unique_areas, 2);
    }

    #[test]
    fn test_searchable_terms_sorted_and_deduped() {
        let catalog = Catalog::new(vec![
            combo("USP", 2023, "Cardiologia", "Clínica Médica", "Arritmias", 3),
            combo("ENARE", 2023, "Cardiologia", "Clínica Médica", "Arritmias", 5),
        ])
        .unwrap();
        assert_eq!(
            catalog.searchable_terms(),
            vec!["Arritmias", "Cardiologia", "Clínica Médica", "ENARE", "USP"]
        );
    }

    #[test]
    fn test_wire_roundtrip() {
        let json = r#"[["ENARE",2023,"Cardiologia","Clínica Médica","Arritmias",5]]"#;
        let combos: Vec<Combination> = serde_json::from_str(json).unwrap();
        assert_eq!(combos[0].institution, "ENARE");
        assert_eq!(combos[0].year, 2023);
        assert_eq!(combos[0].question_count, 5);
        assert_eq!(serde_json::to_string(&combos).unwrap(), json);
    }

    #[test]
    fn test_cache_not_loaded() {
        let cache = CatalogCache::new(|| Ok(payload(vec![])));
        assert_eq!(cache.current().unwrap_err(), CatalogError::NotLoaded);
    }

    #[test]
    fn test_cache_loads_once_within_ttl() {
        let mut calls = 0;
        let mut cache = CatalogCache::new(|| {
            calls += 1;
            Ok(payload(vec![combo("ENARE", 2023, "C", "CM", "T", 1)]))
        });
        let t0 = Instant::now();
        assert_eq!(cache.get(t0).unwrap().len(), 1);
        assert_eq!(cache.get(t0 + Duration::from_secs(60)).unwrap().len(), 1);
        drop(cache);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_cache_refreshes_after_ttl() {
        let mut calls = 0;
        let mut cache = CatalogCache::with_ttl(
            || {
                calls += 1;
                Ok(payload(vec![combo("ENARE", 2023, "C", "CM", "T", 1)]))
            },
            Duration::from_secs(10),
        );
        let t0 = Instant::now();
        cache.get(t0).unwrap();
        cache.get(t0 + Duration::from_secs(11)).unwrap();
        drop(cache);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_cache_serves_stale_on_refresh_failure() {
        let mut calls = 0;
        let mut cache = CatalogCache::with_ttl(
            move || {
                calls += 1;
                if calls == 1 {
                    Ok(payload(vec![combo("ENARE", 2023, "C", "CM", "T", 1)]))
                } else {
                    Err(CatalogError::FetchFailed {
                        message: "network down".to_owned(),
                    })
                }
            },
            Duration::from_secs(10),
        );
        let t0 = Instant::now();
        cache.get(t0).unwrap();
        // Refresh fails, stale copy still served
        assert_eq!(cache.get(t0 + Duration::from_secs(11)).unwrap().len(), 1);
    }

    #[test]
    fn test_cache_propagates_first_load_failure() {
        let mut cache = CatalogCache::new(|| {
            Err(CatalogError::FetchFailed {
                message: "boom".to_owned(),
            })
        });
        assert!(matches!(
            cache.get(Instant::now()),
            Err(CatalogError::FetchFailed { .. })
        ));
    }
}
