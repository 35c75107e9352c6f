//! Fuzzy faceted search for exam question banks.
//!
//! This crate powers a "what do you want to study" search bar: free text is
//! fuzzy-matched against a catalog of (institution, year, specialty, area,
//! topic) combinations, candidate facet values are scored and ranked, and
//! the set of still-selectable options per facet is recomputed as the user
//! narrows filters.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ normalize.rs │────▶│   fuzzy/     │────▶│  scoring.rs  │
//! │ (accents,    │     │ (Levenshtein,│     │ (relevance   │
//! │  case)       │     │ fuzzy_match) │     │  ladder)     │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!        │                    │                    │
//!        ▼                    ▼                    ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                       engine.rs                          │
//! │  (compute_alive_options: one fold over the catalog,     │
//! │   self-facet exclusion, total count, best matches)      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Around the core: `catalog` ingests and caches the combination list,
//! `highlight` splits labels for rendering, `debounce` settles query
//! keystrokes, `session` tracks forward/backward traversal, and
//! `history`/`storage` are the persistence ports.
//!
//! # Usage
//!
//! ```
//! use faceta::{compute_alive_options, Catalog, Combination, Selection};
//!
//! let catalog = Catalog::new(vec![Combination {
//!     institution: "ENARE".into(),
//!     year: 2023,
//!     specialty: "Cardiologia".into(),
//!     area: "Clínica Médica".into(),
//!     topic: "Arritmias".into(),
//!     question_count: 5,
//! }])
//! .unwrap();
//!
//! let view = compute_alive_options(&catalog, &Selection::default(), "cardio");
//! assert_eq!(view.total_count, 5);
//! ```

mod catalog;
mod debounce;
mod engine;
mod fuzzy;
mod highlight;
mod history;
mod normalize;
mod scoring;
mod session;
mod storage;

pub use catalog::{
    Catalog, CatalogCache, CatalogError, CatalogPayload, CatalogSource, CatalogStats, Combination,
    CATALOG_TTL,
};
pub use debounce::{QueryDebouncer, DEFAULT_DELAY};
pub use engine::{
    best_matches, compute_alive_options, AliveOption, AliveYear, BestMatch, DerivedView, Facet,
    Selection,
};
pub use fuzzy::{edit_threshold, fuzzy_match, levenshtein_distance, levenshtein_within};
pub use highlight::{highlighted_parts, HighlightPart};
pub use history::{
    compute_stats, CategoryStats, HistoryEntry, HistoryStore, MemoryHistoryStore, NewAnswer,
    UserStats,
};
pub use normalize::normalize;
pub use scoring::{score_label, ScoredQuery};
pub use session::{Advance, SessionNavigator};
pub use storage::{KeyValueStore, MemoryStore, SearchHistory, MAX_SEARCH_HISTORY};
