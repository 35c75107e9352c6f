// SPDX-License-Identifier: Apache-2.0

//! Answer history: append-only records and the stats derived from them.
//!
//! Every submission creates one entry; repeat attempts at the same question
//! are all retained. The store itself is a port - real persistence lives
//! behind an external service with eventual-consistency semantics, so
//! callers use the entry returned by `append` rather than re-reading
//! immediately. The in-memory implementation is for tests and the CLI.

use std::collections::HashMap;

use chrono::{DateTime, Days, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One answered question. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub user_id: String,
    pub question_id: String,
    pub selected_answer: u8,
    pub is_correct: bool,
    pub answered_at: DateTime<Utc>,
    pub time_spent_seconds: Option<u32>,
    /// Category labels cached at answer time, so stats never need a
    /// question-table join.
    pub area: Option<String>,
    pub institution: Option<String>,
}

/// What a caller submits; the store assigns `id`.
#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub user_id: String,
    pub question_id: String,
    pub selected_answer: u8,
    pub is_correct: bool,
    pub answered_at: DateTime<Utc>,
    pub time_spent_seconds: Option<u32>,
    pub area: Option<String>,
    pub institution: Option<String>,
}

/// Append-only history port.
pub trait HistoryStore {
    /// Persist one answer and return the stored entry. Append-only:
    /// repeat attempts create new rows.
    fn append(&mut self, answer: NewAnswer) -> HistoryEntry;

    /// All entries for a user, newest first.
    fn for_user(&self, user_id: &str) -> Vec<HistoryEntry>;
}

/// In-memory store with sequential ids.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    entries: Vec<HistoryEntry>,
    next_id: u64,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        MemoryHistoryStore::default()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append(&mut self, answer: NewAnswer) -> HistoryEntry {
        self.next_id += 1;
        let entry = HistoryEntry {
            id: self.next_id,
            user_id: answer.user_id,
            question_id: answer.question_id,
            selected_answer: answer.selected_answer,
            is_correct: answer.is_correct,
            answered_at: answer.answered_at,
            time_spent_seconds: answer.time_spent_seconds,
            area: answer.area,
            institution: answer.institution,
        };
        self.entries.push(entry.clone());
        entry
    }

    fn for_user(&self, user_id: &str) -> Vec<HistoryEntry> {
        let mut entries: Vec<HistoryEntry> = self
            .entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.answered_at.cmp(&a.answered_at));
        entries
    }
}

/// Per-category accuracy rollup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStats {
    pub total: u32,
    pub correct: u32,
    pub total_time_seconds: u64,
}

impl CategoryStats {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.total)
        }
    }
}

/// Aggregate performance picture for one user.
#[derive(Debug, Clone, Default)]
pub struct UserStats {
    pub total_answered: u32,
    pub total_correct: u32,
    pub total_time_seconds: u64,
    pub by_area: HashMap<String, CategoryStats>,
    pub by_institution: HashMap<String, CategoryStats>,
    /// Answers per day for the trailing window, oldest first.
    pub recent_activity: Vec<(NaiveDate, u32)>,
    /// Consecutive days with at least one answer, ending today.
    pub streak_days: u32,
}

impl UserStats {
    pub fn accuracy(&self) -> f64 {
        if self.total_answered == 0 {
            0.0
        } else {
            f64::from(self.total_correct) / f64::from(self.total_answered)
        }
    }

    pub fn average_time_seconds(&self) -> f64 {
        if self.total_answered == 0 {
            0.0
        } else {
            self.total_time_seconds as f64 / f64::from(self.total_answered)
        }
    }
}

/// Fold a user's entries into [`UserStats`].
///
/// `today` is injected so tests control the streak boundary;
/// `activity_days` bounds the recent-activity window.
pub fn compute_stats(entries: &[HistoryEntry], today: NaiveDate, activity_days: u32) -> UserStats {
    let mut stats = UserStats::default();
    let mut by_day: HashMap<NaiveDate, u32> = HashMap::new();

    for entry in entries {
        stats.total_answered += 1;
        if entry.is_correct {
            stats.total_correct += 1;
        }
        let spent = u64::from(entry.time_spent_seconds.unwrap_or(0));
        stats.total_time_seconds += spent;

        if let Some(area) = &entry.area {
            bump(&mut stats.by_area, area, entry.is_correct, spent);
        }
        if let Some(inst) = &entry.institution {
            bump(&mut stats.by_institution, inst, entry.is_correct, spent);
        }

        *by_day.entry(entry.answered_at.date_naive()).or_default() += 1;
    }

    for offset in (0..activity_days).rev() {
        let day = today - Duration::days(i64::from(offset));
        stats
            .recent_activity
            .push((day, by_day.get(&day).copied().unwrap_or(0)));
    }

    let mut day = today;
    while by_day.contains_key(&day) {
        stats.streak_days += 1;
        match day.checked_sub_days(Days::new(1)) {
            Some(prev) => day = prev,
            None => break,
        }
    }

    stats
}

fn bump(map: &mut HashMap<String, CategoryStats>, key: &str, correct: bool, spent: u64) {
    let slot = map.entry(key.to_owned()).or_default();
    slot.total += 1;
    if correct {
        slot.correct += 1;
    }
    slot.total_time_seconds += spent;
}
