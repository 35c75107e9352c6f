// SPDX-License-Identifier: Apache-2.0

//! Last-write-wins debouncing for the free-text query.
//!
//! Recomputation is synchronous and cheap, so nothing in flight ever needs
//! cancelling - the only concern is not recomputing on every keystroke for a
//! fast typist. Each `submit` restarts the clock and replaces any pending
//! query; `poll` releases the latest one once the delay has elapsed.
//!
//! The clock is injected (`Instant` arguments), so this stays a pure state
//! machine: no timers, no threads, trivially testable. Facet picks are
//! discrete events and must NOT go through this - apply them immediately.

use std::time::{Duration, Instant};

/// Default settle delay between the last keystroke and recomputation.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(150);

#[derive(Debug)]
pub struct QueryDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl QueryDebouncer {
    pub fn new(delay: Duration) -> Self {
        QueryDebouncer {
            delay,
            pending: None,
        }
    }

    /// Record a keystroke. Supersedes any pending query and restarts the
    /// delay from `now`.
    pub fn submit(&mut self, query: &str, now: Instant) {
        self.pending = Some((query.to_owned(), now));
    }

    /// Release the pending query if its delay has elapsed, consuming it.
    /// Returns `None` while settling or when nothing is pending.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, at)) if now.duration_since(*at) >= self.delay => {
                self.pending.take().map(|(q, _)| q)
            }
            _ => None,
        }
    }

    /// Is a query waiting for its delay to elapse?
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending query without releasing it (e.g. on "clear").
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl Default for QueryDebouncer {
    fn default() -> Self {
        QueryDebouncer::new(DEFAULT_DELAY)
    }
}
