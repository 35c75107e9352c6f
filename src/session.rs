// SPDX-License-Identifier: Apache-2.0

//! Forward/backward traversal of a study session.
//!
//! The navigator owns a visited-id stack and a cursor into it, decoupled
//! from whatever filtered question list the host currently holds. Going
//! back replays history; going forward past the end of history pulls the
//! first unseen question from the filtered list. Running off the end of the
//! filtered list is a signal to refetch, not an error.
//!
//! Invariant: whenever the stack is non-empty the cursor is a valid index
//! into it.

use std::collections::HashSet;

/// Outcome of an [`SessionNavigator::advance`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved forward through already-visited history.
    Revisit(String),
    /// Pushed the first unseen question from the filtered list.
    Fresh(String),
    /// Every question in the filtered list has been visited; the host
    /// should fetch more (or tell the user they are done).
    NeedsRefetch,
}

#[derive(Debug, Default)]
pub struct SessionNavigator {
    stack: Vec<String>,
    visited: HashSet<String>,
    /// Index into `stack`; `None` only when the stack is empty.
    cursor: Option<usize>,
}

impl SessionNavigator {
    pub fn new() -> Self {
        SessionNavigator::default()
    }

    /// The question id under the cursor, if any.
    pub fn current(&self) -> Option<&str> {
        self.cursor.map(|i| self.stack[i].as_str())
    }

    /// How many questions have been visited this session.
    pub fn visited_count(&self) -> usize {
        self.stack.len()
    }

    /// Move forward: through history first, then onto the first unseen id
    /// in `filtered`.
    pub fn advance(&mut self, filtered: &[String]) -> Advance {
        if let Some(i) = self.cursor {
            if i + 1 < self.stack.len() {
                self.cursor = Some(i + 1);
                return Advance::Revisit(self.stack[i + 1].clone());
            }
        }

        match filtered.iter().find(|id| !self.visited.contains(*id)) {
            Some(id) => {
                self.stack.push(id.clone());
                self.visited.insert(id.clone());
                self.cursor = Some(self.stack.len() - 1);
                Advance::Fresh(id.clone())
            }
            None => Advance::NeedsRefetch,
        }
    }

    /// Move the cursor back one entry. No-op (`None`) at the start.
    pub fn retreat(&mut self) -> Option<&str> {
        match self.cursor {
            Some(i) if i > 0 => {
                self.cursor = Some(i - 1);
                Some(self.stack[i - 1].as_str())
            }
            _ => None,
        }
    }

    /// Clear the stack and history; cursor parks until the next advance.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.visited.clear();
        self.cursor = None;
    }
}
