//! Bounded linear undo/redo history.

use std::collections::VecDeque;

use crate::history::StackEntry;
use crate::types::RevisionStatus;

/// Number of undoable operations kept per backend instance.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Undo and redo stacks of one backend instance.
///
/// A new push evicts the oldest undo entry once the limit is reached and
/// discards the redo stack.
#[derive(Debug, Clone)]
pub struct RevisionHistory {
    undo: VecDeque<StackEntry>,
    redo: Vec<StackEntry>,
    limit: usize,
}

impl RevisionHistory {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            undo: VecDeque::with_capacity(limit),
            redo: Vec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Record a freshly performed operation.
    pub fn push(&mut self, entry: StackEntry) {
        self.push_undo(entry);
        self.redo.clear();
    }

    /// Return a redone entry to the undo stack, keeping the redo stack.
    pub fn push_undo(&mut self, entry: StackEntry) {
        while self.undo.len() >= self.limit {
            self.undo.pop_front();
        }
        self.undo.push_back(entry);
    }

    pub fn push_redo(&mut self, entry: StackEntry) {
        self.redo.push(entry);
    }

    pub fn pop_undo(&mut self) -> Option<StackEntry> {
        self.undo.pop_back()
    }

    pub fn pop_redo(&mut self) -> Option<StackEntry> {
        self.redo.pop()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn status(&self) -> RevisionStatus {
        RevisionStatus::new(self.undo.is_empty(), self.redo.is_empty())
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

impl Default for RevisionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Resource;
    use serde_json::json;

    fn insert(n: usize) -> StackEntry {
        StackEntry::Insert(
            Resource::from_value(json!({"id": format!("r{}", n), "resource_version": "1.0.0"}))
                .unwrap(),
        )
    }

    #[test]
    fn test_evicts_oldest() {
        let mut history = RevisionHistory::default();
        for n in 0..11 {
            history.push(insert(n));
        }
        assert_eq!(history.undo_len(), 10);

        let mut popped = Vec::new();
        while let Some(entry) = history.pop_undo() {
            popped.push(entry);
        }
        assert_eq!(popped.len(), 10);
        assert_eq!(popped.first(), Some(&insert(10)));
        assert_eq!(popped.last(), Some(&insert(1)));
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = RevisionHistory::default();
        history.push(insert(0));
        let entry = history.pop_undo().unwrap();
        history.push_redo(entry);
        assert_eq!(history.status(), RevisionStatus::new(true, false));

        history.push(insert(1));
        assert_eq!(history.redo_len(), 0);
        assert_eq!(history.status(), RevisionStatus::new(false, true));
    }

    #[test]
    fn test_push_undo_keeps_redo() {
        let mut history = RevisionHistory::new(2);
        history.push_redo(insert(0));
        history.push_undo(insert(1));
        assert_eq!(history.redo_len(), 1);
    }

    #[test]
    fn test_zero_limit_keeps_one() {
        let mut history = RevisionHistory::new(0);
        history.push(insert(0));
        history.push(insert(1));
        assert_eq!(history.limit(), 1);
        assert_eq!(history.pop_undo(), Some(insert(1)));
    }
}
