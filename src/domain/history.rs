//! Undo/redo log of structure snapshots.

use tracing::trace;

/// Ordered snapshots with a cursor on the current one.
///
/// The log is never empty and the cursor is always a valid index. Recording
/// after an undo discards everything ahead of the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History<S> {
    log: Vec<S>,
    cursor: usize,
}

impl<S: Clone> History<S> {
    /// Log holding exactly `initial`, cursor 0.
    pub fn new(initial: S) -> Self {
        Self {
            log: vec![initial],
            cursor: 0,
        }
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> &S {
        &self.log[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Always false; a log holds at least its initial snapshot.
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn snapshots(&self) -> &[S] {
        &self.log
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.log.len()
    }

    /// Drop entries after the cursor, append `snapshot`, move onto it.
    pub fn record(&mut self, snapshot: S) {
        let pruned = self.log.len() - (self.cursor + 1);
        self.log.truncate(self.cursor + 1);
        self.log.push(snapshot);
        self.cursor = self.log.len() - 1;
        trace!(cursor = self.cursor, pruned, "recorded snapshot");
    }

    /// Step back one entry; no-op at the first.
    pub fn undo(&mut self) -> &S {
        self.cursor = self.cursor.saturating_sub(1);
        self.current()
    }

    /// Step forward one entry; no-op at the last.
    pub fn redo(&mut self) -> &S {
        self.cursor = (self.cursor + 1).min(self.log.len() - 1);
        self.current()
    }

    /// Move the cursor to `index`, clamped to the last entry.
    pub fn jump_to(&mut self, index: usize) -> &S {
        self.cursor = index.min(self.log.len() - 1);
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let history = History::new("s0");
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_clamp() {
        let mut history = History::new(0);
        assert_eq!(*history.undo(), 0);
        history.record(1);
        assert_eq!(*history.redo(), 1);
        assert_eq!(*history.undo(), 0);
        assert_eq!(*history.undo(), 0);
    }

    #[test]
    fn test_jump_clamps_to_last() {
        let mut history = History::new('a');
        history.record('b');
        assert_eq!(*history.jump_to(0), 'a');
        assert_eq!(*history.jump_to(9), 'b');
    }
}
