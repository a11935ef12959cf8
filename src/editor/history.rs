//! Snapshot-based undo/redo.
//!
//! Every savepoint is a full serialized copy of the document (the same
//! record vector a dump produces). The history is linear: undoing and
//! then making a fresh edit prunes the redo branch.

use crate::layout::LayoutRecord;

/// Undo/redo stack over serialized document snapshots.
#[derive(Debug, Default)]
pub struct History {
    snapshots: Vec<Vec<LayoutRecord>>,
    /// Steps into the past: 0 = the most recent snapshot ("now").
    position: usize,
    /// Set while a bulk replay (undo/redo/load/paste) rebuilds the
    /// document, so reconstruction cannot spawn snapshots of its own.
    replaying: bool,
    /// Unsaved changes since the last successful save.
    dirty: bool,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a savepoint. No-op while a replay is in progress.
    ///
    /// If the user had undone past snapshots, everything newer than the
    /// current position is discarded first — fresh edits rewrite the
    /// future.
    pub fn record(&mut self, state: Vec<LayoutRecord>) {
        if self.replaying {
            return;
        }
        if self.position > 0 {
            let keep = self.snapshots.len() - self.position;
            self.snapshots.truncate(keep);
            self.position = 0;
        }
        self.snapshots.push(state);
        self.dirty = true;
    }

    /// Step one snapshot into the past. Returns the state to restore,
    /// or `None` when already at the oldest snapshot.
    pub fn step_back(&mut self) -> Option<Vec<LayoutRecord>> {
        if self.position + 1 >= self.snapshots.len() {
            return None;
        }
        self.position += 1;
        self.dirty = true;
        Some(self.current().clone())
    }

    /// Step one snapshot toward the present. Returns the state to
    /// restore, or `None` when already at "now".
    pub fn step_forward(&mut self) -> Option<Vec<LayoutRecord>> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        self.dirty = true;
        Some(self.current().clone())
    }

    fn current(&self) -> &Vec<LayoutRecord> {
        &self.snapshots[self.snapshots.len() - 1 - self.position]
    }

    pub fn can_undo(&self) -> bool {
        self.position + 1 < self.snapshots.len()
    }

    pub fn can_redo(&self) -> bool {
        self.position > 0
    }

    /// Drop all snapshots, e.g. when a freshly loaded document becomes
    /// the new baseline. Does not touch the dirty flag.
    pub fn reset(&mut self) {
        self.snapshots.clear();
        self.position = 0;
    }

    pub fn begin_replay(&mut self) {
        self.replaying = true;
    }

    pub fn end_replay(&mut self) {
        self.replaying = false;
    }

    pub fn replay_in_progress(&self) -> bool {
        self.replaying
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BarcodeRecord, ContentKey};
    use pretty_assertions::assert_eq;

    fn state(size: f64) -> Vec<LayoutRecord> {
        vec![LayoutRecord::Barcodearea(BarcodeRecord {
            left: 0.0,
            bottom: 0.0,
            size,
            content: ContentKey::Other,
        })]
    }

    #[test]
    fn undo_walks_back_redo_walks_forward() {
        let mut h = History::new();
        h.record(state(1.0));
        h.record(state(2.0));
        h.record(state(3.0));

        assert_eq!(h.step_back(), Some(state(2.0)));
        assert_eq!(h.step_back(), Some(state(1.0)));
        assert_eq!(h.step_back(), None);

        assert_eq!(h.step_forward(), Some(state(2.0)));
        assert_eq!(h.step_forward(), Some(state(3.0)));
        assert_eq!(h.step_forward(), None);
    }

    #[test]
    fn fresh_edit_prunes_redo_branch() {
        let mut h = History::new();
        h.record(state(1.0));
        h.record(state(2.0));
        h.record(state(3.0));

        h.step_back();
        h.step_back();
        h.record(state(9.0));

        assert!(!h.can_redo());
        assert_eq!(h.len(), 2);
        assert_eq!(h.step_back(), Some(state(1.0)));
        assert_eq!(h.step_forward(), Some(state(9.0)));
    }

    #[test]
    fn record_is_suppressed_during_replay() {
        let mut h = History::new();
        h.record(state(1.0));
        h.begin_replay();
        h.record(state(2.0));
        h.end_replay();
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn single_snapshot_cannot_undo() {
        let mut h = History::new();
        h.record(state(1.0));
        assert!(!h.can_undo());
        assert_eq!(h.step_back(), None);
    }

    #[test]
    fn dirty_tracking() {
        let mut h = History::new();
        assert!(!h.is_dirty());
        h.record(state(1.0));
        assert!(h.is_dirty());
        h.mark_clean();
        h.record(state(2.0));
        h.mark_clean();
        h.step_back();
        assert!(h.is_dirty());
    }
}
