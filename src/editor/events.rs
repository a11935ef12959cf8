//! Change notifications for the host UI.
//!
//! The session records an event for every document mutation; the UI
//! layer drains the queue after each command and refreshes whatever the
//! events touch (toolbox values, canvas redraw, undo button state).
//! Pull-based on purpose: the core stays free of callbacks and the host
//! decides when to repaint.

/// A document mutation the host UI may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    /// An object was appended at `index`.
    ObjectAdded { index: usize },
    /// The object at `index` changed position, size, or style.
    ObjectModified { index: usize },
    /// The object formerly at `index` was removed; later indices shift
    /// down by one.
    ObjectRemoved { index: usize },
    /// The active selection changed.
    SelectionChanged,
    /// The whole document was replaced (load, undo, redo, background
    /// replace). Any cached per-object state is stale.
    DocumentReloaded,
}
