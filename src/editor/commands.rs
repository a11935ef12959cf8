//! The command surface a host UI drives the session through.
//!
//! Instead of reaching into canvas internals, the UI layer translates
//! its events (keystrokes, toolbox form changes, drag gestures) into
//! commands and setter calls here. Each setter is one logical user
//! action and snapshots exactly once; intermediate drag frames go
//! through [`EditorSession::translate_selection`] and snapshot on
//! [`EditorSession::commit_gesture`].
//!
//! The keyboard mapping mirrors the editor's shortcuts: arrows nudge by
//! 1 mm (10 mm with Shift), Delete removes, Ctrl+Z/Y undo/redo and
//! Ctrl+X/C/V cut/copy/paste. The host owns modal state (e.g. a raw
//! JSON source view) and simply stops feeding keys in while a modal is
//! open.

use super::{EditorSession, Selection};
use crate::editor::events::EditorEvent;
use crate::editor::objects::CanvasObject;
use crate::layout::{Align, ContentKey, Rgb};

/// Nudge direction, in screen orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn deltas(self, distance: f64) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -distance),
            Direction::Down => (0.0, distance),
            Direction::Left => (-distance, 0.0),
            Direction::Right => (distance, 0.0),
        }
    }
}

/// Nudge distance: fine without modifier, coarse with Shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeStep {
    /// 1 mm.
    Fine,
    /// 10 mm.
    Coarse,
}

impl NudgeStep {
    pub fn millimeters(self) -> f64 {
        match self {
            NudgeStep::Fine => 1.0,
            NudgeStep::Coarse => 10.0,
        }
    }
}

/// A discrete editor action, usually derived from a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Nudge(Direction, NudgeStep),
    Delete,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
}

/// The keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Delete,
    Z,
    Y,
    X,
    C,
    V,
}

/// A keystroke as the host UI sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
}

/// Map a keystroke to a command. Returns `None` for combinations the
/// editor does not handle, so the host can let them bubble.
pub fn key_command(input: KeyInput) -> Option<EditorCommand> {
    let step = if input.shift {
        NudgeStep::Coarse
    } else {
        NudgeStep::Fine
    };
    match input.key {
        Key::ArrowUp => Some(EditorCommand::Nudge(Direction::Up, step)),
        Key::ArrowDown => Some(EditorCommand::Nudge(Direction::Down, step)),
        Key::ArrowLeft => Some(EditorCommand::Nudge(Direction::Left, step)),
        Key::ArrowRight => Some(EditorCommand::Nudge(Direction::Right, step)),
        Key::Delete => Some(EditorCommand::Delete),
        Key::Z if input.ctrl => Some(EditorCommand::Undo),
        Key::Y if input.ctrl => Some(EditorCommand::Redo),
        Key::X if input.ctrl => Some(EditorCommand::Cut),
        Key::C if input.ctrl => Some(EditorCommand::Copy),
        Key::V if input.ctrl => Some(EditorCommand::Paste),
        _ => None,
    }
}

/// A partial style update for the selected text field. Absent fields
/// are left untouched, so the toolbox can push exactly the control that
/// changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyleUpdate {
    pub color: Option<Rgb>,
    pub font_size_pt: Option<f64>,
    pub font_family: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub width_mm: Option<f64>,
    pub align: Option<Align>,
    pub downward: Option<bool>,
    pub rotation: Option<f64>,
    pub content: Option<ContentKey>,
    /// Literal text; applied only while the content key is `other`.
    pub text: Option<String>,
}

impl EditorSession {
    /// Run a discrete command.
    pub fn execute(&mut self, command: EditorCommand) {
        match command {
            EditorCommand::Nudge(direction, step) => self.nudge(direction, step),
            EditorCommand::Delete => self.delete_selection(),
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
            EditorCommand::Cut => self.cut(),
            EditorCommand::Copy => self.copy(),
            EditorCommand::Paste => self.paste(),
        }
    }

    /// Move the selection by a keyboard nudge and snapshot.
    pub fn nudge(&mut self, direction: Direction, step: NudgeStep) {
        let distance = self.metrics().mm_to_px(step.millimeters());
        let (dx, dy) = direction.deltas(distance);
        if self.translate_selection(dx, dy) {
            self.create_savepoint();
        }
    }

    /// Move the selection by raw pixels without snapshotting — for
    /// intermediate drag frames. Returns whether anything moved.
    pub fn translate_selection(&mut self, dx: f64, dy: f64) -> bool {
        let modified: Vec<usize> = match self.selection_mut() {
            Selection::None => return false,
            Selection::Single(index) => {
                let index = *index;
                self.objects_mut()[index].translate(dx, dy);
                vec![index]
            }
            Selection::Group(group) => {
                group.frame.left += dx;
                group.frame.top += dy;
                group.members.clone()
            }
        };
        for index in modified {
            self.push_event(EditorEvent::ObjectModified { index });
        }
        true
    }

    /// Snapshot at the end of a drag/resize/rotate gesture.
    pub fn commit_gesture(&mut self) {
        self.create_savepoint();
    }

    /// Position of the active selection in document space: distance from
    /// the page's left and bottom edges, mm. For the toolbox fields.
    pub fn position_mm(&self) -> Option<(f64, f64)> {
        let page_height = self.viewport().height;
        let (left, top, height, downward) = match self.selection() {
            Selection::None => return None,
            Selection::Single(index) => {
                let object = self.object(*index)?;
                let (left, top) = (object.left(), object.top());
                (left, top, object.height(self.measurer()), object.downward())
            }
            Selection::Group(group) => {
                let frame = group.frame;
                (frame.left, frame.top, frame.height, false)
            }
        };
        let bottom = if downward {
            page_height - top
        } else {
            page_height - height - top
        };
        Some((
            self.metrics().px_to_mm(left),
            self.metrics().px_to_mm(bottom),
        ))
    }

    /// Move the active selection to a document-space position (mm from
    /// the page's left and bottom edges) and snapshot.
    pub fn set_position_mm(&mut self, x: f64, y: f64) {
        let metrics = self.metrics();
        let page_height = self.viewport().height;
        let left = metrics.mm_to_px(x);
        let anchor = page_height - metrics.mm_to_px(y);

        let modified: Vec<usize> = match self.selection_mut() {
            Selection::None => return,
            Selection::Single(index) => {
                let index = *index;
                let height = self.objects()[index].height(self.measurer());
                let downward = self.objects()[index].downward();
                let top = if downward { anchor } else { anchor - height };
                self.objects_mut()[index].set_position(left, top);
                vec![index]
            }
            Selection::Group(group) => {
                group.frame.left = left;
                group.frame.top = anchor - group.frame.height;
                group.members.clone()
            }
        };
        for index in modified {
            self.push_event(EditorEvent::ObjectModified { index });
        }
        self.create_savepoint();
    }

    /// Edge length of the selected barcode area, mm. `None` when the
    /// selection is not a single barcode.
    pub fn square_size_mm(&self) -> Option<f64> {
        let Selection::Single(index) = self.selection() else {
            return None;
        };
        match self.object(*index)? {
            CanvasObject::Barcode(o) => Some(self.metrics().px_to_mm(o.size)),
            CanvasObject::Text(_) => None,
        }
    }

    /// Resize the selected barcode area, keeping its bottom edge
    /// anchored, and snapshot. No-op unless a single barcode is
    /// selected.
    pub fn set_square_size_mm(&mut self, size: f64) {
        let new_size = self.metrics().mm_to_px(size);
        let Selection::Single(index) = self.selection() else {
            return;
        };
        let index = *index;
        let Some(CanvasObject::Barcode(o)) = self.objects_mut().get_mut(index) else {
            return;
        };
        o.top += o.size - new_size;
        o.size = new_size;
        self.push_event(EditorEvent::ObjectModified { index });
        self.create_savepoint();
    }

    /// Apply a partial style update to the selected text field and
    /// snapshot. No-op unless a single text field is selected.
    pub fn set_text_style(&mut self, update: TextStyleUpdate) {
        let metrics = self.metrics();
        let Selection::Single(index) = self.selection() else {
            return;
        };
        let index = *index;

        // Resolve the canvas text before borrowing the object mutably:
        // switching the content key swaps literal text for sample text.
        let new_text = update.content.as_ref().map(|content| {
            if content.is_other() {
                None
            } else {
                Some(self.variables().sample_text(content))
            }
        });

        let Some(CanvasObject::Text(o)) = self.objects_mut().get_mut(index) else {
            return;
        };
        if let Some(color) = update.color {
            o.color = color;
        }
        if let Some(pt) = update.font_size_pt {
            o.font_size = metrics.pt_to_px(pt);
        }
        if let Some(family) = update.font_family {
            o.font_family = family;
        }
        if let Some(bold) = update.bold {
            o.bold = bold;
        }
        if let Some(italic) = update.italic {
            o.italic = italic;
        }
        if let Some(width) = update.width_mm {
            o.width = metrics.mm_to_px(width);
        }
        if let Some(align) = update.align {
            o.align = align;
        }
        if let Some(rotation) = update.rotation {
            o.rotation = rotation;
        }
        if let Some(content) = update.content {
            o.content = content;
        }
        match new_text {
            Some(Some(sample)) => o.text = sample,
            _ => {
                if o.content.is_other() {
                    if let Some(text) = update.text {
                        o.text = text;
                    }
                }
            }
        }
        if let Some(downward) = update.downward {
            o.downward = downward;
        }

        self.push_event(EditorEvent::ObjectModified { index });
        self.create_savepoint();
    }
}
