//! # Editor Session
//!
//! The live editing state for one badge/ticket layout: the canvas
//! objects in pixel space, the active selection, undo/redo history, and
//! the clipboard. One session per open document; sessions are plain
//! values, so tests (and multi-document hosts) can hold as many as they
//! like without any global state.
//!
//! The session is created once the host has rendered the background page
//! and knows its pixel dimensions and scale. Everything the session
//! persists goes through [`EditorSession::dump`] /
//! [`EditorSession::load`], which convert between the transient
//! pixel-space objects and the portable millimeter-space records.

pub mod clipboard;
pub mod commands;
pub mod events;
pub mod history;
pub mod objects;

pub use clipboard::Clipboard;
pub use commands::{Direction, EditorCommand, Key, KeyInput, NudgeStep, TextStyleUpdate, key_command};
pub use events::EditorEvent;
pub use history::History;
pub use objects::{
    BarcodeObject, CanvasObject, GroupFrame, HeuristicMeasurer, ResizePolicy, TextMeasurer,
    TextObject,
};

use crate::layout::{
    Align, BarcodeRecord, ContentKey, LayoutRecord, TextRecord, round_mm, round_pt,
};
use crate::units::PageMetrics;
use crate::variables::VariableRegistry;

/// Default text field position, px from the page's top-left corner.
const TEXT_DEFAULT_POSITION: f64 = 10.0;

/// Default text field wrap width, mm.
const TEXT_DEFAULT_WIDTH_MM: f64 = 50.0;

/// Default text font size, pt.
const TEXT_DEFAULT_FONT_SIZE_PT: f64 = 13.0;

/// Default barcode area position and edge length, px.
const BARCODE_DEFAULT_POSITION: f64 = 100.0;
const BARCODE_DEFAULT_SIZE: f64 = 100.0;

/// Where a pasted multi-select group lands, px.
const PASTE_GROUP_POSITION: f64 = 100.0;

/// Pixel dimensions of the rendered background page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageViewport {
    pub width: f64,
    pub height: f64,
}

impl PageViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An active multi-select group: member indices plus the bounding frame
/// the members are positioned relative to.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveGroup {
    pub members: Vec<usize>,
    pub frame: GroupFrame,
}

/// The current selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    None,
    Single(usize),
    Group(ActiveGroup),
}

/// One editing session over one document.
pub struct EditorSession {
    viewport: PageViewport,
    metrics: PageMetrics,
    /// Locale tag stamped onto dumped text records. The format allows a
    /// per-field locale but the editor exposes a single document-wide one.
    locale: Option<String>,
    objects: Vec<CanvasObject>,
    selection: Selection,
    history: History,
    clipboard: Clipboard,
    variables: VariableRegistry,
    measurer: Box<dyn TextMeasurer>,
    events: Vec<EditorEvent>,
    /// Identifier of a freshly uploaded background, included in the next
    /// save payload and cleared once the host confirms the save.
    pending_background: Option<String>,
}

impl EditorSession {
    /// Create an empty session for a rendered background page.
    ///
    /// The baseline state (an empty document) becomes the oldest undo
    /// snapshot, so undo right after opening is a no-op rather than a
    /// surprise.
    pub fn new(viewport: PageViewport, metrics: PageMetrics, variables: VariableRegistry) -> Self {
        let mut session = Self {
            viewport,
            metrics,
            locale: None,
            objects: Vec::new(),
            selection: Selection::None,
            history: History::new(),
            clipboard: Clipboard::default(),
            variables,
            measurer: Box::new(HeuristicMeasurer),
            events: Vec::new(),
            pending_background: None,
        };
        session.create_savepoint();
        session.history.mark_clean();
        session
    }

    /// Replace the text measurer, e.g. with one backed by real font
    /// metrics. Must be called before any objects exist.
    pub fn with_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self
    }

    pub fn viewport(&self) -> PageViewport {
        self.viewport
    }

    pub fn metrics(&self) -> PageMetrics {
        self.metrics
    }

    /// Page dimensions in millimeters, for the toolbox header.
    pub fn page_size_mm(&self) -> (f64, f64) {
        (
            self.metrics.px_to_mm(self.viewport.width),
            self.metrics.px_to_mm(self.viewport.height),
        )
    }

    pub fn objects(&self) -> &[CanvasObject] {
        &self.objects
    }

    pub fn object(&self, index: usize) -> Option<&CanvasObject> {
        self.objects.get(index)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn variables(&self) -> &VariableRegistry {
        &self.variables
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn set_locale(&mut self, locale: Option<String>) {
        self.locale = locale;
    }

    pub fn is_dirty(&self) -> bool {
        self.history.is_dirty()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Take all pending change notifications.
    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------
    // Element factory
    // ------------------------------------------------------------------

    /// Create a text field with factory defaults and select nothing.
    ///
    /// Defaults: near the top-left corner, 50 mm wide, Arial 13 pt,
    /// left-aligned, anchored downward. For `other` content the literal
    /// text starts as a placeholder word; any other key shows its sample.
    pub fn add_text_field(&mut self, content: ContentKey) -> usize {
        let text = if content.is_other() {
            "text".to_string()
        } else {
            self.variables.sample_text(&content)
        };
        let object = TextObject {
            left: TEXT_DEFAULT_POSITION,
            top: TEXT_DEFAULT_POSITION,
            width: self.metrics.mm_to_px(TEXT_DEFAULT_WIDTH_MM),
            font_size: self.metrics.pt_to_px(TEXT_DEFAULT_FONT_SIZE_PT),
            font_family: "Arial".to_string(),
            bold: false,
            italic: false,
            color: [0, 0, 0],
            align: Align::Left,
            content,
            text,
            rotation: 0.0,
            downward: true,
        };
        let index = self.objects.len();
        self.objects.push(CanvasObject::Text(object));
        self.events.push(EditorEvent::ObjectAdded { index });
        self.create_savepoint();
        index
    }

    /// Create a square barcode placeholder with factory defaults.
    pub fn add_barcode_area(&mut self, content: ContentKey) -> usize {
        let object = BarcodeObject {
            left: BARCODE_DEFAULT_POSITION,
            top: BARCODE_DEFAULT_POSITION,
            size: BARCODE_DEFAULT_SIZE,
            content,
        };
        let index = self.objects.len();
        self.objects.push(CanvasObject::Barcode(object));
        self.events.push(EditorEvent::ObjectAdded { index });
        self.create_savepoint();
        index
    }

    // ------------------------------------------------------------------
    // Dump / load
    // ------------------------------------------------------------------

    /// Serialize the whole document to portable records.
    pub fn dump(&self) -> Vec<LayoutRecord> {
        let indices: Vec<usize> = (0..self.objects.len()).collect();
        self.dump_indices(&indices)
    }

    /// Serialize a subset of objects (clipboard, partial exports).
    pub fn dump_indices(&self, indices: &[usize]) -> Vec<LayoutRecord> {
        indices.iter().filter_map(|&i| self.record_for(i)).collect()
    }

    /// Absolute pixel position of an object, resolving the group
    /// transform for members of the active multi-select.
    fn absolute_position(&self, index: usize) -> (f64, f64) {
        let object = &self.objects[index];
        let (mut left, mut top) = (object.left(), object.top());
        if let Selection::Group(group) = &self.selection {
            if group.members.contains(&index) {
                let (dx, dy) = group.frame.offset();
                left += dx;
                top += dy;
            }
        }
        (left, top)
    }

    fn record_for(&self, index: usize) -> Option<LayoutRecord> {
        let object = self.objects.get(index)?;
        let (left, top) = self.absolute_position(index);
        let m = &self.metrics;
        let record = match object {
            CanvasObject::Text(o) => {
                let height = self.measurer.wrapped_height(&o.text, o.font_size, o.width);
                let bottom = if o.downward {
                    self.viewport.height - top
                } else {
                    self.viewport.height - height - top
                };
                LayoutRecord::Textarea(TextRecord {
                    locale: self.locale.clone(),
                    left: round_mm(m.px_to_mm(left)),
                    bottom: round_mm(m.px_to_mm(bottom)),
                    fontsize: round_pt(m.px_to_pt(o.font_size)),
                    color: o.color,
                    fontfamily: o.font_family.clone(),
                    bold: o.bold,
                    italic: o.italic,
                    width: round_mm(m.px_to_mm(o.width)),
                    downward: o.downward,
                    content: o.content.clone(),
                    text: o.text.clone(),
                    rotation: round_pt(o.rotation),
                    align: o.align,
                })
            }
            CanvasObject::Barcode(o) => {
                let bottom = self.viewport.height - o.size - top;
                LayoutRecord::Barcodearea(BarcodeRecord {
                    left: round_mm(m.px_to_mm(left)),
                    bottom: round_mm(m.px_to_mm(bottom)),
                    size: round_mm(m.px_to_mm(o.size)),
                    content: o.content.clone(),
                })
            }
        };
        Some(record)
    }

    /// Replace the whole document with the given records.
    ///
    /// Runs under the history replay guard and does not create a
    /// snapshot — whether a load counts as a user-visible edit is the
    /// caller's call.
    pub fn load(&mut self, records: &[LayoutRecord]) {
        self.history.begin_replay();
        self.objects.clear();
        self.selection = Selection::None;
        for record in records {
            self.insert_record(record);
        }
        self.history.end_replay();
        self.events.push(EditorEvent::DocumentReloaded);
    }

    /// Load a freshly opened document: the loaded state becomes the undo
    /// baseline and the session starts clean.
    pub fn load_initial(&mut self, records: &[LayoutRecord]) {
        self.load(records);
        self.history.reset();
        self.create_savepoint();
        self.history.mark_clean();
    }

    /// Reconstruct one record as a live object. Shared by load and
    /// paste; does not snapshot or emit events.
    pub(crate) fn insert_record(&mut self, record: &LayoutRecord) -> usize {
        let m = self.metrics;
        let page_height = self.viewport.height;
        let object = match record {
            LayoutRecord::Textarea(r) => {
                if r.locale.is_some() {
                    self.locale = r.locale.clone();
                }
                let text = if r.content.is_other() {
                    r.text.clone()
                } else {
                    self.variables.sample_text(&r.content)
                };
                let width = m.mm_to_px(r.width);
                let font_size = m.pt_to_px(r.fontsize);
                let height = self.measurer.wrapped_height(&text, font_size, width);
                let top = if r.downward {
                    page_height - m.mm_to_px(r.bottom)
                } else {
                    page_height - m.mm_to_px(r.bottom) - height
                };
                CanvasObject::Text(TextObject {
                    left: m.mm_to_px(r.left),
                    top,
                    width,
                    font_size,
                    font_family: r.fontfamily.clone(),
                    bold: r.bold,
                    italic: r.italic,
                    color: r.color,
                    align: r.align,
                    content: r.content.clone(),
                    text,
                    rotation: r.rotation,
                    downward: r.downward,
                })
            }
            LayoutRecord::Barcodearea(r) => {
                let size = m.mm_to_px(r.size);
                CanvasObject::Barcode(BarcodeObject {
                    left: m.mm_to_px(r.left),
                    top: page_height - m.mm_to_px(r.bottom) - size,
                    size,
                    content: r.content.clone(),
                })
            }
        };
        self.objects.push(object);
        self.objects.len() - 1
    }

    // ------------------------------------------------------------------
    // Selection and groups
    // ------------------------------------------------------------------

    /// Make a single object the active selection.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.objects.len() {
            return false;
        }
        self.dissolve_group();
        self.selection = Selection::Single(index);
        self.events.push(EditorEvent::SelectionChanged);
        true
    }

    /// Form a multi-select group over the given objects, framed at their
    /// combined bounding box.
    pub fn select_group(&mut self, indices: &[usize]) -> bool {
        if indices.len() < 2 || indices.iter().any(|&i| i >= self.objects.len()) {
            return false;
        }
        let mut members = indices.to_vec();
        members.sort_unstable();
        members.dedup();
        if members.len() < 2 {
            return false;
        }
        self.dissolve_group();
        self.form_group(members, None);
        true
    }

    /// Clear the selection, writing group members' absolute coordinates
    /// back in place.
    pub fn clear_selection(&mut self) {
        self.dissolve_group();
        self.selection = Selection::None;
        self.events.push(EditorEvent::SelectionChanged);
    }

    /// Rebase group members to group-center-relative coordinates and
    /// install the group as the selection. With `origin` set, the frame
    /// is placed there instead of over the members' bounding box, which
    /// moves the members along with it.
    pub(crate) fn form_group(&mut self, members: Vec<usize>, origin: Option<(f64, f64)>) {
        let mut left = f64::INFINITY;
        let mut top = f64::INFINITY;
        let mut right = f64::NEG_INFINITY;
        let mut bottom = f64::NEG_INFINITY;
        for &i in &members {
            let o = &self.objects[i];
            left = left.min(o.left());
            top = top.min(o.top());
            right = right.max(o.left() + o.width());
            bottom = bottom.max(o.top() + o.height(&*self.measurer));
        }
        let (width, height) = (right - left, bottom - top);
        let (frame_left, frame_top) = origin.unwrap_or((left, top));
        let frame = GroupFrame {
            left: frame_left,
            top: frame_top,
            width,
            height,
        };

        // Children become relative to the bounding box center; the frame
        // offset restores (or re-targets) their absolute position.
        let (center_x, center_y) = (left + width / 2.0, top + height / 2.0);
        for &i in &members {
            let o = &mut self.objects[i];
            let (rel_left, rel_top) = (o.left() - center_x, o.top() - center_y);
            o.set_position(rel_left, rel_top);
        }

        self.selection = Selection::Group(ActiveGroup { members, frame });
        self.events.push(EditorEvent::SelectionChanged);
    }

    /// Write absolute coordinates back into group members.
    fn dissolve_group(&mut self) {
        if let Selection::Group(group) = std::mem::take(&mut self.selection) {
            let (dx, dy) = group.frame.offset();
            for i in group.members {
                self.objects[i].translate(dx, dy);
            }
        }
    }

    // ------------------------------------------------------------------
    // Deletion
    // ------------------------------------------------------------------

    /// Remove the selected object(s). No-op without a selection.
    pub fn delete_selection(&mut self) {
        let mut removed = match std::mem::take(&mut self.selection) {
            Selection::None => return,
            Selection::Single(index) => vec![index],
            Selection::Group(group) => group.members,
        };
        removed.sort_unstable_by(|a, b| b.cmp(a));
        for index in removed {
            self.objects.remove(index);
            self.events.push(EditorEvent::ObjectRemoved { index });
        }
        self.events.push(EditorEvent::SelectionChanged);
        self.create_savepoint();
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Snapshot the current document for undo. No-op during replay.
    pub fn create_savepoint(&mut self) {
        if self.history.replay_in_progress() {
            return;
        }
        let state = self.dump();
        self.history.record(state);
    }

    /// Step back one savepoint. No-op at the oldest snapshot.
    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.step_back() {
            self.load(&snapshot);
        }
    }

    /// Step forward one savepoint. No-op at "now".
    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.step_forward() {
            self.load(&snapshot);
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub(crate) fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub(crate) fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub(crate) fn clipboard_mut(&mut self) -> &mut Clipboard {
        &mut self.clipboard
    }

    pub(crate) fn measurer(&self) -> &dyn TextMeasurer {
        &*self.measurer
    }

    pub(crate) fn push_event(&mut self, event: EditorEvent) {
        self.events.push(event);
    }

    pub(crate) fn take_selection(&mut self) -> Selection {
        std::mem::take(&mut self.selection)
    }

    pub(crate) fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub(crate) fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub(crate) fn objects_mut(&mut self) -> &mut Vec<CanvasObject> {
        &mut self.objects
    }

    pub(crate) fn pending_background(&self) -> Option<&str> {
        self.pending_background.as_deref()
    }

    pub(crate) fn set_pending_background(&mut self, id: Option<String>) {
        self.pending_background = id;
    }

    // ------------------------------------------------------------------
    // Background replacement
    // ------------------------------------------------------------------

    /// Swap in a new rendered background, preserving every element's
    /// millimeter-space position by re-deriving pixel coordinates at the
    /// new scale (dump, swap, reload). The reloaded state becomes the
    /// new undo baseline and the document is marked dirty until saved.
    pub fn replace_background(&mut self, viewport: PageViewport, metrics: PageMetrics) {
        let records = self.dump();
        self.viewport = viewport;
        self.metrics = metrics;
        self.load(&records);
        self.history.reset();
        self.create_savepoint();
    }
}
