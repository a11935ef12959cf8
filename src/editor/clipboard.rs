//! Cut, copy, and paste over serialized records.
//!
//! The clipboard holds a dumped subset of the document, not live canvas
//! objects, so its contents survive deletion of the originals, undo, and
//! even a background replacement. Pasting reconstructs fresh objects
//! through the same path a document load uses.

use super::{EditorSession, PASTE_GROUP_POSITION, Selection};
use crate::editor::events::EditorEvent;
use crate::layout::LayoutRecord;

/// Serialized element records held for pasting.
#[derive(Debug, Default, Clone)]
pub struct Clipboard {
    records: Vec<LayoutRecord>,
}

impl Clipboard {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[LayoutRecord] {
        &self.records
    }

    pub fn set(&mut self, records: Vec<LayoutRecord>) {
        self.records = records;
    }
}

impl EditorSession {
    fn selected_indices(&self) -> Option<Vec<usize>> {
        match self.selection() {
            Selection::None => None,
            Selection::Single(index) => Some(vec![*index]),
            Selection::Group(group) => Some(group.members.clone()),
        }
    }

    /// Serialize the selection into the clipboard. No-op without a
    /// selection.
    pub fn copy(&mut self) {
        let Some(indices) = self.selected_indices() else {
            return;
        };
        self.history_mut().begin_replay();
        let records = self.dump_indices(&indices);
        self.clipboard_mut().set(records);
        self.history_mut().end_replay();
        self.create_savepoint();
    }

    /// Serialize the selection into the clipboard and remove the
    /// originals. No-op without a selection.
    pub fn cut(&mut self) {
        let Some(indices) = self.selected_indices() else {
            return;
        };
        self.history_mut().begin_replay();
        let records = self.dump_indices(&indices);
        self.clipboard_mut().set(records);

        self.take_selection();
        let mut removed = indices;
        removed.sort_unstable_by(|a, b| b.cmp(a));
        for index in removed {
            self.objects_mut().remove(index);
            self.push_event(EditorEvent::ObjectRemoved { index });
        }
        self.push_event(EditorEvent::SelectionChanged);
        self.history_mut().end_replay();
        self.create_savepoint();
    }

    /// Reconstruct the clipboard contents as new objects. A single
    /// record becomes the active selection in place; multiple records
    /// are grouped into a multi-select at a fixed offset position. No-op
    /// on an empty clipboard.
    pub fn paste(&mut self) {
        if self.clipboard().is_empty() {
            return;
        }
        self.history_mut().begin_replay();
        let records = self.clipboard().records().to_vec();

        self.clear_selection();
        let mut pasted = Vec::with_capacity(records.len());
        for record in &records {
            let index = self.insert_record(record);
            self.push_event(EditorEvent::ObjectAdded { index });
            pasted.push(index);
        }

        if pasted.len() > 1 {
            self.form_group(pasted, Some((PASTE_GROUP_POSITION, PASTE_GROUP_POSITION)));
        } else {
            self.set_selection(Selection::Single(pasted[0]));
            self.push_event(EditorEvent::SelectionChanged);
        }
        self.history_mut().end_replay();
        self.create_savepoint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BarcodeRecord, ContentKey};
    use crate::units::PageMetrics;
    use crate::variables::VariableRegistry;
    use crate::editor::{CanvasObject, PageViewport};
    use pretty_assertions::assert_eq;

    fn session() -> EditorSession {
        let metrics = PageMetrics::with_scale(2.0).unwrap();
        let viewport = PageViewport::new(1190.55, 1683.78);
        EditorSession::new(viewport, metrics, VariableRegistry::new())
    }

    /// Order-insensitive comparison: cut/paste may reorder elements.
    fn sorted_json(records: &[LayoutRecord]) -> Vec<String> {
        let mut out: Vec<String> = records
            .iter()
            .map(|r| serde_json::to_string(r).unwrap())
            .collect();
        out.sort();
        out
    }

    #[test]
    fn paste_on_empty_clipboard_is_a_no_op() {
        let mut s = session();
        let history_len = s.history().len();
        s.paste();
        assert_eq!(s.len(), 0);
        assert_eq!(s.history().len(), history_len);
    }

    #[test]
    fn copy_paste_duplicates_the_selection() {
        let mut s = session();
        let index = s.add_barcode_area(ContentKey::fixed("qrcode"));
        s.select(index);
        s.copy();
        s.paste();

        assert_eq!(s.len(), 2);
        let records = s.dump();
        match (&records[0], &records[1]) {
            (LayoutRecord::Barcodearea(a), LayoutRecord::Barcodearea(b)) => {
                assert_eq!(a, b);
            }
            other => panic!("unexpected records {:?}", other),
        }
        // The pasted object is the active selection.
        assert_eq!(*s.selection(), Selection::Single(1));
    }

    #[test]
    fn copy_does_not_modify_the_document() {
        let mut s = session();
        let index = s.add_text_field(ContentKey::Other);
        s.select(index);
        let before = s.dump();
        s.copy();
        assert_eq!(s.dump(), before);
    }

    #[test]
    fn cut_then_paste_restores_the_document() {
        let mut s = session();
        s.add_text_field(ContentKey::Other);
        let index = s.add_barcode_area(ContentKey::fixed("qrcode"));
        s.select(index);
        let before = s.dump();

        s.cut();
        assert_eq!(s.len(), 1);
        s.paste();

        assert_eq!(sorted_json(&s.dump()), sorted_json(&before));
    }

    #[test]
    fn cut_removes_all_group_members() {
        let mut s = session();
        let a = s.add_barcode_area(ContentKey::Other);
        let b = s.add_barcode_area(ContentKey::Other);
        if let CanvasObject::Barcode(o) = &mut s.objects_mut()[b] {
            o.left = 400.0;
        }
        s.select_group(&[a, b]);
        s.cut();
        assert_eq!(s.len(), 0);
        assert_eq!(s.clipboard().len(), 2);
    }

    #[test]
    fn multi_paste_forms_a_group_at_fixed_offset() {
        let mut s = session();
        let a = s.add_barcode_area(ContentKey::Other);
        let b = s.add_barcode_area(ContentKey::Other);
        if let CanvasObject::Barcode(o) = &mut s.objects_mut()[b] {
            o.left = 400.0;
            o.top = 400.0;
        }
        s.select_group(&[a, b]);
        s.copy();
        s.clear_selection();
        s.paste();

        assert_eq!(s.len(), 4);
        match s.selection() {
            Selection::Group(group) => {
                assert_eq!(group.members, vec![2, 3]);
                assert_eq!(group.frame.left, PASTE_GROUP_POSITION);
                assert_eq!(group.frame.top, PASTE_GROUP_POSITION);
            }
            other => panic!("expected group selection, got {:?}", other),
        }
    }

    #[test]
    fn pasted_group_members_keep_relative_layout() {
        let mut s = session();
        let a = s.add_barcode_area(ContentKey::Other);
        let b = s.add_barcode_area(ContentKey::Other);
        if let CanvasObject::Barcode(o) = &mut s.objects_mut()[b] {
            o.left = 300.0;
            o.top = 150.0;
        }
        s.select_group(&[a, b]);
        s.copy();
        s.clear_selection();
        s.paste();

        let records = s.dump();
        let lefts: Vec<f64> = records
            .iter()
            .map(|r| match r {
                LayoutRecord::Barcodearea(o) => o.left,
                _ => unreachable!(),
            })
            .collect();
        // Original pair spacing: 200 px; pasted pair must keep it.
        let spacing = s.metrics().px_to_mm(200.0);
        assert!((lefts[1] - lefts[0] - spacing).abs() <= 0.011);
        assert!((lefts[3] - lefts[2] - spacing).abs() <= 0.011);
    }

    #[test]
    fn clipboard_survives_undo() {
        let mut s = session();
        let index = s.add_barcode_area(ContentKey::Other);
        s.select(index);
        s.copy();
        s.undo(); // back to empty document
        assert_eq!(s.len(), 0);
        s.paste();
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn each_clipboard_operation_snapshots_once() {
        let mut s = session();
        let index = s.add_barcode_area(ContentKey::Other);
        s.select(index);

        let before = s.history().len();
        s.copy();
        assert_eq!(s.history().len(), before + 1);
        s.paste();
        assert_eq!(s.history().len(), before + 2);
    }

    #[test]
    fn clipboard_defaults_are_empty() {
        let c = Clipboard::default();
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert!(c.records().is_empty());

        let mut c = c;
        c.set(vec![LayoutRecord::Barcodearea(BarcodeRecord {
            left: 0.0,
            bottom: 0.0,
            size: 10.0,
            content: ContentKey::Other,
        })]);
        assert_eq!(c.len(), 1);
    }
}
