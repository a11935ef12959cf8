//! Live canvas objects: the scale-dependent pixel-space cache.
//!
//! These are the objects the host UI draws and the user drags around.
//! They are derived from [`crate::layout::LayoutRecord`]s at load time and
//! converted back at dump time; they are never the source of truth for
//! persistence. Coordinates are screen pixels with the origin at the
//! page's top-left corner.

use crate::layout::{Align, ContentKey, Rgb};

/// Which resize handles the host UI should offer for an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Side-middle handles plus rotation only: width is explicit, height
    /// follows text flow.
    WidthOnly,
    /// Any handle resizes both dimensions together, keeping the object
    /// square; the rotation handle is hidden.
    UniformSquare,
}

/// A live text field.
#[derive(Debug, Clone, PartialEq)]
pub struct TextObject {
    pub left: f64,
    pub top: f64,
    /// Wrap boundary in pixels.
    pub width: f64,
    /// Font size in pixels.
    pub font_size: f64,
    pub font_family: String,
    pub bold: bool,
    pub italic: bool,
    pub color: Rgb,
    pub align: Align,
    pub content: ContentKey,
    /// The text currently shown on canvas: literal text for `other`
    /// content, a sample value otherwise.
    pub text: String,
    /// Rotation in degrees around the object's origin.
    pub rotation: f64,
    /// When set, `top` is the text's visual top edge and text grows
    /// downward from it.
    pub downward: bool,
}

/// A live barcode/QR placeholder. Always square.
#[derive(Debug, Clone, PartialEq)]
pub struct BarcodeObject {
    pub left: f64,
    pub top: f64,
    /// Edge length in pixels.
    pub size: f64,
    pub content: ContentKey,
}

/// The closed set of object kinds the canvas can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasObject {
    Text(TextObject),
    Barcode(BarcodeObject),
}

impl CanvasObject {
    pub fn left(&self) -> f64 {
        match self {
            CanvasObject::Text(o) => o.left,
            CanvasObject::Barcode(o) => o.left,
        }
    }

    pub fn top(&self) -> f64 {
        match self {
            CanvasObject::Text(o) => o.top,
            CanvasObject::Barcode(o) => o.top,
        }
    }

    pub fn set_position(&mut self, left: f64, top: f64) {
        match self {
            CanvasObject::Text(o) => {
                o.left = left;
                o.top = top;
            }
            CanvasObject::Barcode(o) => {
                o.left = left;
                o.top = top;
            }
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        let (left, top) = (self.left() + dx, self.top() + dy);
        self.set_position(left, top);
    }

    pub fn width(&self) -> f64 {
        match self {
            CanvasObject::Text(o) => o.width,
            CanvasObject::Barcode(o) => o.size,
        }
    }

    pub fn height(&self, measurer: &dyn TextMeasurer) -> f64 {
        match self {
            CanvasObject::Text(o) => measurer.wrapped_height(&o.text, o.font_size, o.width),
            CanvasObject::Barcode(o) => o.size,
        }
    }

    pub fn resize_policy(&self) -> ResizePolicy {
        match self {
            CanvasObject::Text(_) => ResizePolicy::WidthOnly,
            CanvasObject::Barcode(_) => ResizePolicy::UniformSquare,
        }
    }

    /// Barcode areas never rotate.
    pub fn rotation_locked(&self) -> bool {
        matches!(self, CanvasObject::Barcode(_))
    }

    pub fn content(&self) -> &ContentKey {
        match self {
            CanvasObject::Text(o) => &o.content,
            CanvasObject::Barcode(o) => &o.content,
        }
    }

    /// Whether this text field anchors downward. Barcodes never do.
    pub fn downward(&self) -> bool {
        match self {
            CanvasObject::Text(o) => o.downward,
            CanvasObject::Barcode(_) => false,
        }
    }
}

/// Measures wrapped text height in pixels.
///
/// Browser hosts measure text with the canvas font engine; the core
/// keeps that concern behind a trait so such hosts can plug in exact
/// metrics. Everything else uses [`HeuristicMeasurer`]. Whatever
/// implementation is used must be deterministic, or dump/load round
/// trips drift.
pub trait TextMeasurer {
    /// Height in pixels of `text` wrapped into `width` pixels at
    /// `font_size` pixels, at line height 1.0.
    fn wrapped_height(&self, text: &str, font_size: f64, width: f64) -> f64;
}

/// Character-count approximation of canvas text metrics.
///
/// Assumes an average glyph advance of 0.6 em. Good enough for layout
/// editing; the final print renderer re-wraps with real font metrics
/// anyway.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicMeasurer;

/// Average glyph advance as a fraction of the font size.
const AVERAGE_ADVANCE_EM: f64 = 0.6;

impl TextMeasurer for HeuristicMeasurer {
    fn wrapped_height(&self, text: &str, font_size: f64, width: f64) -> f64 {
        if font_size <= 0.0 {
            return 0.0;
        }
        let advance = font_size * AVERAGE_ADVANCE_EM;
        let chars_per_line = if advance > 0.0 && width > 0.0 {
            (width / advance).floor().max(1.0) as usize
        } else {
            1
        };

        let mut lines = 0usize;
        for raw_line in text.split('\n') {
            let chars = raw_line.chars().count();
            lines += chars.div_ceil(chars_per_line).max(1);
        }
        lines.max(1) as f64 * font_size
    }
}

/// The bounding frame of an active multi-select group.
///
/// Members of a group store coordinates relative to the group's center;
/// their absolute position is `relative + frame corner + half the frame
/// size`. Moving the frame moves every member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupFrame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl GroupFrame {
    /// The offset added to a member's relative coordinates to get its
    /// absolute position.
    pub fn offset(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_one_line_high() {
        let m = HeuristicMeasurer;
        assert_eq!(m.wrapped_height("", 13.0, 100.0), 13.0);
    }

    #[test]
    fn long_text_wraps() {
        let m = HeuristicMeasurer;
        // 13px font, advance 7.8px, 100px wide -> 12 chars per line.
        let one = m.wrapped_height("short", 13.0, 100.0);
        let many = m.wrapped_height(&"x".repeat(40), 13.0, 100.0);
        assert_eq!(one, 13.0);
        assert!(many > one);
        assert_eq!(many % 13.0, 0.0);
    }

    #[test]
    fn newlines_force_lines() {
        let m = HeuristicMeasurer;
        assert_eq!(m.wrapped_height("a\nb\nc", 10.0, 100.0), 30.0);
    }

    #[test]
    fn group_offset_is_center() {
        let frame = GroupFrame {
            left: 100.0,
            top: 50.0,
            width: 40.0,
            height: 20.0,
        };
        assert_eq!(frame.offset(), (120.0, 60.0));
    }

    #[test]
    fn barcode_height_is_its_size() {
        let o = CanvasObject::Barcode(BarcodeObject {
            left: 0.0,
            top: 0.0,
            size: 42.0,
            content: ContentKey::Other,
        });
        assert_eq!(o.height(&HeuristicMeasurer), 42.0);
        assert_eq!(o.resize_policy(), ResizePolicy::UniformSquare);
        assert!(o.rotation_locked());
    }
}
