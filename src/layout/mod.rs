//! # Portable Layout Records
//!
//! The serialized document format: a flat JSON array of element records,
//! exchanged with the hosting application and stored server-side. All
//! measurements are millimeters (or points for font sizes) in PDF page
//! space with the origin at the page's bottom-left corner — the
//! representation is independent of the screen scale the editor happens
//! to render at.
//!
//! ```json
//! [
//!   {"type": "textarea", "left": "10.00", "bottom": "20.00",
//!    "fontsize": "13.0", "color": [0, 0, 0], "fontfamily": "Arial",
//!    "bold": false, "italic": false, "width": "50.00",
//!    "downward": false, "content": "other", "text": "Hello",
//!    "rotation": "0.0", "align": "left"},
//!   {"type": "barcodearea", "left": "5.00", "bottom": "5.00",
//!    "size": "30.00", "content": "qrcode"}
//! ]
//! ```

pub mod content;
mod serde_util;

pub use content::ContentKey;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LayoutError;

/// An RGB color triple, 0–255 per channel.
pub type Rgb = [u8; 3];

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

fn default_font_family() -> String {
    "Arial".to_string()
}

/// A placed text field.
///
/// `bottom` anchors the text's bottom edge by default; when `downward` is
/// set it anchors the top edge instead, so text grows downward from the
/// stored position. The flag changes the vertical coordinate transform on
/// both dump and load and must survive round trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRecord {
    /// Optional locale tag for the rendered text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Distance from the page's left edge, mm.
    #[serde(with = "serde_util::mm")]
    pub left: f64,
    /// Distance from the page's bottom edge, mm.
    #[serde(with = "serde_util::mm")]
    pub bottom: f64,
    /// Font size in points.
    #[serde(with = "serde_util::pt")]
    pub fontsize: f64,
    pub color: Rgb,
    #[serde(default = "default_font_family")]
    pub fontfamily: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    /// Wrap boundary, mm. Height is derived from text flow, never stored.
    #[serde(with = "serde_util::mm")]
    pub width: f64,
    #[serde(default)]
    pub downward: bool,
    pub content: ContentKey,
    /// Literal text, meaningful only when `content` is `other`.
    #[serde(default)]
    pub text: String,
    /// Rotation in degrees.
    #[serde(default, with = "serde_util::pt")]
    pub rotation: f64,
    #[serde(default)]
    pub align: Align,
}

/// A placed barcode/QR placeholder. Always square, never rotated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarcodeRecord {
    /// Distance from the page's left edge, mm.
    #[serde(with = "serde_util::mm")]
    pub left: f64,
    /// Distance from the page's bottom edge, mm.
    #[serde(with = "serde_util::mm")]
    pub bottom: f64,
    /// Edge length of the square, mm.
    #[serde(with = "serde_util::mm")]
    pub size: f64,
    pub content: ContentKey,
}

/// One element of a serialized layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutRecord {
    Textarea(TextRecord),
    Barcodearea(BarcodeRecord),
}

/// Legacy alias: some historical documents tag plain text fields as
/// `"text"` instead of `"textarea"`. Accepted on input, never emitted.
fn normalize_type(obj: &mut serde_json::Map<String, Value>) {
    if obj.get("type").and_then(Value::as_str) == Some("text") {
        obj.insert("type".into(), Value::String("textarea".into()));
    }
}

fn record_from_value(value: Value) -> Result<LayoutRecord, String> {
    let mut obj = match value {
        Value::Object(map) => map,
        other => return Err(format!("expected object, got {}", other)),
    };
    normalize_type(&mut obj);
    serde_json::from_value(Value::Object(obj)).map_err(|e| e.to_string())
}

/// Parse a layout JSON array leniently.
///
/// Records with an unrecognized `type` (or that otherwise fail to
/// deserialize) are skipped, so documents produced by newer editors with
/// unknown element kinds still load. Only a malformed outer array is an
/// error.
pub fn parse_records(json: &str) -> Result<Vec<LayoutRecord>, LayoutError> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    Ok(records_from_values(values))
}

/// Lenient per-record conversion from already-parsed JSON values.
pub fn records_from_values(values: Vec<Value>) -> Vec<LayoutRecord> {
    values
        .into_iter()
        .filter_map(|v| record_from_value(v).ok())
        .collect()
}

/// Parse a layout JSON array strictly.
///
/// The first record that fails to deserialize aborts the parse with an
/// index-tagged error. Used by tooling that wants to surface problems
/// rather than paper over them.
pub fn parse_records_strict(json: &str) -> Result<Vec<LayoutRecord>, LayoutError> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    values
        .into_iter()
        .enumerate()
        .map(|(index, v)| {
            record_from_value(v).map_err(|message| LayoutError::MalformedRecord { index, message })
        })
        .collect()
}

/// Round to the millimeter precision the wire format stores (2 decimals).
///
/// Dumps round before building records, so that a record compares equal
/// to its own dump-load round trip instead of differing by float noise.
pub fn round_mm(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Round to point/degree precision (1 decimal).
pub fn round_pt(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Serialize records to the wire format.
pub fn to_json(records: &[LayoutRecord]) -> Result<String, LayoutError> {
    Ok(serde_json::to_string(records)?)
}

/// Serialize records to indented JSON, for humans.
pub fn to_json_pretty(records: &[LayoutRecord]) -> Result<String, LayoutError> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_text_record() -> TextRecord {
        TextRecord {
            locale: None,
            left: 10.0,
            bottom: 20.0,
            fontsize: 13.0,
            color: [0, 0, 0],
            fontfamily: "Arial".into(),
            bold: false,
            italic: false,
            width: 50.0,
            downward: false,
            content: ContentKey::Other,
            text: "Hello".into(),
            rotation: 0.0,
            align: Align::Left,
        }
    }

    #[test]
    fn text_record_wire_shape() {
        let json = serde_json::to_string(&LayoutRecord::Textarea(sample_text_record())).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "textarea");
        assert_eq!(value["left"], "10.00");
        assert_eq!(value["bottom"], "20.00");
        assert_eq!(value["fontsize"], "13.0");
        assert_eq!(value["rotation"], "0.0");
        assert_eq!(value["content"], "other");
        assert_eq!(value["text"], "Hello");
        assert_eq!(value["color"], serde_json::json!([0, 0, 0]));
    }

    #[test]
    fn barcode_record_wire_shape() {
        let record = LayoutRecord::Barcodearea(BarcodeRecord {
            left: 5.0,
            bottom: 5.0,
            size: 30.0,
            content: ContentKey::fixed("qrcode"),
        });
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"type":"barcodearea","left":"5.00","bottom":"5.00","size":"30.00","content":"qrcode"}"#
        );
    }

    #[test]
    fn serde_round_trip() {
        let records = vec![
            LayoutRecord::Textarea(sample_text_record()),
            LayoutRecord::Barcodearea(BarcodeRecord {
                left: 5.0,
                bottom: 5.0,
                size: 30.0,
                content: ContentKey::fixed("qrcode"),
            }),
        ];
        let json = to_json(&records).unwrap();
        let parsed = parse_records(&json).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn accepts_bare_numbers() {
        let json = r#"[{"type": "textarea", "left": 10, "bottom": 20.5,
                        "fontsize": 13, "color": [255, 0, 0], "width": 50,
                        "content": "event_name"}]"#;
        let records = parse_records(json).unwrap();
        match &records[0] {
            LayoutRecord::Textarea(t) => {
                assert_eq!(t.left, 10.0);
                assert_eq!(t.bottom, 20.5);
                assert_eq!(t.fontfamily, "Arial");
                assert_eq!(t.content, ContentKey::fixed("event_name"));
                assert!(!t.downward);
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn lenient_parse_skips_unknown_types() {
        let json = r#"[{"type": "hologram", "left": "1.00"},
                       {"type": "barcodearea", "left": "5.00", "bottom": "5.00",
                        "size": "30.00", "content": "qrcode"}]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 1);
        assert!(matches!(records[0], LayoutRecord::Barcodearea(_)));
    }

    #[test]
    fn text_type_is_textarea_alias() {
        let json = r#"[{"type": "text", "left": "1.00", "bottom": "2.00",
                        "fontsize": "10.0", "color": [0, 0, 0], "width": "40.00",
                        "content": "other", "text": "aliased"}]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 1);
        match &records[0] {
            LayoutRecord::Textarea(t) => assert_eq!(t.text, "aliased"),
            other => panic!("unexpected record {:?}", other),
        }
        // Dumping it back emits the canonical tag.
        let json = to_json(&records).unwrap();
        assert!(json.contains(r#""type":"textarea""#));
    }

    #[test]
    fn strict_parse_reports_index() {
        let json = r#"[{"type": "barcodearea", "left": "5.00", "bottom": "5.00",
                        "size": "30.00", "content": "qrcode"},
                       {"type": "hologram"}]"#;
        match parse_records_strict(json) {
            Err(LayoutError::MalformedRecord { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn align_serializes_lowercase() {
        let mut record = sample_text_record();
        record.align = Align::Center;
        let json = serde_json::to_string(&LayoutRecord::Textarea(record)).unwrap();
        assert!(json.contains(r#""align":"center""#));
    }
}
