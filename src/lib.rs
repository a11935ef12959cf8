//! # Gafete - Badge & Ticket Layout Editor Core
//!
//! Gafete is the document core of a visual editor that places printable
//! elements (text fields and barcode/QR placeholders) on top of a
//! rendered PDF background page. It owns the layout model: the
//! bidirectional mapping between physical print units and on-screen
//! pixels, the portable JSON document format, snapshot-based undo/redo,
//! and the clipboard. Rendering, file upload, and HTTP belong to the
//! hosting application.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gafete::editor::{EditorSession, PageViewport};
//! use gafete::layout::ContentKey;
//! use gafete::units::PageMetrics;
//! use gafete::variables::VariableRegistry;
//!
//! // The host rendered the PDF page at scale 2 into a 1191x1684 canvas.
//! let metrics = PageMetrics::with_scale(2.0)?;
//! let viewport = PageViewport::new(1190.55, 1683.78);
//! let variables = VariableRegistry::new()
//!     .with("event_name", "Event name", "Redacted Conf 2026");
//!
//! let mut session = EditorSession::new(viewport, metrics, variables);
//!
//! // Place elements, edit, undo.
//! let field = session.add_text_field(ContentKey::fixed("event_name"));
//! session.select(field);
//! session.set_position_mm(10.0, 20.0);
//! session.undo();
//!
//! // Persist: millimeter-space records, independent of the screen scale.
//! let json = gafete::layout::to_json(&session.dump())?;
//!
//! # Ok::<(), gafete::LayoutError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`units`] | Pixel / millimeter / point conversion |
//! | [`layout`] | Portable layout records and JSON parsing |
//! | [`editor`] | Live editing session: factory, selection, history, clipboard |
//! | [`variables`] | Host-supplied placeholder variables and samples |
//! | [`transfer`] | Save/preview payloads exchanged with the host |
//! | [`error`] | Error types |

pub mod editor;
pub mod error;
pub mod layout;
pub mod transfer;
pub mod units;
pub mod variables;

// Re-exports for convenience
pub use editor::EditorSession;
pub use error::LayoutError;
pub use units::PageMetrics;
