//! Payloads exchanged with the hosting application.
//!
//! The core never performs HTTP itself. It produces the save/preview
//! payload (the serialized layout plus the identifier of a freshly
//! uploaded background, if any) and interprets the host's JSON response.
//! A failed save leaves the document, history, and dirty flag untouched
//! so the user can retry without losing work.

use serde::{Deserialize, Serialize};

use crate::editor::EditorSession;
use crate::error::LayoutError;
use crate::layout::LayoutRecord;

/// The body of a save or preview request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavePayload {
    /// The serialized layout.
    pub data: Vec<LayoutRecord>,
    /// Identifier of a newly uploaded background to attach, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

/// The host's response to a save or background upload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaveResponse {
    /// "ok" on success; anything else is a failure.
    pub status: String,
    /// Failure detail, when the host provides one.
    #[serde(default)]
    pub error: Option<String>,
    /// Identifier of a stored background (upload responses).
    #[serde(default)]
    pub id: Option<String>,
    /// URL of a stored background (upload responses).
    #[serde(default)]
    pub url: Option<String>,
}

impl SaveResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

impl EditorSession {
    /// Build the payload for a save.
    pub fn save_payload(&self) -> SavePayload {
        SavePayload {
            data: self.dump(),
            background: self.pending_background().map(str::to_string),
        }
    }

    /// Build the payload for a server-side preview render. Same shape
    /// as a save; the host posts it to its preview endpoint instead.
    pub fn preview_payload(&self) -> SavePayload {
        self.save_payload()
    }

    /// Record the identifier of a background the host just uploaded.
    /// It rides along with the next save.
    pub fn set_uploaded_background(&mut self, id: impl Into<String>) {
        self.set_pending_background(Some(id.into()));
    }

    /// The background identifier pending attachment, if any.
    pub fn uploaded_background(&self) -> Option<&str> {
        self.pending_background()
    }

    /// Digest the host's save response.
    ///
    /// On success the session becomes clean and the pending background
    /// identifier is consumed. On failure nothing changes and the
    /// server's message is surfaced as an error.
    pub fn apply_save_response(&mut self, response: &SaveResponse) -> Result<(), LayoutError> {
        if response.is_ok() {
            self.history_mut().mark_clean();
            self.set_pending_background(None);
            Ok(())
        } else {
            Err(LayoutError::SaveFailed(
                response
                    .error
                    .clone()
                    .unwrap_or_else(|| "Saving failed.".to_string()),
            ))
        }
    }
}
