//! # Error Types
//!
//! This module defines error types used throughout the gafete library.

use thiserror::Error;

/// Main error type for gafete operations
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Page metrics that cannot support unit conversion (zero or negative scale)
    #[error("Invalid page metrics: {0}")]
    InvalidPageMetrics(String),

    /// A layout record that failed strict validation
    #[error("Malformed layout record at index {index}: {message}")]
    MalformedRecord { index: usize, message: String },

    /// The hosting application rejected a save
    #[error("Saving failed: {0}")]
    SaveFailed(String),

    /// JSON error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
