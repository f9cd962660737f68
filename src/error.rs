//! Error types for table extraction.
//!
//! Geometric problems in the input (degenerate or non-finite rulings, pages
//! without a ruling grid) are resolved locally by the extraction stages and
//! never surface here. Only collaborator failures, invalid caller input and
//! output I/O cross the crate boundary as errors.

/// Result type alias for table extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting or writing tables.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page-decoding collaborator failed (unreadable or encrypted source, ...).
    ///
    /// Propagated unchanged; extraction never retries or masks it.
    #[error(
        "Decoder failure{}: {message}",
        page.map(|p| format!(" on page {}", p)).unwrap_or_default()
    )]
    Decoder {
        /// Page being decoded when the failure happened, if known
        page: Option<u32>,
        /// Collaborator-provided description
        message: String,
    },

    /// Requested page does not exist in the source
    #[error("Page {page} out of range (document has {count} pages)")]
    PageOutOfRange {
        /// Requested 1-based page number
        page: u32,
        /// Number of pages in the source
        count: usize,
    },

    /// Crop area is not a usable rectangle
    #[error("Invalid area: {0}")]
    InvalidArea(String),

    /// Configuration value outside its domain
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unknown output format token
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV/TSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Build a decoder failure for a specific page.
    pub fn decoder(page: u32, message: impl Into<String>) -> Self {
        Error::Decoder {
            page: Some(page),
            message: message.into(),
        }
    }

    /// Build a decoder failure not tied to a page (e.g. document open).
    pub fn decoder_global(message: impl Into<String>) -> Self {
        Error::Decoder {
            page: None,
            message: message.into(),
        }
    }
}
