//! Error types for the invex-core library.

use thiserror::Error;

/// Main error type for the invex library.
#[derive(Error, Debug)]
pub enum InvexError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// OCR fallback failed for a page.
    #[error("OCR failed on page {page}: {reason}")]
    Ocr { page: u32, reason: String },
}

/// Errors raised by a single extraction tier.
///
/// None of these reach the caller of the pipeline: a failing tier only means
/// that tier contributes no candidate.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The remote service could not be reached or answered with an error.
    #[error("{service} request failed: {reason}")]
    Remote { service: String, reason: String },

    /// The remote service did not answer in time.
    #[error("{service} timed out after {secs}s")]
    Timeout { service: String, secs: u64 },

    /// The reply could not be understood.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The result is missing the minimum set of fields.
    #[error("result not viable: {0}")]
    NotViable(String),

    /// The result scored under the configured acceptance threshold.
    #[error("confidence {confidence} below threshold {threshold}")]
    BelowThreshold { confidence: u8, threshold: u8 },
}

/// Errors related to user feedback tracking.
#[derive(Error, Debug)]
pub enum FeedbackError {
    /// Rating outside the 1..=5 scale.
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    /// The feedback store could not be read or written.
    #[error("feedback storage: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for ExtractionError {
    fn from(err: reqwest::Error) -> Self {
        let service = err
            .url()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| "remote".to_string());
        ExtractionError::Remote {
            service,
            reason: err.to_string(),
        }
    }
}

/// Result type for the invex library.
pub type Result<T> = std::result::Result<T, InvexError>;
