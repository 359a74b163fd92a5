//! Core library for invoice data extraction.
//!
//! This crate provides:
//! - PDF text extraction with an OCR hook for scanned pages
//! - Greek-aware rule tables for VAT number, parties, date, number, total and currency
//! - Adapters for remote LLM and structured-document extraction services
//! - A pipeline that runs every tier and keeps the most confident result
//! - A feedback tracker that aggregates user ratings per extraction method

pub mod error;
pub mod feedback;
pub mod invoice;
pub mod models;
pub mod pdf;
pub mod remote;

pub use error::{ExtractionError, FeedbackError, InvexError, PdfError, Result};
pub use feedback::{FeedbackEntry, FeedbackTracker, MethodMetrics};
pub use invoice::{
    looks_like_invoice, ExtractionPipeline, PatternExtractor, PipelineOutcome, ResultCache,
};
pub use models::{
    DocumentData, DocumentField, ExtractionConfig, ExtractionMethod, ExtractionResult, InvexConfig,
};
pub use pdf::{PageRecognizer, PdfTextExtractor, TextExtractor, Utf8TextExtractor};
pub use remote::{
    ChatCompletionsClient, DocumentAiClient, PromptVariant, StructuredDocumentService,
    TextExtractionService,
};
