//! Data models shared by every extraction tier.

pub mod config;
pub mod document;

pub use config::{config_dir, DocumentAiConfig, ExtractionConfig, FeedbackConfig, InvexConfig, LlmConfig, PdfConfig};
pub use document::{
    DocumentData, DocumentField, ExtractionMethod, ExtractionResult, DEFAULT_CURRENCY, UNKNOWN,
    UNKNOWN_CLIENT,
};
