//! Invoice field extraction: rule tables, remote tiers and ranking.

pub mod cache;
pub mod language;
pub mod llm;
pub mod normalize;
pub mod pattern;
pub mod pipeline;
pub mod rules;
pub mod structured;

pub use cache::{fingerprint, ResultCache};
pub use language::contains_greek;
pub use llm::LlmExtractor;
pub use normalize::{clean_text_field, clean_vat_number, is_greek_vat};
pub use pattern::{looks_like_invoice, PatternExtractor};
pub use pipeline::{ExtractionPipeline, PipelineOutcome};
pub use structured::StructuredExtractor;
