//! Contracts for the remote extraction services, plus HTTP clients.
//!
//! The pipeline only talks to these traits, so tests swap in in-process
//! mocks and deployments can point at any compatible endpoint.

pub mod chat;
pub mod document_ai;

pub use chat::ChatCompletionsClient;
pub use document_ai::DocumentAiClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Which instruction set the text-extraction service receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptVariant {
    /// Tuned for Greek invoices (ΑΦΜ, Greek labels, Greek dates).
    Greek,
    /// Generic invoice prompt.
    Standard,
}

impl PromptVariant {
    pub fn for_language(is_greek: bool) -> Self {
        if is_greek {
            PromptVariant::Greek
        } else {
            PromptVariant::Standard
        }
    }
}

/// A remote service that reads invoice text and answers with a JSON object
/// holding `vatNumber`, `clientName`, `issuer`, `date`, `documentNumber`,
/// `amount` and `currency`, using the literal `"unknown"` for missing fields.
#[async_trait]
pub trait TextExtractionService: Send + Sync {
    /// Service name used in logs and errors.
    fn name(&self) -> &str;

    /// Send the text and return the raw reply body.
    async fn extract_fields(
        &self,
        text: &str,
        variant: PromptVariant,
    ) -> Result<String, ExtractionError>;
}

/// One labeled value recognized by a structured-document service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEntity {
    #[serde(alias = "type")]
    pub label: String,
    #[serde(alias = "mentionText")]
    pub value: String,
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl DocumentEntity {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            confidence: None,
        }
    }
}

/// Reply of a structured-document service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Full recognized text.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub entities: Vec<DocumentEntity>,
}

/// A remote service that analyzes raw PDF bytes into labeled entities.
#[async_trait]
pub trait StructuredDocumentService: Send + Sync {
    /// Service name used in logs and errors.
    fn name(&self) -> &str;

    async fn analyze(&self, bytes: &[u8]) -> Result<StructuredDocument, ExtractionError>;
}
