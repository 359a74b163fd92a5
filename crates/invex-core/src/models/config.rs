//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Per-user invex directory: `<config dir>/invex`, or `./invex` when the
/// platform has no config directory.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("invex")
}

/// Main configuration for invex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvexConfig {
    /// Extraction tier switches and scoring knobs.
    pub extraction: ExtractionConfig,

    /// PDF text extraction configuration.
    pub pdf: PdfConfig,

    /// Remote LLM endpoint.
    pub llm: LlmConfig,

    /// Remote structured-document endpoint.
    pub document_ai: DocumentAiConfig,

    /// User feedback storage.
    pub feedback: FeedbackConfig,
}

/// Settings read by the orchestrator on every call.
///
/// The aliases accept the camelCase keys of the application settings blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Run the remote LLM tier.
    #[serde(alias = "enableAI")]
    pub enable_ai: bool,

    /// Run the remote structured-document tier.
    #[serde(alias = "enableDocumentAI")]
    pub enable_document_ai: bool,

    /// Reward LLM results on Greek documents (penalize when disabled).
    #[serde(alias = "preferGreekExtraction")]
    pub prefer_greek_extraction: bool,

    /// Run the structured-document tier first on Greek documents.
    #[serde(alias = "documentAIPreferredForGreek")]
    pub document_ai_preferred_for_greek: bool,

    /// Refuse documents that do not look like invoices (CLI gate).
    #[serde(alias = "strictInvoiceCheck")]
    pub strict_invoice_check: bool,

    /// Remote results scoring below this are discarded.
    #[serde(alias = "aiConfidenceThreshold")]
    pub ai_confidence_threshold: u8,

    /// Upper bound for a single remote call.
    pub remote_timeout_secs: u64,

    /// Number of leading characters sampled for language detection.
    pub language_sample_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            enable_ai: true,
            enable_document_ai: false,
            prefer_greek_extraction: true,
            document_ai_preferred_for_greek: true,
            strict_invoice_check: true,
            ai_confidence_threshold: 70,
            remote_timeout_secs: 30,
            language_sample_chars: 1000,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Below this many characters of native text, OCR is attempted.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 100,
        }
    }
}

/// OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL, without the `/chat/completions` suffix.
    pub base_url: String,

    /// Model name sent with every request.
    pub model: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Input text is truncated to this many characters.
    pub max_chars: usize,

    /// Sampling temperature.
    pub temperature: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            max_chars: 12_000,
            temperature: 0.0,
        }
    }
}

/// Structured-document extraction endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentAiConfig {
    /// Full URL that accepts `application/pdf` bodies.
    pub endpoint: Option<String>,

    /// Environment variable holding the bearer token.
    pub api_key_env: Option<String>,
}

/// Feedback store location and retention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// JSON file holding the feedback log and counters.
    pub path: PathBuf,

    /// Size of the rolling feedback log.
    pub max_entries: usize,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            path: config_dir().join("feedback.json"),
            max_entries: 50,
        }
    }
}

impl InvexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file, creating its directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
