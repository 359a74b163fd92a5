//! Subcommands and the plumbing they share.

pub mod batch;
pub mod config;
pub mod feedback;
pub mod process;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use invex_core::models::{config_dir, InvexConfig};
use invex_core::{
    ChatCompletionsClient, DocumentAiClient, ExtractionPipeline, PdfTextExtractor,
    StructuredDocumentService, TextExtractionService, TextExtractor, Utf8TextExtractor,
};

/// `<config dir>/invex/config.json`.
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// The file given with `--config`, else the default file if it exists,
/// else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InvexConfig> {
    if let Some(path) = config_path {
        return InvexConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path, e));
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(InvexConfig::from_file(&path)?)
    } else {
        Ok(InvexConfig::default())
    }
}

/// Pick the text extractor by file extension.
pub fn text_extractor_for(path: &Path, config: &InvexConfig) -> anyhow::Result<Arc<dyn TextExtractor>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => Ok(Arc::new(PdfTextExtractor::from_config(&config.pdf))),
        "txt" => Ok(Arc::new(Utf8TextExtractor)),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

/// Remote backends built once per invocation and shared by every pipeline.
#[derive(Default)]
pub struct RemoteServices {
    llm: Option<Arc<dyn TextExtractionService>>,
    structured: Option<Arc<dyn StructuredDocumentService>>,
}

impl RemoteServices {
    /// Connect the tiers that are enabled. A tier whose credentials or
    /// endpoint are missing is skipped with a warning.
    pub fn from_config(config: &InvexConfig) -> Self {
        let mut services = Self::default();

        if config.extraction.enable_ai {
            match ChatCompletionsClient::from_config(&config.llm) {
                Ok(client) => services.llm = Some(Arc::new(client)),
                Err(e) => warn!("AI extraction disabled: {}", e),
            }
        }

        if config.extraction.enable_document_ai {
            match DocumentAiClient::from_config(&config.document_ai) {
                Ok(client) => services.structured = Some(Arc::new(client)),
                Err(e) => warn!("Document AI extraction disabled: {}", e),
            }
        }

        services
    }

    pub fn pipeline(&self, text_extractor: Arc<dyn TextExtractor>) -> ExtractionPipeline {
        let mut pipeline = ExtractionPipeline::new(text_extractor);
        if let Some(llm) = &self.llm {
            pipeline = pipeline.with_llm(Arc::clone(llm));
        }
        if let Some(structured) = &self.structured {
            pipeline = pipeline.with_structured(Arc::clone(structured));
        }
        pipeline
    }
}
