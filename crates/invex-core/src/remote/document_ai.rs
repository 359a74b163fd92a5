//! Structured-document (Document AI style) HTTP client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{StructuredDocument, StructuredDocumentService};
use crate::error::{ExtractionError, InvexError};
use crate::models::DocumentAiConfig;

const SERVICE: &str = "document-ai";

/// Replies come either bare or wrapped in a `document` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnalyzeReply {
    Wrapped { document: StructuredDocument },
    Bare(StructuredDocument),
}

impl From<AnalyzeReply> for StructuredDocument {
    fn from(reply: AnalyzeReply) -> Self {
        match reply {
            AnalyzeReply::Wrapped { document } => document,
            AnalyzeReply::Bare(document) => document,
        }
    }
}

/// Posts raw PDF bytes to a processing endpoint.
pub struct DocumentAiClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl DocumentAiClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    /// Build from configuration; the endpoint is required, the key optional.
    pub fn from_config(config: &DocumentAiConfig) -> Result<Self, InvexError> {
        let endpoint = config.endpoint.clone().ok_or_else(|| {
            InvexError::Config("document_ai.endpoint is not set".to_string())
        })?;
        let api_key = match &config.api_key_env {
            Some(var) => Some(std::env::var(var).map_err(|_| {
                InvexError::Config(format!("{var} env var required for Document AI"))
            })?),
            None => None,
        };
        Ok(Self::new(endpoint, api_key))
    }
}

#[async_trait]
impl StructuredDocumentService for DocumentAiClient {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn analyze(&self, bytes: &[u8]) -> Result<StructuredDocument, ExtractionError> {
        debug!(endpoint = %self.endpoint, size = bytes.len(), "sending document for analysis");

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/pdf")
            .body(bytes.to_vec());
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Remote {
                service: SERVICE.to_string(),
                reason: format!("processing failed ({status}): {body}"),
            });
        }

        let body = response.text().await?;
        parse_reply(&body)
    }
}

fn parse_reply(body: &str) -> Result<StructuredDocument, ExtractionError> {
    serde_json::from_str::<AnalyzeReply>(body)
        .map(StructuredDocument::from)
        .map_err(|e| ExtractionError::MalformedResponse(format!("{SERVICE}: {e}")))
}
