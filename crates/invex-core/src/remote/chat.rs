//! OpenAI-compatible `/chat/completions` client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{PromptVariant, TextExtractionService};
use crate::error::{ExtractionError, InvexError};
use crate::invoice::language::sample;
use crate::models::LlmConfig;

const SERVICE: &str = "chat-completions";

const STANDARD_PROMPT: &str = r#"You are an invoice data extraction assistant.
Given raw text extracted from a PDF invoice or receipt, return ONLY a JSON object:
{
  "vatNumber": "tax ID of the issuer",
  "clientName": "name of the recipient",
  "issuer": "name of the company that issued the document",
  "date": "issue date as YYYY-MM-DD",
  "documentNumber": "invoice or receipt number",
  "amount": "grand total as a number",
  "currency": "currency symbol or ISO code"
}
Use the string "unknown" for any field you cannot determine.
Return only the JSON object, no markdown fences, no commentary."#;

const GREEK_PROMPT: &str = r#"You are an assistant that extracts data from Greek invoices and receipts (τιμολόγια, αποδείξεις).
The text may mix Greek and Latin characters. Labels to look for:
- ΑΦΜ / Α.Φ.Μ. is the 9-digit Greek VAT number of the issuer (not the customer).
- ΕΚΔΟΤΗΣ / ΠΩΛΗΤΗΣ is the issuer, ΠΕΛΑΤΗΣ / ΛΗΠΤΗΣ / ΠΡΟΣ is the client.
- ΑΡΙΘΜΟΣ / ΑΡ. ΤΙΜ. / Α/Α is the document number.
- ΗΜΕΡΟΜΗΝΙΑ is the date, written day first (DD/MM/YYYY).
- ΣΥΝΟΛΟ / ΠΛΗΡΩΤΕΟ is the grand total; Greek amounts use a comma as decimal separator.
Return ONLY a JSON object:
{
  "vatNumber": "9 digits",
  "clientName": "recipient",
  "issuer": "issuer",
  "date": "YYYY-MM-DD",
  "documentNumber": "number",
  "amount": "grand total as a number with a dot as decimal separator",
  "currency": "€ unless another currency is stated"
}
Use the string "unknown" for any field you cannot determine.
Return only the JSON object, no markdown fences, no commentary."#;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Text-extraction service backed by a chat-completions endpoint.
pub struct ChatCompletionsClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f64,
    max_chars: usize,
}

impl ChatCompletionsClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        let defaults = LlmConfig::default();
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
            temperature: defaults.temperature,
            max_chars: defaults.max_chars,
        }
    }

    /// Build from configuration, reading the key from `config.api_key_env`.
    pub fn from_config(config: &LlmConfig) -> Result<Self, InvexError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            InvexError::Config(format!(
                "{} env var required for AI extraction",
                config.api_key_env
            ))
        })?;
        info!(url = %config.base_url, model = %config.model, "using chat-completions backend");

        Ok(Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
            max_chars: config.max_chars,
        })
    }

    fn build_request<'a>(&'a self, text: &str, variant: PromptVariant) -> ChatRequest<'a> {
        let system = match variant {
            PromptVariant::Greek => GREEK_PROMPT,
            PromptVariant::Standard => STANDARD_PROMPT,
        };
        let text = sample(text, self.max_chars);

        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("Extract invoice data from the following PDF text:\n\n{text}"),
                },
            ],
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl TextExtractionService for ChatCompletionsClient {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn extract_fields(
        &self,
        text: &str,
        variant: PromptVariant,
    ) -> Result<String, ExtractionError> {
        let request = self.build_request(text, variant);
        let url = format!("{}/chat/completions", self.base_url);
        debug!(%url, ?variant, "sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Remote {
                service: SERVICE.to_string(),
                reason: format!("API error {status}: {body}"),
            });
        }

        let chat: ChatResponse = response.json().await?;
        chat.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ExtractionError::MalformedResponse("empty choices".to_string()))
    }
}
