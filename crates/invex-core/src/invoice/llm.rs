//! LLM tier: prompt a text-extraction service and score its reply.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ExtractionError;
use crate::models::document::today;
use crate::models::{
    DocumentData, ExtractionConfig, ExtractionMethod, ExtractionResult, DEFAULT_CURRENCY,
    UNKNOWN, UNKNOWN_CLIENT,
};
use crate::remote::{PromptVariant, TextExtractionService};

use super::normalize::{clean_text_field, clean_vat_number, is_greek_vat};
use super::rules::{clean_amount, normalize_date, parse_amount};

const BASE_CONFIDENCE: i32 = 85;
const MIN_CONFIDENCE: i32 = 50;
const MAX_CONFIDENCE: i32 = 95;

/// Field guesses as the service sends them. Values may be strings, numbers
/// or null.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawInvoiceFields {
    vat_number: Value,
    client_name: Value,
    #[serde(alias = "supplier")]
    issuer: Value,
    date: Value,
    document_number: Value,
    amount: Value,
    currency: Value,
}

/// A field value, or `None` for null, empty or the literal `"unknown"`.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => clean_text_field(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Cut the outermost JSON object out of a reply that may carry markdown
/// fences or reasoning text around it.
fn json_object(reply: &str) -> Result<&str, ExtractionError> {
    let start = reply
        .find('{')
        .ok_or_else(|| ExtractionError::MalformedResponse("no '{' in reply".to_string()))?;
    let end = reply
        .rfind('}')
        .ok_or_else(|| ExtractionError::MalformedResponse("no '}' in reply".to_string()))?;
    if end <= start {
        return Err(ExtractionError::MalformedResponse(
            "unbalanced JSON in reply".to_string(),
        ));
    }
    Ok(&reply[start..=end])
}

fn parse_reply(reply: &str) -> Result<RawInvoiceFields, ExtractionError> {
    let json = json_object(reply)?;
    serde_json::from_str(json)
        .map_err(|e| ExtractionError::MalformedResponse(format!("{e}: {json}")))
}

/// Adapter that turns a [`TextExtractionService`] reply into a scored
/// candidate.
pub struct LlmExtractor {
    service: Arc<dyn TextExtractionService>,
}

impl LlmExtractor {
    pub fn new(service: Arc<dyn TextExtractionService>) -> Self {
        Self { service }
    }

    /// Run the service on `text` within the configured timeout.
    ///
    /// Fails when the call fails, the reply cannot be parsed, or the result
    /// lacks a VAT number, document number or issuer.
    pub async fn extract(
        &self,
        text: &str,
        is_greek: bool,
        config: &ExtractionConfig,
    ) -> Result<ExtractionResult, ExtractionError> {
        let variant = PromptVariant::for_language(is_greek);
        let secs = config.remote_timeout_secs;

        let reply = tokio::time::timeout(
            Duration::from_secs(secs),
            self.service.extract_fields(text, variant),
        )
        .await
        .map_err(|_| ExtractionError::Timeout {
            service: self.service.name().to_string(),
            secs,
        })??;

        let raw = parse_reply(&reply)?;
        let result = score(raw, is_greek, config.prefer_greek_extraction)?;
        debug!(
            service = self.service.name(),
            confidence = result.confidence,
            "LLM result accepted"
        );
        Ok(result)
    }
}

fn score(
    raw: RawInvoiceFields,
    is_greek: bool,
    prefer_greek: bool,
) -> Result<ExtractionResult, ExtractionError> {
    let vat_number = clean_vat_number(&field_text(&raw.vat_number).unwrap_or_default());
    if vat_number == UNKNOWN {
        return Err(ExtractionError::NotViable("no VAT number".to_string()));
    }
    let document_number = field_text(&raw.document_number)
        .ok_or_else(|| ExtractionError::NotViable("no document number".to_string()))?;
    let supplier = field_text(&raw.issuer)
        .ok_or_else(|| ExtractionError::NotViable("no issuer".to_string()))?;

    let date = field_text(&raw.date).map(|d| normalize_date(&d));
    let amount = field_text(&raw.amount).and_then(|a| parse_amount(&clean_amount(&a)));

    let mut confidence = BASE_CONFIDENCE;
    if is_greek_vat(&vat_number) {
        confidence += 5;
    }
    if date.is_some() {
        confidence += 3;
    }
    if amount.is_some() {
        confidence += 3;
    }
    if is_greek {
        confidence += if prefer_greek { 5 } else { -5 };
    }
    let confidence = confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) as u8;

    let data = DocumentData {
        vat_number,
        client_name: field_text(&raw.client_name).unwrap_or_else(|| UNKNOWN_CLIENT.to_string()),
        supplier,
        document_number,
        date: date.unwrap_or_else(today),
        amount: amount.unwrap_or(Decimal::ZERO),
        currency: field_text(&raw.currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
    };
    Ok(ExtractionResult::new(data, confidence, ExtractionMethod::Gpt))
}
