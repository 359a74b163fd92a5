//! Rule-based baseline tier.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::document::today;
use crate::models::{DocumentData, ExtractionMethod, ExtractionResult, UNKNOWN, UNKNOWN_CLIENT};

use super::rules::patterns::INVOICE_KEYWORDS;
use super::rules::{
    extract_amount, extract_client_name, extract_currency, extract_date, extract_document_number,
    extract_issuer, extract_vat_number, parse_amount,
};

/// Confidence of a pattern result that found a VAT number.
pub const CONFIDENCE_WITH_VAT: u8 = 65;

/// Confidence of a pattern result without a VAT number.
pub const CONFIDENCE_WITHOUT_VAT: u8 = 40;

/// Composes the per-field rule extractors into a complete record.
///
/// Never fails: any field the rules miss gets its sentinel.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl PatternExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract every field from plain text.
    pub fn extract(&self, text: &str) -> DocumentData {
        let amount = extract_amount(text)
            .and_then(|a| parse_amount(&a))
            .unwrap_or(Decimal::ZERO);

        let data = DocumentData {
            vat_number: extract_vat_number(text).unwrap_or_else(|| UNKNOWN.to_string()),
            client_name: extract_client_name(text).unwrap_or_else(|| UNKNOWN_CLIENT.to_string()),
            supplier: extract_issuer(text).unwrap_or_else(|| UNKNOWN.to_string()),
            document_number: extract_document_number(text)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            date: extract_date(text).unwrap_or_else(today),
            amount,
            currency: extract_currency(text),
        };

        debug!(
            vat = data.vat_number.as_str(),
            number = data.document_number.as_str(),
            "pattern extraction done"
        );
        data
    }

    /// Extract and score: 65 when a VAT number was found, 40 otherwise.
    pub fn extract_scored(&self, text: &str) -> ExtractionResult {
        let data = self.extract(text);
        let confidence = if data.vat_number != UNKNOWN {
            CONFIDENCE_WITH_VAT
        } else {
            CONFIDENCE_WITHOUT_VAT
        };
        ExtractionResult::new(data, confidence, ExtractionMethod::Pattern)
    }
}

/// Whether the text carries any invoice / receipt vocabulary.
pub fn looks_like_invoice(text: &str) -> bool {
    INVOICE_KEYWORDS.is_match(text)
}
