//! Structured-document tier: map recognized entities onto a record.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::error::ExtractionError;
use crate::models::document::today;
use crate::models::{
    DocumentData, DocumentField, ExtractionConfig, ExtractionMethod, ExtractionResult,
    DEFAULT_CURRENCY, UNKNOWN, UNKNOWN_CLIENT,
};
use crate::remote::{DocumentEntity, StructuredDocument, StructuredDocumentService};

use super::language::contains_greek;
use super::normalize::{clean_text_field, clean_vat_number};
use super::rules::{clean_amount, normalize_date, parse_amount};

const BASE_CONFIDENCE: u8 = 75;
const GREEK_PREFERRED_CONFIDENCE: u8 = 90;
const GREEK_CONFIDENCE: u8 = 85;

/// Entity labels per field, compared after uppercasing and dropping
/// everything that is not a letter or digit.
const LABEL_ALIASES: &[(DocumentField, &[&str])] = &[
    (
        DocumentField::VatNumber,
        &["VATNUMBER", "VAT", "VATID", "ΑΦΜ", "AFM", "TIN", "TAXID", "SUPPLIERTAXID"],
    ),
    (
        DocumentField::ClientName,
        &["CLIENTNAME", "CLIENT", "CUSTOMER", "CUSTOMERNAME", "RECEIVERNAME", "BUYER", "ΠΕΛΑΤΗΣ"],
    ),
    (
        DocumentField::Supplier,
        &["SUPPLIER", "SUPPLIERNAME", "ISSUER", "VENDOR", "SELLER", "ΕΚΔΟΤΗΣ"],
    ),
    (
        DocumentField::DocumentNumber,
        &["DOCUMENTNUMBER", "INVOICEID", "INVOICENUMBER", "RECEIPTNUMBER", "ΑΡΙΘΜΟΣ"],
    ),
    (
        DocumentField::Date,
        &["DATE", "INVOICEDATE", "ISSUEDATE", "ΗΜΕΡΟΜΗΝΙΑ"],
    ),
    (
        DocumentField::Amount,
        &["AMOUNT", "TOTAL", "TOTALAMOUNT", "GRANDTOTAL", "ΣΥΝΟΛΟ"],
    ),
    (DocumentField::Currency, &["CURRENCY", "CURRENCYCODE", "ΝΟΜΙΣΜΑ"]),
];

fn label_key(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_uppercase)
        .collect()
}

fn field_for(label: &str) -> Option<DocumentField> {
    let key = label_key(label);
    LABEL_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.contains(&key.as_str()))
        .map(|(field, _)| *field)
}

/// First usable value per field, in entity order.
fn entity_value(entities: &[DocumentEntity], field: DocumentField) -> Option<String> {
    entities
        .iter()
        .filter(|e| field_for(&e.label) == Some(field))
        .find_map(|e| clean_text_field(&e.value))
}

/// Adapter that turns a [`StructuredDocumentService`] reply into a scored
/// candidate.
pub struct StructuredExtractor {
    service: Arc<dyn StructuredDocumentService>,
}

impl StructuredExtractor {
    pub fn new(service: Arc<dyn StructuredDocumentService>) -> Self {
        Self { service }
    }

    /// Analyze PDF bytes within the configured timeout.
    ///
    /// A reply without a usable VAT number counts as a failure.
    pub async fn extract(
        &self,
        bytes: &[u8],
        config: &ExtractionConfig,
    ) -> Result<ExtractionResult, ExtractionError> {
        let secs = config.remote_timeout_secs;
        let document = tokio::time::timeout(Duration::from_secs(secs), self.service.analyze(bytes))
            .await
            .map_err(|_| ExtractionError::Timeout {
                service: self.service.name().to_string(),
                secs,
            })??;

        trace!(entities = document.entities.len(), "structured reply received");
        let result = map_document(&document, config.document_ai_preferred_for_greek)?;
        debug!(
            service = self.service.name(),
            confidence = result.confidence,
            "structured result accepted"
        );
        Ok(result)
    }
}

fn map_document(
    document: &StructuredDocument,
    preferred_for_greek: bool,
) -> Result<ExtractionResult, ExtractionError> {
    let value = |field| entity_value(&document.entities, field);

    let vat_number = clean_vat_number(&value(DocumentField::VatNumber).unwrap_or_default());
    if vat_number == UNKNOWN {
        return Err(ExtractionError::NotViable("no VAT number entity".to_string()));
    }

    let data = DocumentData {
        vat_number,
        client_name: value(DocumentField::ClientName).unwrap_or_else(|| UNKNOWN_CLIENT.to_string()),
        supplier: value(DocumentField::Supplier).unwrap_or_else(|| UNKNOWN.to_string()),
        document_number: value(DocumentField::DocumentNumber)
            .unwrap_or_else(|| UNKNOWN.to_string()),
        date: value(DocumentField::Date)
            .map(|d| normalize_date(&d))
            .unwrap_or_else(today),
        amount: value(DocumentField::Amount)
            .and_then(|a| parse_amount(&clean_amount(&a)))
            .unwrap_or(Decimal::ZERO),
        currency: value(DocumentField::Currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
    };

    let confidence = match (contains_greek(&document.text), preferred_for_greek) {
        (true, true) => GREEK_PREFERRED_CONFIDENCE,
        (true, false) => GREEK_CONFIDENCE,
        (false, _) => BASE_CONFIDENCE,
    };
    Ok(ExtractionResult::new(data, confidence, ExtractionMethod::DocumentAi))
}
