//! The extracted document record and ranking types.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel for any text field that could not be found.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder used when no client name is found.
pub const UNKNOWN_CLIENT: &str = "Unknown Client";

/// Currency assumed when the document names none.
pub const DEFAULT_CURRENCY: &str = "€";

/// Structured fields extracted from one invoice.
///
/// Every field is always populated. Absence is encoded with the sentinels
/// above, a zero amount, or today's date, because filename generation and
/// spreadsheet logging downstream rely on total presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentData {
    /// Tax ID as bare alphanumerics (no label, no punctuation).
    pub vat_number: String,

    /// Recipient of the invoice.
    pub client_name: String,

    /// Issuer / vendor.
    pub supplier: String,

    /// Invoice or receipt number.
    pub document_number: String,

    /// `YYYY-MM-DD` when normalizable, otherwise the raw matched text.
    pub date: String,

    /// Invoice total, never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// Currency symbol (`€`, `$`, `£`) or ISO code.
    pub currency: String,
}

impl DocumentData {
    /// Record returned when nothing at all could be extracted.
    pub fn unknown() -> Self {
        Self {
            vat_number: UNKNOWN.to_string(),
            client_name: UNKNOWN_CLIENT.to_string(),
            supplier: UNKNOWN.to_string(),
            document_number: UNKNOWN.to_string(),
            date: today(),
            amount: Decimal::ZERO,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// True when every identifying field holds its sentinel.
    ///
    /// Callers treat this as a soft failure signal.
    pub fn is_unknown(&self) -> bool {
        self.vat_number == UNKNOWN
            && self.supplier == UNKNOWN
            && self.document_number == UNKNOWN
            && (self.client_name == UNKNOWN_CLIENT || self.client_name == UNKNOWN)
            && self.amount.is_zero()
    }

    /// String form of a single field, used for comparisons and tabular output.
    pub fn field(&self, field: DocumentField) -> String {
        match field {
            DocumentField::VatNumber => self.vat_number.clone(),
            DocumentField::ClientName => self.client_name.clone(),
            DocumentField::Supplier => self.supplier.clone(),
            DocumentField::DocumentNumber => self.document_number.clone(),
            DocumentField::Date => self.date.clone(),
            DocumentField::Amount => self.amount.normalize().to_string(),
            DocumentField::Currency => self.currency.clone(),
        }
    }

    /// Per-field correctness of `self` judged against a corrected copy.
    pub fn compare(&self, corrected: &DocumentData) -> BTreeMap<DocumentField, bool> {
        DocumentField::ALL
            .iter()
            .map(|&f| (f, self.field(f).trim() == corrected.field(f).trim()))
            .collect()
    }
}

impl Default for DocumentData {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Today's local date as `YYYY-MM-DD`.
pub fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Names of the fields of [`DocumentData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentField {
    VatNumber,
    ClientName,
    Supplier,
    DocumentNumber,
    Date,
    Amount,
    Currency,
}

impl DocumentField {
    pub const ALL: [DocumentField; 7] = [
        DocumentField::VatNumber,
        DocumentField::ClientName,
        DocumentField::Supplier,
        DocumentField::DocumentNumber,
        DocumentField::Date,
        DocumentField::Amount,
        DocumentField::Currency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentField::VatNumber => "vatNumber",
            DocumentField::ClientName => "clientName",
            DocumentField::Supplier => "supplier",
            DocumentField::DocumentNumber => "documentNumber",
            DocumentField::Date => "date",
            DocumentField::Amount => "amount",
            DocumentField::Currency => "currency",
        }
    }
}

impl fmt::Display for DocumentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy that produced a candidate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExtractionMethod {
    /// Remote LLM text understanding.
    #[serde(rename = "gpt")]
    Gpt,
    /// Remote structured-document (Document AI style) extraction.
    #[serde(rename = "documentAi")]
    DocumentAi,
    /// Local regex rule tables.
    #[serde(rename = "pattern")]
    Pattern,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::Gpt => "gpt",
            ExtractionMethod::DocumentAi => "documentAi",
            ExtractionMethod::Pattern => "pattern",
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gpt" | "llm" | "ai" => Ok(ExtractionMethod::Gpt),
            "documentai" | "document_ai" | "document-ai" => Ok(ExtractionMethod::DocumentAi),
            "pattern" | "regex" => Ok(ExtractionMethod::Pattern),
            other => Err(format!("unknown extraction method: {other}")),
        }
    }
}

/// One tier's candidate, ranked by `confidence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub data: DocumentData,
    /// Heuristic score in `0..=100`, used only for ranking.
    pub confidence: u8,
    pub method: ExtractionMethod,
}

impl ExtractionResult {
    pub fn new(data: DocumentData, confidence: u8, method: ExtractionMethod) -> Self {
        Self {
            data,
            confidence: confidence.min(100),
            method,
        }
    }
}
