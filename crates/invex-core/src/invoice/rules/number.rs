//! Invoice / receipt number extraction.

use tracing::trace;

use super::dates::is_calendar_date;
use super::patterns::{DOCUMENT_NUMBER_RULES, DOCUMENT_NUMBER_SHAPES};
use super::FieldExtractor;

/// Longest accepted labeled document number.
pub const MAX_NUMBER_LEN: usize = 20;

/// Document number extractor.
pub struct DocumentNumberExtractor;

impl DocumentNumberExtractor {
    pub fn new() -> Self {
        Self
    }

    fn labeled(&self, text: &str) -> Option<String> {
        DOCUMENT_NUMBER_RULES.iter().enumerate().find_map(|(rule, pattern)| {
            pattern
                .captures_iter(text)
                .map(|caps| caps[1].to_string())
                .find(|value| {
                    let fits = (1..=MAX_NUMBER_LEN).contains(&value.len());
                    if !fits {
                        trace!(rule, value = value.as_str(), "document number too long");
                    }
                    fits
                })
        })
    }

    fn shaped(&self, text: &str) -> Option<String> {
        DOCUMENT_NUMBER_SHAPES.iter().find_map(|pattern| {
            pattern
                .captures_iter(text)
                .map(|caps| caps[1].to_string())
                .find(|value| !is_calendar_date(value))
        })
    }
}

impl Default for DocumentNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DocumentNumberExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.labeled(text).or_else(|| self.shaped(text))
    }
}

/// Extract the invoice / receipt number.
pub fn extract_document_number(text: &str) -> Option<String> {
    DocumentNumberExtractor::new().extract(text)
}
