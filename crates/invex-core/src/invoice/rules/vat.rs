//! VAT number (ΑΦΜ / tax ID) extraction.

use tracing::trace;

use super::patterns::{NINE_DIGITS, VAT_KEYWORD, VAT_RULES};
use super::{char_offset, FieldExtractor};
use crate::invoice::normalize::clean_vat_number;
use crate::models::UNKNOWN;

/// Window (in characters) around a VAT keyword.
pub const PROXIMITY_WINDOW: usize = 200;

/// VAT number extractor.
///
/// Labeled rules come first; otherwise the standalone 9-digit number closest
/// to a VAT keyword is taken when within the window, and as a last resort the
/// first 9-digit number in the text.
pub struct VatNumberExtractor;

impl VatNumberExtractor {
    pub fn new() -> Self {
        Self
    }

    fn labeled(&self, text: &str) -> Option<String> {
        VAT_RULES.iter().enumerate().find_map(|(rule, pattern)| {
            pattern
                .captures_iter(text)
                .map(|caps| caps[1].to_string())
                // Label words such as "Registration" fit the shape but carry no digits.
                .find(|value| value.chars().any(|c| c.is_ascii_digit()))
                .inspect(|value| trace!(rule, value = value.as_str(), "VAT rule matched"))
        })
    }

    fn nearest_to_keyword(&self, text: &str) -> Option<String> {
        let keywords: Vec<usize> = VAT_KEYWORD
            .find_iter(text)
            .map(|m| char_offset(text, m.start()))
            .collect();
        if keywords.is_empty() {
            return None;
        }

        NINE_DIGITS
            .find_iter(text)
            .map(|m| {
                let offset = char_offset(text, m.start());
                let distance = keywords
                    .iter()
                    .map(|&k| offset.abs_diff(k))
                    .min()
                    .unwrap_or(usize::MAX);
                (distance, m)
            })
            .min_by_key(|(distance, _)| *distance)
            .filter(|(distance, _)| *distance <= PROXIMITY_WINDOW)
            .map(|(distance, m)| {
                trace!(distance, value = m.as_str(), "VAT found near keyword");
                m.as_str().to_string()
            })
    }
}

impl Default for VatNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for VatNumberExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.labeled(text)
            .or_else(|| self.nearest_to_keyword(text))
            .or_else(|| NINE_DIGITS.find(text).map(|m| m.as_str().to_string()))
    }
}

/// Extract and normalize a VAT number from text.
pub fn extract_vat_number(text: &str) -> Option<String> {
    VatNumberExtractor::new()
        .extract(text)
        .map(|value| clean_vat_number(&value))
        .filter(|v| v != UNKNOWN)
}
