//! Invoice total extraction.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

use super::patterns::{AMOUNT_KEYWORDS, AMOUNT_RULES, DECIMAL_NUMBER};
use super::{chars_after, FieldExtractor};

/// How many characters after a total keyword are searched for a number.
pub const KEYWORD_WINDOW: usize = 50;

/// Amount field extractor.
///
/// Produces the cleaned amount string (see [`clean_amount`]).
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }

    fn labeled(&self, text: &str) -> Option<String> {
        AMOUNT_RULES.iter().enumerate().find_map(|(rule, pattern)| {
            pattern
                .captures_iter(text)
                .map(|caps| clean_amount(&caps[1]))
                .find(|value| !value.is_empty())
                .inspect(|value| trace!(rule, value = value.as_str(), "amount rule matched"))
        })
    }

    fn near_keyword(&self, text: &str) -> Option<String> {
        AMOUNT_KEYWORDS.iter().find_map(|keyword| {
            keyword.find_iter(text).find_map(|k| {
                let window = chars_after(text, k.end(), KEYWORD_WINDOW);
                let caps = DECIMAL_NUMBER.captures(window)?;
                let raw = &caps[1];
                trace!(keyword = k.as_str(), raw, "amount found near keyword");
                Some(clean_amount(raw))
            })
        })
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.labeled(text).or_else(|| self.near_keyword(text))
    }
}

/// Strip everything except digits and separators, drop trailing separators
/// (a sentence-ending `.` or `,` after the number), then turn the first comma
/// into a dot.
///
/// This is deliberately not locale-aware: `"1.234,56"` becomes `"1.234.56"`.
pub fn clean_amount(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    kept.trim_end_matches(['.', ','])
        .replacen(',', ".", 1)
}

/// Parse a cleaned amount string into a non-negative decimal.
///
/// Only the longest leading `digits[.digits]` prefix is read, so
/// `"1.234.56"` parses as `1.234`.
pub fn parse_amount(cleaned: &str) -> Option<Decimal> {
    let digits_end = |s: &str| s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());

    let int_len = digits_end(cleaned);
    if int_len == 0 {
        return None;
    }

    let mut end = int_len;
    if let Some(rest) = cleaned[int_len..].strip_prefix('.') {
        let frac_len = digits_end(rest);
        if frac_len > 0 {
            end = int_len + 1 + frac_len;
        }
    }

    Decimal::from_str(&cleaned[..end]).ok()
}

/// Extract the cleaned invoice total.
pub fn extract_amount(text: &str) -> Option<String> {
    AmountExtractor::new().extract(text)
}
