//! Client (recipient) and issuer (vendor) name extraction.

use regex::Regex;
use tracing::trace;

use super::patterns::{CLIENT_RULES, ISSUER_RULES, TITLE_LINE};
use super::{chars_before, FieldExtractor};
use crate::invoice::normalize::clean_text_field;

/// How far back from the first "ΑΦΜ" the client fallback looks.
const CLIENT_LOOKBACK_CHARS: usize = 200;

fn is_title_line(line: &str) -> bool {
    TITLE_LINE.is_match(line.trim())
}

/// First acceptable capture, trying each rule's first match in order.
fn first_labeled(rules: &[Regex], text: &str, accept: fn(&str) -> bool) -> Option<String> {
    rules.iter().enumerate().find_map(|(rule, pattern)| {
        let caps = pattern.captures(text)?;
        let value = clean_text_field(&caps[1])?;
        if !accept(&value) {
            trace!(rule, value = value.as_str(), "party candidate rejected");
            return None;
        }
        Some(value)
    })
}

fn acceptable_client(value: &str) -> bool {
    value.chars().count() > 3 && !value.contains("ΑΦΜ") && !value.contains("VAT")
}

fn acceptable_issuer(value: &str) -> bool {
    value.chars().count() > 3
}

/// Client name extractor.
pub struct ClientNameExtractor;

impl ClientNameExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Last non-empty line in the 200 characters before the first "ΑΦΜ".
    fn before_vat_label(&self, text: &str) -> Option<String> {
        let idx = text.find("ΑΦΜ")?;
        let window = chars_before(text, idx, CLIENT_LOOKBACK_CHARS);
        let line = window.lines().map(str::trim).filter(|l| !l.is_empty()).last()?;

        if is_title_line(line) {
            return None;
        }
        clean_text_field(line).filter(|value| acceptable_client(value))
    }
}

impl Default for ClientNameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ClientNameExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_labeled(&CLIENT_RULES, text, acceptable_client)
            .or_else(|| self.before_vat_label(text))
    }
}

/// Issuer name extractor.
pub struct IssuerExtractor;

impl IssuerExtractor {
    pub fn new() -> Self {
        Self
    }

    /// The first non-empty line, unless it is a title or date line.
    fn first_line(&self, text: &str) -> Option<String> {
        let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
        if is_title_line(line) {
            return None;
        }
        clean_text_field(line).filter(|value| acceptable_issuer(value))
    }
}

impl Default for IssuerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for IssuerExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_labeled(&ISSUER_RULES, text, acceptable_issuer).or_else(|| self.first_line(text))
    }
}

/// Extract the client (recipient) name.
pub fn extract_client_name(text: &str) -> Option<String> {
    ClientNameExtractor::new().extract(text)
}

/// Extract the issuer (vendor) name.
pub fn extract_issuer(text: &str) -> Option<String> {
    IssuerExtractor::new().extract(text)
}
