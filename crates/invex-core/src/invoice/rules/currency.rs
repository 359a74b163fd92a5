//! Currency detection by marker presence.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::DEFAULT_CURRENCY;

lazy_static! {
    /// Per currency: symbols and ISO codes (case-sensitive, original text)
    /// and spelled-out words (whole words, lowercased text). Checked in order.
    static ref CURRENCY_MARKERS: Vec<(&'static str, Regex, Regex)> = vec![
        (
            "€",
            Regex::new(r"€|\bEUR\b").unwrap(),
            Regex::new(r"\b(?:euros?|ευρώ|ευρω|ευρο)\b").unwrap(),
        ),
        (
            "$",
            Regex::new(r"\$|\bUSD\b").unwrap(),
            Regex::new(r"\b(?:dollars?)\b").unwrap(),
        ),
        (
            "£",
            Regex::new(r"£|\bGBP\b").unwrap(),
            Regex::new(r"\b(?:pounds?)\b").unwrap(),
        ),
    ];
}

/// Detect the document currency; `€` when no marker is present.
pub fn extract_currency(text: &str) -> String {
    let lower = text.to_lowercase();
    CURRENCY_MARKERS
        .iter()
        .find(|(_, codes, words)| codes.is_match(text) || words.is_match(&lower))
        .map(|(symbol, _, _)| *symbol)
        .unwrap_or(DEFAULT_CURRENCY)
        .to_string()
}
