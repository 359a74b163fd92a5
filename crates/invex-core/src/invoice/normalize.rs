//! Cleanup of raw field strings coming from any tier.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::UNKNOWN;

lazy_static! {
    /// Leading "VAT" / "ΑΦΜ" / "Α.Φ.Μ." label, with optional number word and colon.
    static ref VAT_LABEL_PREFIX: Regex = Regex::new(
        r"(?i)^\s*(?:VAT(?:\s*(?:Number|No|Reg|ID))?|Α\.?\s?Φ\.?\s?Μ)[\s.:#]*"
    ).unwrap();
}

/// Normalize a raw VAT number to bare alphanumerics.
///
/// Empty input or the literal `unknown` yields the `"Unknown"` sentinel.
/// The function is idempotent.
pub fn clean_vat_number(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unknown") {
        return UNKNOWN.to_string();
    }

    // Dropping punctuation can expose a new label ("V.A.T." -> "VAT"),
    // so strip until a fixed point to keep the function idempotent.
    let mut cleaned = trimmed.to_string();
    loop {
        let next: String = VAT_LABEL_PREFIX
            .replace(&cleaned, "")
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        if next == cleaned {
            break;
        }
        cleaned = next;
    }

    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("unknown") {
        UNKNOWN.to_string()
    } else {
        cleaned
    }
}

/// Trim a free-text field and treat empty or `unknown` as absent.
pub fn clean_text_field(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches(|c: char| c == ':' || c == ',').trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unknown") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// True if `vat` is exactly nine ASCII digits (Greek domestic format).
pub fn is_greek_vat(vat: &str) -> bool {
    vat.len() == 9 && vat.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_vat_number_prefixes() {
        assert_eq!(clean_vat_number("ΑΦΜ: 123456789"), "123456789");
        assert_eq!(clean_vat_number("Α.Φ.Μ. 123 456 789"), "123456789");
        assert_eq!(clean_vat_number("VAT: EL-123.456.789"), "EL123456789");
        assert_eq!(clean_vat_number("vat no. GB 123 4567 89"), "GB123456789");
    }

    #[test]
    fn test_clean_vat_number_unknown() {
        assert_eq!(clean_vat_number(""), "Unknown");
        assert_eq!(clean_vat_number("   "), "Unknown");
        assert_eq!(clean_vat_number("UNKNOWN"), "Unknown");
        assert_eq!(clean_vat_number("unknown"), "Unknown");
        assert_eq!(clean_vat_number("ΑΦΜ:"), "Unknown");
    }

    #[test]
    fn test_clean_vat_number_idempotent() {
        let samples = [
            "ΑΦΜ: 123456789",
            "VAT EL 999-888-777",
            "Unknown",
            "",
            "Α.Φ.Μ.:094019245",
            "  vatnumber 12 ",
            "VAT VAT 1",
            "ΑΦΜ ΑΦΜ 2",
            "#-./",
        ];
        for s in samples {
            let once = clean_vat_number(s);
            assert_eq!(clean_vat_number(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_clean_text_field() {
        assert_eq!(clean_text_field("  Acme Ltd, "), Some("Acme Ltd".to_string()));
        assert_eq!(clean_text_field("unknown"), None);
        assert_eq!(clean_text_field(""), None);
    }

    #[test]
    fn test_is_greek_vat() {
        assert!(is_greek_vat("123456789"));
        assert!(!is_greek_vat("12345678"));
        assert!(!is_greek_vat("EL1234567"));
    }
}
