//! Ordered regex rule tables for English and Greek invoices.
//!
//! Each `*_RULES` table is tried top to bottom and the first acceptable match
//! wins. Keep rules as separate entries so each one stays testable.

use lazy_static::lazy_static;
use regex::Regex;

fn compile(rules: &[&str]) -> Vec<Regex> {
    rules.iter().map(|r| Regex::new(r).unwrap()).collect()
}

lazy_static! {
    // Labeled VAT / tax IDs
    pub static ref VAT_RULES: Vec<Regex> = compile(&[
        r"(?i)\bVAT\s*(?:Number|No\.?|Reg(?:istration)?\.?(?:\s*No\.?)?|ID)?\s*[:.#]?\s*([A-Z0-9]{7,12})\b",
        r"(?i)\bTax\s*ID\s*(?:Number|No\.?)?\s*[:.#]?\s*([A-Z0-9]{7,12})\b",
        r"(?i)Α\.?\s?Φ\.?\s?Μ\.?\s*[:.]?\s*(\d{9})\b",
        r"(?i)Φ\.?\s?Π\.?\s?Α\.?\s*[:.]?\s*(\d{9})\b",
    ]);

    /// Any mention of a tax ID label, used to anchor the proximity search.
    pub static ref VAT_KEYWORD: Regex = Regex::new(
        r"(?i)vat|tax\s*id|α\.?\s?φ\.?\s?μ|φ\.?\s?π\.?\s?α|afm"
    ).unwrap();

    /// Standalone 9-digit number (Greek domestic VAT shape).
    pub static ref NINE_DIGITS: Regex = Regex::new(r"\b(\d{9})\b").unwrap();

    // Client (recipient) labels
    pub static ref CLIENT_RULES: Vec<Regex> = compile(&[
        r"(?i)bill\s*to\s*[:.]?\s*([^,\n]+)",
        r"(?i)customer(?:\s*name)?\s*[:.]?\s*([^,\n]+)",
        r"(?i)πελ[άα]της\s*[:.]?\s*([^,\n]+)",
        r"(?i)επωνυμ[ίι]α\s*[:.]?\s*([^,\n]+)",
        r"(?i)προς\s*:\s*([^,\n]+)",
        r"(?i)λ[ήη]πτης\s*[:.]?\s*([^,\n]+)",
    ]);

    // Issuer (vendor) labels
    pub static ref ISSUER_RULES: Vec<Regex> = compile(&[
        r"(?i)\bfrom\s*:\s*([^,\n]+)",
        r"(?i)issued\s*by\s*[:.]?\s*([^,\n]+)",
        r"(?i)εκδ[όο]της\s*[:.]?\s*([^,\n]+)",
        r"(?i)πωλητ[ήη]ς\s*[:.]?\s*([^,\n]+)",
        r"(?i)προμηθευτ[ήη]ς\s*[:.]?\s*([^,\n]+)",
    ]);

    /// Lines opening with a document title or date label are never party names.
    pub static ref TITLE_LINE: Regex = Regex::new(
        r"(?i)^(?:τιμολ[όο]γιο|invoice|receipt|απ[όο]δειξη|παραστατικ[όο]|ημερομην[ίι]α|date|αριθμ[όο]ς|σελ[ίι]δα|page)"
    ).unwrap();

    // Dates
    pub static ref DATE_RULES: Vec<Regex> = compile(&[
        r"(?i)(?:date|ημερομην[ίι]α|[έε]κδοση[ςσ]?)[^\d\n]{0,20}(\d{4}[-/.]\d{1,2}[-/.]\d{1,2}|\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4})\b",
        r"\b(\d{4}[-/.]\d{1,2}[-/.]\d{1,2}|\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4})\b",
    ]);

    // Invoice / document numbers, labeled
    pub static ref DOCUMENT_NUMBER_RULES: Vec<Regex> = compile(&[
        r"(?i)invoice\s*(?:number|no\.?|num\.?|#)\s*[:.]?\s*([A-Za-z0-9\-_/]+)",
        r"(?i)invoice\s*:\s*([A-Za-z0-9\-_/]+)",
        r"(?i)τιμολ[όο]γιο\s*[:.]?\s*([A-Za-z0-9\-_/]+)",
        r"(?i)αριθμ[όο]ς(?:\s*(?:τιμολογ[ίι]ου|παραστατικο[ύυ]))?\s*[:.]?\s*([A-Za-z0-9\-_/]+)",
        r"(?i)αρ\.?\s*τιμ\.?\s*[:.]?\s*([A-Za-z0-9\-_/]+)",
        r"(?i)αρ\.?\s*παρ\.?\s*[:.]?\s*([A-Za-z0-9\-_/]+)",
        r"(?i)α/α\s*[:.]?\s*([A-Za-z0-9\-_/]+)",
        r"(?i)\b[NΝ][oο]\.\s*:?\s*([A-Za-z0-9\-_/]+)",
    ]);

    // Invoice / document numbers, unlabeled shapes
    pub static ref DOCUMENT_NUMBER_SHAPES: Vec<Regex> = compile(&[
        r"\b([A-Z]{2,4}\d{0,4}-\d{3,8})\b",
        r"\b(\d{1,4}/\d{1,4}/\d{4})\b",
        r"\b(\d{5}/\d{4})\b",
    ]);

    // Totals
    pub static ref AMOUNT_RULES: Vec<Regex> = compile(&[
        r"(?i)\b(?:total|amount)(?:\s*(?:due|payable|amount))?\s*[:.]?\s*(?:€|EUR|\$|£)?\s*(\d[\d.,]*)",
        r"(?i)(?:σ[ύυ]νολο|πληρωτ[έε]ο|πληρωμ[ήη]|συν\.)[^\d\n]{0,30}(\d[\d.,]*)",
        r"(?i)(\d[\d.,]*)\s*(?:€|EUR\b|ευρ[ώω])",
    ]);

    /// Keywords scanned, in order, for a nearby decimal number.
    pub static ref AMOUNT_KEYWORDS: Vec<Regex> = compile(&[
        r"(?i)συνολο",
        r"(?i)συνολικ[όο]",
        r"(?i)πληρωμ[ήη]",
        r"(?i)total",
        r"(?i)amount",
        r"(?i)sum",
    ]);

    /// Number with a decimal point or comma.
    pub static ref DECIMAL_NUMBER: Regex = Regex::new(r"(\d+(?:[.,]\d+)+)").unwrap();

    /// Words that mark a document as an invoice or receipt.
    pub static ref INVOICE_KEYWORDS: Regex = Regex::new(
        r"(?i)invoice|receipt|bill\s*to|τιμολ[όο]γιο|απ[όο]δειξη|παραστατικ[όο]|α\.?φ\.?μ|\bvat\b|σ[ύυ]νολο|\btotal\b"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_tables_compile() {
        assert_eq!(VAT_RULES.len(), 4);
        assert_eq!(CLIENT_RULES.len(), 6);
        assert_eq!(ISSUER_RULES.len(), 5);
        assert_eq!(DATE_RULES.len(), 2);
        assert_eq!(DOCUMENT_NUMBER_RULES.len(), 8);
        assert_eq!(DOCUMENT_NUMBER_SHAPES.len(), 3);
        assert_eq!(AMOUNT_RULES.len(), 3);
        assert_eq!(AMOUNT_KEYWORDS.len(), 6);
    }

    #[test]
    fn test_greek_labels_are_case_insensitive() {
        assert!(VAT_RULES[2].is_match("α.φ.μ.: 123456789"));
        assert!(AMOUNT_RULES[1].is_match("ΣΥΝΟΛΟ: 1.234,56 €"));
        assert!(TITLE_LINE.is_match("ΤΙΜΟΛΟΓΙΟ ΠΩΛΗΣΗΣ"));
    }
}
