//! Rule-based field extractors for English and Greek invoices.

pub mod amounts;
pub mod currency;
pub mod dates;
pub mod number;
pub mod parties;
pub mod patterns;
pub mod vat;

pub use amounts::{clean_amount, extract_amount, parse_amount, AmountExtractor};
pub use currency::extract_currency;
pub use dates::{extract_date, normalize_date, DateExtractor};
pub use number::{extract_document_number, DocumentNumberExtractor};
pub use parties::{extract_client_name, extract_issuer, ClientNameExtractor, IssuerExtractor};
pub use vat::{extract_vat_number, VatNumberExtractor};

/// A field extractor backed by an ordered rule table.
pub trait FieldExtractor {
    type Output;

    /// The first acceptable match in rule order.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// Character offset of byte index `byte` in `text`.
pub(crate) fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

/// Up to `n` characters of `text` starting at byte index `byte`.
pub(crate) fn chars_after(text: &str, byte: usize, n: usize) -> &str {
    let rest = &text[byte..];
    match rest.char_indices().nth(n) {
        Some((idx, _)) => &rest[..idx],
        None => rest,
    }
}

/// Up to `n` characters of `text` ending at byte index `byte`.
pub(crate) fn chars_before(text: &str, byte: usize, n: usize) -> &str {
    let head = &text[..byte];
    let count = head.chars().count();
    if count <= n {
        return head;
    }
    match head.char_indices().nth(count - n) {
        Some((idx, _)) => &head[idx..],
        None => head,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_windows() {
        let text = "ΑΒΓ abc";
        let byte = text.find('a').unwrap();
        assert_eq!(char_offset(text, byte), 4);
        assert_eq!(chars_before(text, byte, 2), "Γ ");
        assert_eq!(chars_before(text, byte, 50), "ΑΒΓ ");
        assert_eq!(chars_after(text, 0, 2), "ΑΒ");
        assert_eq!(chars_after(text, byte, 50), "abc");
    }
}
