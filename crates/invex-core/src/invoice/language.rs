//! Greek script detection used to bias tier order and scoring.

/// True if `text` contains any Greek or Greek Extended code point
/// (U+0370–U+03FF, U+1F00–U+1FFF).
pub fn contains_greek(text: &str) -> bool {
    text.chars()
        .any(|c| matches!(c, '\u{0370}'..='\u{03FF}' | '\u{1F00}'..='\u{1FFF}'))
}

/// The first `max_chars` characters of `text`, cut on a char boundary.
pub fn sample(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
