//! In-memory cache of ranked results, keyed by a text fingerprint.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::models::ExtractionResult;

/// Characters taken from each of the start, middle and end of the text.
pub const SAMPLE_CHARS: usize = 1000;

/// The start, middle and end slices the fingerprint is computed over.
fn sample_slices(text: &str) -> [&str; 3] {
    let total = text.chars().count();
    let byte_at = |char_idx: usize| {
        text.char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(text.len())
    };

    let prefix = &text[..byte_at(SAMPLE_CHARS)];
    let mid_start = byte_at(total / 2);
    let mid_end = byte_at((total / 2).saturating_add(SAMPLE_CHARS));
    let middle = &text[mid_start..mid_end];
    let suffix = &text[byte_at(total.saturating_sub(SAMPLE_CHARS))..];

    [prefix, middle, suffix]
}

/// Content fingerprint of `text`: a SHA-256 hex digest over its start,
/// middle and end plus its length in characters.
#[cfg(feature = "digest")]
pub fn fingerprint(text: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    for slice in sample_slices(text) {
        hasher.update(slice.as_bytes());
        hasher.update([0u8]);
    }
    hasher.update(text.chars().count().to_le_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Content fingerprint of `text`: a rolling multiplicative hash over its
/// start, middle and end plus its length in characters.
#[cfg(not(feature = "digest"))]
pub fn fingerprint(text: &str) -> String {
    let mut hash: u64 = 0;
    for slice in sample_slices(text) {
        for c in slice.chars() {
            hash = hash.wrapping_mul(31).wrapping_add(c as u64);
        }
    }
    format!("{:016x}-{}", hash, text.chars().count())
}

/// Ranked candidates per fingerprint.
///
/// Lives for the process only and never evicts.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: Mutex<HashMap<String, Vec<ExtractionResult>>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Vec<ExtractionResult>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn put(&self, key: impl Into<String>, ranked: Vec<ExtractionResult>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), ranked);
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
