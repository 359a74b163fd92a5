//! PDF text extraction using lopdf and pdf-extract, with an OCR hook.

use std::sync::Arc;

use lopdf::Document;
use tracing::{debug, warn};

use super::{Result, TextExtractor};
use crate::error::PdfError;
use crate::models::PdfConfig;

/// Recognizes the text of one rendered page. Implementations wrap an OCR
/// engine or service.
pub trait PageRecognizer: Send + Sync {
    /// `pdf` is the (decrypted) document, `page` is 1-indexed.
    fn recognize_page(&self, pdf: &[u8], page: u32) -> Result<String>;
}

/// Native PDF text extraction, falling back to page OCR for scans.
pub struct PdfTextExtractor {
    min_text_length: usize,
    recognizer: Option<Arc<dyn PageRecognizer>>,
}

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self::from_config(&PdfConfig::default())
    }

    pub fn from_config(config: &PdfConfig) -> Self {
        Self {
            min_text_length: config.min_text_length,
            recognizer: None,
        }
    }

    /// Consult `recognizer` when native text is shorter than the threshold.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn PageRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Parse the document, decrypting empty-password PDFs. Returns the
    /// bytes pdf-extract should read and the page count.
    fn load(&self, data: &[u8]) -> Result<(Vec<u8>, u32)> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let raw = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len() as u32;
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }
        debug!("Loaded PDF with {} pages", page_count);
        Ok((raw, page_count))
    }

    fn recognize(&self, recognizer: &dyn PageRecognizer, raw: &[u8], page_count: u32) -> String {
        let mut text = String::new();
        for page in 1..=page_count {
            match recognizer.recognize_page(raw, page) {
                Ok(page_text) if !page_text.trim().is_empty() => {
                    if !text.is_empty() {
                        text.push_str("\n\n");
                    }
                    text.push_str(&page_text);
                }
                Ok(_) => debug!(page, "OCR found no text"),
                Err(e) => warn!(page, error = %e, "OCR failed, skipping page"),
            }
        }
        text
    }
}

/// Text layer via pdf-extract. Malformed fonts or resources make it panic,
/// which is reported as a text extraction error.
fn native_text(raw: &[u8]) -> Result<String> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(raw)
    })) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(PdfError::TextExtraction(e.to_string())),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            warn!(%message, "pdf-extract panicked");
            Err(PdfError::TextExtraction(format!("pdf-extract panicked: {}", message)))
        }
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        let (raw, page_count) = self.load(bytes)?;

        let native = native_text(&raw);

        let Some(recognizer) = self.recognizer.as_deref() else {
            return native;
        };

        let native = match native {
            Ok(text) if text.trim().chars().count() >= self.min_text_length => return Ok(text),
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "native text extraction failed, trying OCR");
                String::new()
            }
        };

        debug!(
            chars = native.trim().chars().count(),
            min = self.min_text_length,
            "native text too short, running OCR"
        );
        let recognized = self.recognize(recognizer, &raw, page_count);
        if recognized.trim().is_empty() {
            Ok(native)
        } else {
            Ok(recognized)
        }
    }
}
