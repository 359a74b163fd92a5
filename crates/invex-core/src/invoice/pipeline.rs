//! Tier orchestration and confidence ranking.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::models::{DocumentData, ExtractionConfig, ExtractionMethod, ExtractionResult};
use crate::pdf::TextExtractor;
use crate::remote::{StructuredDocumentService, TextExtractionService};

use super::cache::{fingerprint, ResultCache};
use super::language::{contains_greek, sample};
use super::llm::LlmExtractor;
use super::pattern::PatternExtractor;
use super::structured::StructuredExtractor;

/// Everything one pipeline run produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutcome {
    /// The winning record, or the all-sentinel record on total failure.
    pub data: DocumentData,
    /// Confidence of the winner.
    pub confidence: Option<u8>,
    /// Method of the winner.
    pub method: Option<ExtractionMethod>,
    /// Every accepted candidate, best first.
    pub candidates: Vec<ExtractionResult>,
    pub contains_greek: bool,
    /// Whether the candidates came from the result cache.
    pub cached: bool,
    pub processing_time_ms: u64,
}

impl PipelineOutcome {
    fn from_ranked(candidates: Vec<ExtractionResult>, contains_greek: bool, cached: bool, start: Instant) -> Self {
        let winner = candidates.first();
        Self {
            data: winner.map(|w| w.data.clone()).unwrap_or_default(),
            confidence: winner.map(|w| w.confidence),
            method: winner.map(|w| w.method),
            contains_greek,
            cached,
            processing_time_ms: start.elapsed().as_millis() as u64,
            candidates,
        }
    }

    fn failed(start: Instant) -> Self {
        Self::from_ranked(Vec::new(), false, false, start)
    }
}

/// Sort best first. The sort is stable, so on equal confidence the earlier
/// attempt wins.
pub(crate) fn rank(candidates: &mut [ExtractionResult]) {
    candidates.sort_by(|a, b| b.confidence.cmp(&a.confidence));
}

/// Remote tiers must reach the configured threshold.
fn accept(result: ExtractionResult, threshold: u8) -> Result<ExtractionResult, ExtractionError> {
    if result.confidence < threshold {
        return Err(ExtractionError::BelowThreshold {
            confidence: result.confidence,
            threshold,
        });
    }
    Ok(result)
}

/// Runs the extraction tiers over one document and picks the best result.
///
/// Tier order: structured-document first when it is enabled, preferred for
/// Greek and the document is Greek; then the LLM; then the structured tier
/// as a fallback if nothing was collected yet; then the pattern baseline,
/// which always contributes.
pub struct ExtractionPipeline {
    text_extractor: Arc<dyn TextExtractor>,
    llm: Option<LlmExtractor>,
    structured: Option<StructuredExtractor>,
    pattern: PatternExtractor,
    cache: Option<Arc<ResultCache>>,
}

impl ExtractionPipeline {
    pub fn new(text_extractor: Arc<dyn TextExtractor>) -> Self {
        Self {
            text_extractor,
            llm: None,
            structured: None,
            pattern: PatternExtractor::new(),
            cache: None,
        }
    }

    pub fn with_llm(mut self, service: Arc<dyn TextExtractionService>) -> Self {
        self.llm = Some(LlmExtractor::new(service));
        self
    }

    pub fn with_structured(mut self, service: Arc<dyn StructuredDocumentService>) -> Self {
        self.structured = Some(StructuredExtractor::new(service));
        self
    }

    /// Share a result cache, e.g. across a batch.
    pub fn with_cache(mut self, cache: Arc<ResultCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Best record for the document. Never fails.
    pub async fn extract(&self, bytes: &[u8], config: &ExtractionConfig) -> DocumentData {
        self.extract_ranked(bytes, config).await.data
    }

    /// Full run over document bytes.
    pub async fn extract_ranked(&self, bytes: &[u8], config: &ExtractionConfig) -> PipelineOutcome {
        let start = Instant::now();
        let text = match self.text_extractor.extract_text(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "text extraction failed, returning defaults");
                return PipelineOutcome::failed(start);
            }
        };
        self.run(&text, Some(bytes), config, start).await
    }

    /// Full run over already extracted text. The structured tier needs the
    /// original bytes and is skipped.
    pub async fn extract_text(&self, text: &str, config: &ExtractionConfig) -> PipelineOutcome {
        self.run(text, None, config, Instant::now()).await
    }

    /// Full run when the caller already extracted `text` from `bytes`.
    /// The text extractor is not called again.
    pub async fn extract_prepared(
        &self,
        text: &str,
        bytes: &[u8],
        config: &ExtractionConfig,
    ) -> PipelineOutcome {
        self.run(text, Some(bytes), config, Instant::now()).await
    }

    /// Cache key: the text fingerprint plus every setting that changes which
    /// tiers run or how they are scored.
    fn cache_key(&self, text: &str, has_bytes: bool, config: &ExtractionConfig) -> String {
        let llm = config.enable_ai && self.llm.is_some();
        let structured = config.enable_document_ai && self.structured.is_some() && has_bytes;
        format!(
            "{}:llm={}:doc={}:greek-first={}:prefer-greek={}:min={}",
            fingerprint(text),
            llm,
            structured,
            config.document_ai_preferred_for_greek,
            config.prefer_greek_extraction,
            config.ai_confidence_threshold,
        )
    }

    async fn run(
        &self,
        text: &str,
        bytes: Option<&[u8]>,
        config: &ExtractionConfig,
        start: Instant,
    ) -> PipelineOutcome {
        let is_greek = contains_greek(sample(text, config.language_sample_chars));
        debug!(is_greek, chars = text.len(), "language detected");

        let key = self
            .cache
            .as_ref()
            .map(|_| self.cache_key(text, bytes.is_some(), config));
        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Some(ranked) = cache.get(key) {
                info!(key = key.as_str(), "result cache hit");
                return PipelineOutcome::from_ranked(ranked, is_greek, true, start);
            }
        }

        let mut candidates = Vec::new();
        let mut structured_attempted = false;

        if config.enable_document_ai && config.document_ai_preferred_for_greek && is_greek {
            structured_attempted = true;
            self.try_structured(bytes, config, &mut candidates).await;
        }

        if config.enable_ai {
            self.try_llm(text, is_greek, config, &mut candidates).await;
        }

        if config.enable_document_ai && !structured_attempted && candidates.is_empty() {
            self.try_structured(bytes, config, &mut candidates).await;
        }

        candidates.push(self.pattern.extract_scored(text));
        rank(&mut candidates);

        if let (Some(cache), Some(key)) = (&self.cache, key) {
            cache.put(key, candidates.clone());
        }

        let outcome = PipelineOutcome::from_ranked(candidates, is_greek, false, start);
        info!(
            method = outcome.method.map(|m| m.as_str()).unwrap_or("none"),
            confidence = outcome.confidence.unwrap_or(0),
            candidates = outcome.candidates.len(),
            elapsed_ms = outcome.processing_time_ms,
            "extraction finished"
        );
        outcome
    }

    async fn try_llm(
        &self,
        text: &str,
        is_greek: bool,
        config: &ExtractionConfig,
        candidates: &mut Vec<ExtractionResult>,
    ) {
        let Some(llm) = &self.llm else {
            debug!("AI extraction enabled but no service configured");
            return;
        };
        let result = llm
            .extract(text, is_greek, config)
            .await
            .and_then(|r| accept(r, config.ai_confidence_threshold));
        match result {
            Ok(r) => {
                info!(confidence = r.confidence, "gpt extraction succeeded");
                candidates.push(r);
            }
            Err(e) => warn!(error = %e, "gpt extraction failed"),
        }
    }

    async fn try_structured(
        &self,
        bytes: Option<&[u8]>,
        config: &ExtractionConfig,
        candidates: &mut Vec<ExtractionResult>,
    ) {
        let (Some(structured), Some(bytes)) = (&self.structured, bytes) else {
            debug!("structured extraction unavailable");
            return;
        };
        let result = structured
            .extract(bytes, config)
            .await
            .and_then(|r| accept(r, config.ai_confidence_threshold));
        match result {
            Ok(r) => {
                info!(confidence = r.confidence, "documentAi extraction succeeded");
                candidates.push(r);
            }
            Err(e) => warn!(error = %e, "documentAi extraction failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::{PdfTextExtractor, Utf8TextExtractor};
    use crate::remote::{DocumentEntity, PromptVariant, StructuredDocument};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    type CallLog = Arc<Mutex<Vec<&'static str>>>;

    struct MockLlm {
        reply: Option<String>,
        delay: Duration,
        calls: CallLog,
    }

    #[async_trait]
    impl TextExtractionService for MockLlm {
        fn name(&self) -> &str {
            "mock-llm"
        }

        async fn extract_fields(
            &self,
            _text: &str,
            _variant: PromptVariant,
        ) -> Result<String, ExtractionError> {
            self.calls.lock().unwrap().push("gpt");
            tokio::time::sleep(self.delay).await;
            self.reply.clone().ok_or_else(|| ExtractionError::Remote {
                service: "mock-llm".to_string(),
                reason: "unavailable".to_string(),
            })
        }
    }

    struct MockStructured {
        document: StructuredDocument,
        calls: CallLog,
    }

    #[async_trait]
    impl StructuredDocumentService for MockStructured {
        fn name(&self) -> &str {
            "mock-structured"
        }

        async fn analyze(&self, _bytes: &[u8]) -> Result<StructuredDocument, ExtractionError> {
            self.calls.lock().unwrap().push("documentAi");
            Ok(self.document.clone())
        }
    }

    const GREEK_TEXT: &str = "ΑΛΦΑ ΤΕΧΝΙΚΗ ΑΕ\nΤΙΜΟΛΟΓΙΟ\nΑριθμός: 000245\n\
                              Ημερομηνία: 05/03/2024\nΑ.Φ.Μ.: 094019245\nΣΥΝΟΛΟ: 124,00 €\n";

    const VIABLE_REPLY: &str = r#"{"vatNumber": "123456789", "clientName": "Beta",
        "issuer": "Acme", "date": "2024-03-05", "documentNumber": "INV-99",
        "amount": 124, "currency": "€"}"#;

    fn llm(reply: Option<&str>, calls: &CallLog) -> Arc<MockLlm> {
        Arc::new(MockLlm {
            reply: reply.map(str::to_string),
            delay: Duration::ZERO,
            calls: calls.clone(),
        })
    }

    fn structured(text: &str, calls: &CallLog) -> Arc<MockStructured> {
        Arc::new(MockStructured {
            document: StructuredDocument {
                text: text.to_string(),
                entities: vec![
                    DocumentEntity::new("VAT_NUMBER", "555666777"),
                    DocumentEntity::new("supplier", "Delta"),
                ],
            },
            calls: calls.clone(),
        })
    }

    fn text_pipeline() -> ExtractionPipeline {
        ExtractionPipeline::new(Arc::new(Utf8TextExtractor))
    }

    #[tokio::test]
    async fn test_greek_gpt_beats_pattern_baseline() {
        let calls = CallLog::default();
        let pipeline = text_pipeline().with_llm(llm(Some(VIABLE_REPLY), &calls));

        let outcome = pipeline
            .extract_ranked(GREEK_TEXT.as_bytes(), &ExtractionConfig::default())
            .await;

        assert_eq!(outcome.data.vat_number, "123456789");
        assert_eq!(outcome.data.document_number, "INV-99");
        assert_eq!(outcome.method, Some(ExtractionMethod::Gpt));
        assert!(outcome.confidence.unwrap() >= 85);
        assert!(outcome.contains_greek);
        assert_eq!(outcome.candidates.len(), 2);
        assert_eq!(outcome.candidates[1].method, ExtractionMethod::Pattern);
        assert_eq!(outcome.candidates[1].data.vat_number, "094019245");
    }

    #[tokio::test]
    async fn test_never_fails_on_unreadable_input() {
        let calls = CallLog::default();
        let pipeline = ExtractionPipeline::new(Arc::new(PdfTextExtractor::new()))
            .with_llm(llm(Some(VIABLE_REPLY), &calls));

        let outcome = pipeline
            .extract_ranked(b"\x00\x01 not a pdf", &ExtractionConfig::default())
            .await;

        assert!(outcome.data.is_unknown());
        assert_eq!(outcome.method, None);
        assert_eq!(outcome.confidence, None);
        assert!(outcome.candidates.is_empty());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_llm_falls_back_to_pattern() {
        let calls = CallLog::default();
        let pipeline = text_pipeline().with_llm(llm(None, &calls));

        let data = pipeline
            .extract(GREEK_TEXT.as_bytes(), &ExtractionConfig::default())
            .await;

        assert_eq!(data.vat_number, "094019245");
        assert_eq!(data.supplier, "ΑΛΦΑ ΤΕΧΝΙΚΗ ΑΕ");
        assert_eq!(*calls.lock().unwrap(), vec!["gpt"]);
    }

    #[tokio::test]
    async fn test_structured_first_for_greek() {
        let calls = CallLog::default();
        let pipeline = text_pipeline()
            .with_llm(llm(Some(VIABLE_REPLY), &calls))
            .with_structured(structured("ΤΙΜΟΛΟΓΙΟ", &calls));
        let config = ExtractionConfig {
            enable_document_ai: true,
            ..ExtractionConfig::default()
        };

        let outcome = pipeline.extract_ranked(GREEK_TEXT.as_bytes(), &config).await;

        assert_eq!(*calls.lock().unwrap(), vec!["documentAi", "gpt"]);
        let methods: Vec<_> = outcome.candidates.iter().map(|c| c.method).collect();
        assert_eq!(
            methods,
            vec![ExtractionMethod::Gpt, ExtractionMethod::DocumentAi, ExtractionMethod::Pattern]
        );
        assert_eq!(outcome.candidates[1].confidence, 90);
    }

    #[tokio::test]
    async fn test_structured_is_fallback_only() {
        let latin = "Invoice No: 7\nVAT: 123456789\nTotal: 10.00";
        let config = ExtractionConfig {
            enable_document_ai: true,
            ..ExtractionConfig::default()
        };

        // LLM succeeded: structured tier is not consulted.
        let calls = CallLog::default();
        let pipeline = text_pipeline()
            .with_llm(llm(Some(VIABLE_REPLY), &calls))
            .with_structured(structured("INVOICE", &calls));
        pipeline.extract(latin.as_bytes(), &config).await;
        assert_eq!(*calls.lock().unwrap(), vec!["gpt"]);

        // LLM failed: structured tier runs and wins over the pattern result.
        let calls = CallLog::default();
        let pipeline = text_pipeline()
            .with_llm(llm(None, &calls))
            .with_structured(structured("INVOICE", &calls));
        let outcome = pipeline.extract_ranked(latin.as_bytes(), &config).await;
        assert_eq!(*calls.lock().unwrap(), vec!["gpt", "documentAi"]);
        assert_eq!(outcome.method, Some(ExtractionMethod::DocumentAi));
        assert_eq!(outcome.confidence, Some(75));
        assert_eq!(outcome.data.vat_number, "555666777");
    }

    #[tokio::test]
    async fn test_text_input_skips_structured_tier() {
        let calls = CallLog::default();
        let pipeline = text_pipeline().with_structured(structured("ΤΙΜΟΛΟΓΙΟ", &calls));
        let config = ExtractionConfig {
            enable_document_ai: true,
            ..ExtractionConfig::default()
        };

        let outcome = pipeline.extract_text(GREEK_TEXT, &config).await;

        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(outcome.method, Some(ExtractionMethod::Pattern));
    }

    #[tokio::test]
    async fn test_disabled_ai_is_not_called() {
        let calls = CallLog::default();
        let pipeline = text_pipeline().with_llm(llm(Some(VIABLE_REPLY), &calls));
        let config = ExtractionConfig {
            enable_ai: false,
            ..ExtractionConfig::default()
        };

        let outcome = pipeline.extract_ranked(GREEK_TEXT.as_bytes(), &config).await;

        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(outcome.method, Some(ExtractionMethod::Pattern));
        assert_eq!(outcome.confidence, Some(65));
    }

    #[tokio::test]
    async fn test_threshold_rejects_remote_results() {
        let calls = CallLog::default();
        let pipeline = text_pipeline().with_llm(llm(Some(VIABLE_REPLY), &calls));
        let config = ExtractionConfig {
            ai_confidence_threshold: 96,
            ..ExtractionConfig::default()
        };

        let outcome = pipeline.extract_ranked(GREEK_TEXT.as_bytes(), &config).await;

        assert_eq!(outcome.method, Some(ExtractionMethod::Pattern));
        assert_eq!(outcome.candidates.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_llm_times_out() {
        let calls = CallLog::default();
        let slow = Arc::new(MockLlm {
            reply: Some(VIABLE_REPLY.to_string()),
            delay: Duration::from_secs(120),
            calls: calls.clone(),
        });
        let pipeline = text_pipeline().with_llm(slow);
        let config = ExtractionConfig {
            remote_timeout_secs: 2,
            ..ExtractionConfig::default()
        };

        let outcome = pipeline.extract_ranked(GREEK_TEXT.as_bytes(), &config).await;

        assert_eq!(outcome.method, Some(ExtractionMethod::Pattern));
        assert_eq!(*calls.lock().unwrap(), vec!["gpt"]);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_tiers() {
        let calls = CallLog::default();
        let cache = Arc::new(ResultCache::new());
        let pipeline = text_pipeline()
            .with_llm(llm(Some(VIABLE_REPLY), &calls))
            .with_cache(cache.clone());
        let config = ExtractionConfig::default();

        let first = pipeline.extract_ranked(GREEK_TEXT.as_bytes(), &config).await;
        let second = pipeline.extract_ranked(GREEK_TEXT.as_bytes(), &config).await;

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.data, second.data);
        assert_eq!(cache.len(), 1);
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cache_key_tracks_enabled_tiers() {
        let calls = CallLog::default();
        let cache = Arc::new(ResultCache::new());
        let pipeline = text_pipeline()
            .with_llm(llm(Some(VIABLE_REPLY), &calls))
            .with_cache(cache.clone());
        let no_ai = ExtractionConfig {
            enable_ai: false,
            ..ExtractionConfig::default()
        };
        let config = ExtractionConfig::default();

        let first = pipeline.extract_ranked(GREEK_TEXT.as_bytes(), &no_ai).await;
        assert_eq!(first.method, Some(ExtractionMethod::Pattern));

        let second = pipeline.extract_ranked(GREEK_TEXT.as_bytes(), &config).await;
        assert!(!second.cached);
        assert_eq!(second.method, Some(ExtractionMethod::Gpt));
        assert_eq!(calls.lock().unwrap().len(), 1);

        let third = pipeline.extract_ranked(GREEK_TEXT.as_bytes(), &config).await;
        assert!(third.cached);
        assert_eq!(third.method, Some(ExtractionMethod::Gpt));
        assert_eq!(calls.lock().unwrap().len(), 1);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_cache_key_tracks_document_bytes() {
        let calls = CallLog::default();
        let pipeline = text_pipeline()
            .with_structured(structured("ΤΙΜΟΛΟΓΙΟ", &calls))
            .with_cache(Arc::new(ResultCache::new()));
        let config = ExtractionConfig {
            enable_ai: false,
            enable_document_ai: true,
            ..ExtractionConfig::default()
        };

        let from_text = pipeline.extract_text(GREEK_TEXT, &config).await;
        assert_eq!(from_text.method, Some(ExtractionMethod::Pattern));

        let from_bytes = pipeline.extract_ranked(GREEK_TEXT.as_bytes(), &config).await;
        assert!(!from_bytes.cached);
        assert_eq!(from_bytes.method, Some(ExtractionMethod::DocumentAi));
        assert_eq!(*calls.lock().unwrap(), vec!["documentAi"]);
    }

    struct RefusingExtractor;

    impl TextExtractor for RefusingExtractor {
        fn extract_text(&self, _bytes: &[u8]) -> crate::pdf::Result<String> {
            Err(crate::error::PdfError::TextExtraction("already extracted".to_string()))
        }
    }

    #[tokio::test]
    async fn test_prepared_text_keeps_structured_tier() {
        let calls = CallLog::default();
        let pipeline = ExtractionPipeline::new(Arc::new(RefusingExtractor))
            .with_structured(structured("ΤΙΜΟΛΟΓΙΟ", &calls));
        let config = ExtractionConfig {
            enable_ai: false,
            enable_document_ai: true,
            ..ExtractionConfig::default()
        };

        let outcome = pipeline
            .extract_prepared(GREEK_TEXT, b"%PDF-1.5 original bytes", &config)
            .await;

        assert_eq!(*calls.lock().unwrap(), vec!["documentAi"]);
        assert_eq!(outcome.method, Some(ExtractionMethod::DocumentAi));
        assert_eq!(outcome.candidates.len(), 2);
        assert!(outcome.contains_greek);
    }

    /// One page whose content selects font `F1` but has no `/Resources`.
    fn pdf_without_resources() -> Vec<u8> {
        use lopdf::content::{Content, Operation};
        use lopdf::{dictionary, Document, Object, Stream};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal("ΑΦΜ 094019245")]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[tokio::test]
    async fn test_never_fails_on_pdf_without_resources() {
        let pipeline = ExtractionPipeline::new(Arc::new(PdfTextExtractor::new()));
        let config = ExtractionConfig {
            enable_ai: false,
            ..ExtractionConfig::default()
        };

        let outcome = pipeline.extract_ranked(&pdf_without_resources(), &config).await;

        assert!(outcome.data.is_unknown());
        assert_eq!(outcome.method, None);
        assert!(outcome.candidates.is_empty());
    }

    #[test]
    fn test_rank_is_stable_on_ties() {
        let data = DocumentData::unknown();
        let mut candidates = vec![
            ExtractionResult::new(data.clone(), 65, ExtractionMethod::Gpt),
            ExtractionResult::new(data.clone(), 90, ExtractionMethod::DocumentAi),
            ExtractionResult::new(data, 65, ExtractionMethod::Pattern),
        ];
        rank(&mut candidates);

        let methods: Vec<_> = candidates.iter().map(|c| c.method).collect();
        assert_eq!(
            methods,
            vec![ExtractionMethod::DocumentAi, ExtractionMethod::Gpt, ExtractionMethod::Pattern]
        );
    }

    #[test]
    fn test_accept_threshold() {
        let result = ExtractionResult::new(DocumentData::unknown(), 69, ExtractionMethod::Gpt);
        assert!(matches!(
            accept(result.clone(), 70),
            Err(ExtractionError::BelowThreshold { confidence: 69, threshold: 70 })
        ));
        assert!(accept(result, 69).is_ok());
    }
}
