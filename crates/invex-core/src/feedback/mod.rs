//! User feedback on extraction results, aggregated per method.

use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::FeedbackError;
use crate::models::{DocumentData, DocumentField, ExtractionMethod, FeedbackConfig};

/// How many of the most frequent issues a metrics report lists.
pub const TOP_ISSUES: usize = 3;

/// One user rating of an extraction result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub timestamp: DateTime<Utc>,
    pub method: ExtractionMethod,
    /// 1 (useless) to 5 (perfect).
    pub rating: u8,
    pub original: DocumentData,
    pub corrected: DocumentData,
    /// Per-field correctness of `original`.
    pub field_accuracy: BTreeMap<DocumentField, bool>,
}

impl FeedbackEntry {
    pub fn new(
        original: DocumentData,
        corrected: DocumentData,
        rating: u8,
        method: ExtractionMethod,
    ) -> Result<Self, FeedbackError> {
        if !(1..=5).contains(&rating) {
            return Err(FeedbackError::InvalidRating(rating));
        }
        let field_accuracy = original.compare(&corrected);
        Ok(Self {
            timestamp: Utc::now(),
            method,
            rating,
            original,
            corrected,
            field_accuracy,
        })
    }

    /// Fields the user had to correct.
    pub fn incorrect_fields(&self) -> impl Iterator<Item = DocumentField> + '_ {
        self.field_accuracy
            .iter()
            .filter(|(_, correct)| !**correct)
            .map(|(field, _)| *field)
    }
}

/// Running counters for one method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodStats {
    pub total_ratings: u64,
    pub rating_sum: u64,
    /// How often each field was marked incorrect.
    pub issues: BTreeMap<DocumentField, u64>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl MethodStats {
    fn add(&mut self, entry: &FeedbackEntry) {
        self.total_ratings += 1;
        self.rating_sum += u64::from(entry.rating);
        for field in entry.incorrect_fields() {
            *self.issues.entry(field).or_default() += 1;
        }
        self.last_updated = Some(entry.timestamp);
    }
}

/// Read-side summary for one method.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodMetrics {
    pub average_rating: f64,
    pub total_ratings: u64,
    /// Most frequently corrected fields with their counts, most frequent
    /// first (field order on ties).
    pub common_issues: Vec<(DocumentField, u64)>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl From<&MethodStats> for MethodMetrics {
    fn from(stats: &MethodStats) -> Self {
        let average_rating = if stats.total_ratings == 0 {
            0.0
        } else {
            stats.rating_sum as f64 / stats.total_ratings as f64
        };

        let mut common_issues: Vec<(DocumentField, u64)> =
            stats.issues.iter().map(|(f, n)| (*f, *n)).collect();
        common_issues.sort_by(|a, b| b.1.cmp(&a.1));
        common_issues.truncate(TOP_ISSUES);

        Self {
            average_rating,
            total_ratings: stats.total_ratings,
            common_issues,
            last_updated: stats.last_updated,
        }
    }
}

/// Persisted form: the rolling log plus the counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct FeedbackStore {
    entries: VecDeque<FeedbackEntry>,
    stats: BTreeMap<ExtractionMethod, MethodStats>,
}

/// Records feedback into a bounded log and unbounded per-method counters,
/// optionally persisted as JSON.
#[derive(Debug)]
pub struct FeedbackTracker {
    path: Option<PathBuf>,
    max_entries: usize,
    store: FeedbackStore,
}

impl FeedbackTracker {
    /// Tracker that keeps everything in memory.
    pub fn in_memory(max_entries: usize) -> Self {
        Self {
            path: None,
            max_entries,
            store: FeedbackStore::default(),
        }
    }

    /// Open the store at `config.path`, starting empty if it does not exist.
    pub fn open(config: &FeedbackConfig) -> Result<Self, FeedbackError> {
        let store = if config.path.exists() {
            let content = std::fs::read_to_string(&config.path)
                .map_err(|e| FeedbackError::Storage(format!("{}: {e}", config.path.display())))?;
            serde_json::from_str(&content)
                .map_err(|e| FeedbackError::Storage(format!("{}: {e}", config.path.display())))?
        } else {
            debug!(path = %config.path.display(), "no feedback store yet");
            FeedbackStore::default()
        };

        Ok(Self {
            path: Some(config.path.clone()),
            max_entries: config.max_entries,
            store,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Add an entry, trim the log, and persist when backed by a file.
    pub fn record(&mut self, entry: FeedbackEntry) -> Result<(), FeedbackError> {
        self.store
            .stats
            .entry(entry.method)
            .or_default()
            .add(&entry);

        info!(method = %entry.method, rating = entry.rating, "feedback recorded");
        self.store.entries.push_back(entry);
        while self.store.entries.len() > self.max_entries {
            self.store.entries.pop_front();
        }

        self.save()
    }

    fn save(&self) -> Result<(), FeedbackError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(&self.store)
            .map_err(|e| FeedbackError::Storage(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| FeedbackError::Storage(format!("{}: {e}", parent.display())))?;
        }
        std::fs::write(path, content)
            .map_err(|e| FeedbackError::Storage(format!("{}: {e}", path.display())))
    }

    /// Metrics for one method; zeroed when it has no feedback.
    pub fn metrics(&self, method: ExtractionMethod) -> MethodMetrics {
        self.store
            .stats
            .get(&method)
            .map(MethodMetrics::from)
            .unwrap_or_else(|| MethodMetrics::from(&MethodStats::default()))
    }

    /// Metrics for every method that has feedback.
    pub fn all_metrics(&self) -> BTreeMap<ExtractionMethod, MethodMetrics> {
        self.store
            .stats
            .iter()
            .map(|(m, s)| (*m, MethodMetrics::from(s)))
            .collect()
    }

    /// The rolling log, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &FeedbackEntry> {
        self.store.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn corrected(fields: &[DocumentField]) -> (DocumentData, DocumentData) {
        let original = DocumentData::unknown();
        let mut fixed = original.clone();
        for field in fields {
            match field {
                DocumentField::VatNumber => fixed.vat_number = "123456789".to_string(),
                DocumentField::Supplier => fixed.supplier = "Acme".to_string(),
                DocumentField::Date => fixed.date = "2000-01-01".to_string(),
                DocumentField::DocumentNumber => fixed.document_number = "7".to_string(),
                _ => {}
            }
        }
        (original, fixed)
    }

    fn entry(rating: u8, method: ExtractionMethod, fields: &[DocumentField]) -> FeedbackEntry {
        let (original, fixed) = corrected(fields);
        FeedbackEntry::new(original, fixed, rating, method).unwrap()
    }

    #[test]
    fn test_rating_is_validated() {
        let (a, b) = corrected(&[]);
        assert!(matches!(
            FeedbackEntry::new(a.clone(), b.clone(), 0, ExtractionMethod::Gpt),
            Err(FeedbackError::InvalidRating(0))
        ));
        assert!(matches!(
            FeedbackEntry::new(a, b, 6, ExtractionMethod::Gpt),
            Err(FeedbackError::InvalidRating(6))
        ));
    }

    #[test]
    fn test_entry_marks_incorrect_fields() {
        let e = entry(3, ExtractionMethod::Pattern, &[DocumentField::VatNumber]);
        let wrong: Vec<_> = e.incorrect_fields().collect();
        assert_eq!(wrong, vec![DocumentField::VatNumber]);
    }

    #[test]
    fn test_metrics_aggregate_per_method() {
        use DocumentField::*;

        let mut tracker = FeedbackTracker::in_memory(50);
        tracker.record(entry(5, ExtractionMethod::Gpt, &[])).unwrap();
        tracker.record(entry(2, ExtractionMethod::Gpt, &[VatNumber, Date])).unwrap();
        tracker.record(entry(2, ExtractionMethod::Gpt, &[Date, Supplier])).unwrap();
        tracker.record(entry(1, ExtractionMethod::Gpt, &[DocumentNumber, Date, VatNumber])).unwrap();
        tracker.record(entry(4, ExtractionMethod::Pattern, &[])).unwrap();

        let gpt = tracker.metrics(ExtractionMethod::Gpt);
        assert_eq!(gpt.total_ratings, 4);
        assert_eq!(gpt.average_rating, 2.5);
        assert_eq!(gpt.common_issues, vec![(Date, 3), (VatNumber, 2), (Supplier, 1)]);
        assert!(gpt.last_updated.is_some());

        assert_eq!(tracker.metrics(ExtractionMethod::Pattern).total_ratings, 1);

        let none = tracker.metrics(ExtractionMethod::DocumentAi);
        assert_eq!(none.total_ratings, 0);
        assert_eq!(none.average_rating, 0.0);
        assert_eq!(none.last_updated, None);
        assert_eq!(tracker.all_metrics().len(), 2);
    }

    #[test]
    fn test_log_is_bounded_but_counters_are_not() {
        let mut tracker = FeedbackTracker::in_memory(3);
        for rating in [1, 2, 3, 4, 5] {
            tracker.record(entry(rating, ExtractionMethod::Pattern, &[])).unwrap();
        }

        let ratings: Vec<u8> = tracker.entries().map(|e| e.rating).collect();
        assert_eq!(ratings, vec![3, 4, 5]);
        assert_eq!(tracker.metrics(ExtractionMethod::Pattern).total_ratings, 5);
    }

    #[test]
    fn test_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let config = FeedbackConfig {
            path: dir.path().join("feedback.json"),
            max_entries: 50,
        };

        let mut tracker = FeedbackTracker::open(&config).unwrap();
        tracker
            .record(entry(4, ExtractionMethod::DocumentAi, &[DocumentField::Supplier]))
            .unwrap();

        let reloaded = FeedbackTracker::open(&config).unwrap();
        let metrics = reloaded.metrics(ExtractionMethod::DocumentAi);
        assert_eq!(metrics.total_ratings, 1);
        assert_eq!(metrics.common_issues, vec![(DocumentField::Supplier, 1)]);
        assert_eq!(reloaded.entries().count(), 1);
    }

    #[test]
    fn test_first_record_creates_store_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = FeedbackConfig {
            path: dir.path().join("invex").join("feedback.json"),
            max_entries: 50,
        };

        let mut tracker = FeedbackTracker::open(&config).unwrap();
        tracker
            .record(entry(5, ExtractionMethod::Gpt, &[]))
            .unwrap();

        assert!(config.path.exists());
    }

    #[test]
    fn test_corrupt_store_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback.json");
        std::fs::write(&path, "not json").unwrap();

        let config = FeedbackConfig {
            path,
            max_entries: 50,
        };
        assert!(matches!(
            FeedbackTracker::open(&config),
            Err(FeedbackError::Storage(_))
        ));
    }
}
