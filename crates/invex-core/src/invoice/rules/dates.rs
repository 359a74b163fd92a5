//! Invoice date extraction and ISO normalization.

use chrono::NaiveDate;

use super::patterns::DATE_RULES;
use super::FieldExtractor;

/// Date field extractor.
///
/// Values are normalized to `YYYY-MM-DD`; when that is impossible the raw
/// matched text is kept.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        DATE_RULES
            .iter()
            .find_map(|pattern| pattern.captures(text).map(|caps| normalize_date(&caps[1])))
    }
}

/// Normalize a `D/M/Y`, `D-M-YY` or `Y.M.D` style date to `YYYY-MM-DD`.
///
/// A four-digit first segment means year-first. Otherwise the date is read
/// day-first and a two-digit year gets a `20` prefix. Anything that does not
/// form a real calendar date is returned unchanged.
pub fn normalize_date(raw: &str) -> String {
    try_normalize(raw).unwrap_or_else(|| raw.to_string())
}

/// Whether `raw` reads as a real calendar date.
pub(crate) fn is_calendar_date(raw: &str) -> bool {
    try_normalize(raw).is_some()
}

fn try_normalize(raw: &str) -> Option<String> {
    let parts: Vec<&str> = raw.trim().split(['-', '/', '.']).collect();
    let [first, second, third] = parts.as_slice() else {
        return None;
    };

    let (year, month, day) = if first.len() == 4 {
        (first.to_string(), *second, *third)
    } else {
        let year = if third.len() == 2 {
            format!("20{third}")
        } else {
            third.to_string()
        };
        (year, *second, *first)
    };

    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// Extract the invoice date, normalized when possible.
pub fn extract_date(text: &str) -> Option<String> {
    DateExtractor::new().extract(text)
}
