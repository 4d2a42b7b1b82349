//! Dataset validation with detailed error and warning reporting.
//!
//! Schema validation runs before ingestion and is the only source of hard
//! failures. Dataset validation runs after ingestion and only ever produces
//! warnings and statistics, since every per-row anomaly is tolerated.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::domain::Dataset;
use crate::core::raw::RawTable;

/// Number of individual issues listed before a summary line is used instead.
const MAX_LISTED_ISSUES: usize = 5;

/// Validation result with categorized issues and statistics.
///
/// Errors make `is_valid` false, while warnings are informational and don't
/// fail validation.
///
/// # Examples
///
/// ```
/// use yt_analytics::preprocessing::validator::ValidationResult;
///
/// let mut result = ValidationResult::new();
/// assert!(result.is_valid);
///
/// result.add_warning("3 rows have zero views".to_string());
/// assert!(result.is_valid);
///
/// result.add_error("Missing required column: likes".to_string());
/// assert!(!result.is_valid);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

/// Summary statistics computed during validation.
///
/// * `total_rows` - Number of records validated
/// * `missing_timestamps` - Records excluded from time-based analysis
/// * `zero_view_rows` - Records whose engagement rate is undefined
/// * `duplicate_titles` - Records sharing a title with an earlier record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_rows: usize,
    pub missing_timestamps: usize,
    pub zero_view_rows: usize,
    pub duplicate_titles: usize,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Adds a critical error and marks the result as invalid.
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Adds a non-critical warning without invalidating the result.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for video performance data.
pub struct DatasetValidator;

impl DatasetValidator {
    /// Checks that every required column is present in the raw table.
    ///
    /// # Examples
    ///
    /// ```
    /// use yt_analytics::core::raw::RawTable;
    /// use yt_analytics::preprocessing::validator::DatasetValidator;
    ///
    /// let table = RawTable::new(vec!["title".into(), "views".into()], vec![]);
    /// let result = DatasetValidator::validate_schema(&table);
    /// assert!(!result.is_valid);
    /// assert_eq!(result.errors.len(), 4);
    /// ```
    pub fn validate_schema(table: &RawTable) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.stats.total_rows = table.len();

        for column in table.missing_columns() {
            result.add_error(format!("Missing required column: {}", column));
        }

        result
    }

    /// Collects data-quality statistics for an ingested dataset.
    pub fn validate_dataset(dataset: &Dataset) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.stats.total_rows = dataset.len();
        result.stats.missing_timestamps = dataset.missing_timestamp_count();
        result.stats.zero_view_rows = dataset.iter().filter(|r| r.views == 0).count();
        result.stats.duplicate_titles = Self::check_duplicate_titles(dataset, &mut result);

        if result.stats.missing_timestamps > 0 {
            result.add_warning(format!(
                "{} rows have no valid date and are excluded from date filtering",
                result.stats.missing_timestamps
            ));
        }

        if result.stats.zero_view_rows > 0 {
            result.add_warning(format!(
                "{} rows have zero views; their engagement rate is undefined",
                result.stats.zero_view_rows
            ));
        }

        result
    }

    fn check_duplicate_titles(dataset: &Dataset, result: &mut ValidationResult) -> usize {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for record in dataset.iter() {
            *seen.entry(record.title.as_str()).or_insert(0) += 1;
        }

        let mut duplicated: Vec<(&str, usize)> =
            seen.into_iter().filter(|(_, count)| *count > 1).collect();
        duplicated.sort();

        for (title, count) in duplicated.iter().take(MAX_LISTED_ISSUES) {
            result.add_warning(format!("Title '{}' appears {} times", title, count));
        }
        if duplicated.len() > MAX_LISTED_ISSUES {
            result.add_warning(format!(
                "Total duplicated titles: {} (showing first {})",
                duplicated.len(),
                MAX_LISTED_ISSUES
            ));
        }

        duplicated.iter().map(|(_, count)| count - 1).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::VideoRecord;
    use crate::core::raw::RawTable;
    use chrono::NaiveDate;

    #[test]
    fn test_schema_with_all_columns_is_valid() {
        let table = RawTable::with_required_columns(vec![]);
        let result = DatasetValidator::validate_schema(&table);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_schema_lists_each_missing_column() {
        let table = RawTable::new(
            vec![
                "title".into(),
                "views".into(),
                "comments".into(),
                "date".into(),
                "content_type".into(),
            ],
            vec![],
        );
        let result = DatasetValidator::validate_schema(&table);
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Missing required column: likes"]);
    }

    #[test]
    fn test_dataset_stats() {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0);
        let dataset = Dataset::new(vec![
            VideoRecord::new("A", 0, 1, 1, ts, "Shorts"),
            VideoRecord::new("A", 10, 1, 1, None, "Shorts"),
            VideoRecord::new("A", 10, 1, 1, ts, "Stream"),
            VideoRecord::new("B", 10, 1, 1, ts, "Stream"),
        ]);

        let result = DatasetValidator::validate_dataset(&dataset);
        assert!(result.is_valid);
        assert_eq!(
            result.stats,
            ValidationStats {
                total_rows: 4,
                missing_timestamps: 1,
                zero_view_rows: 1,
                duplicate_titles: 2,
            }
        );
        assert!(result.warnings.iter().any(|w| w.contains("'A' appears 3 times")));
    }

    #[test]
    fn test_clean_dataset_has_no_warnings() {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0);
        let dataset = Dataset::new(vec![VideoRecord::new("A", 10, 1, 1, ts, "Shorts")]);
        let result = DatasetValidator::validate_dataset(&dataset);
        assert!(result.warnings.is_empty());
    }
}
