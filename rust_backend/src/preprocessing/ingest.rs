//! Type coercion of raw tables into datasets.
//!
//! Ingestion is all-or-nothing only at the structural level: a table missing a
//! required column is rejected, but a bad cell never aborts the batch. Bad
//! cells are replaced with a neutral value (null timestamp, zero count, empty
//! text) and reported as a [`RowParseWarning`].

use log::{debug, warn};

use crate::core::domain::{Dataset, VideoRecord};
use crate::core::raw::{RawRow, RawTable, RawValue};
use crate::error::{IngestError, IngestResult, RowField, RowParseWarning};
use crate::preprocessing::validator::DatasetValidator;
use crate::time::parse_timestamp;

/// Number of row warnings echoed individually to the log.
const LOGGED_WARNINGS: usize = 10;

/// A freshly ingested dataset and the per-row problems met on the way.
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    pub dataset: Dataset,
    pub warnings: Vec<RowParseWarning>,
}

/// Coerce a raw table into typed records.
///
/// Derived time features are not populated here; see
/// [`derive_time_features`](crate::preprocessing::enricher::derive_time_features).
///
/// # Errors
///
/// [`IngestError::MissingColumns`] when any required column is absent.
pub fn ingest(table: RawTable) -> IngestResult<IngestOutcome> {
    let schema = DatasetValidator::validate_schema(&table);
    if !schema.is_valid {
        return Err(IngestError::missing_columns(table.missing_columns()));
    }

    let mut warnings = Vec::new();
    let records: Vec<VideoRecord> = table
        .rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| coerce_row(index, row, &mut warnings))
        .collect();

    for warning in warnings.iter().take(LOGGED_WARNINGS) {
        debug!("Row parse warning: {}", warning);
    }
    if !warnings.is_empty() {
        warn!(
            "Ingested {} rows with {} row-level warnings",
            records.len(),
            warnings.len()
        );
    }

    Ok(IngestOutcome {
        dataset: Dataset::new(records),
        warnings,
    })
}

fn coerce_row(index: usize, row: RawRow, warnings: &mut Vec<RowParseWarning>) -> VideoRecord {
    let title = coerce_text(index, RowField::Title, row.title, warnings);
    let views = coerce_count(index, RowField::Views, &row.views, warnings);
    let comments = coerce_count(index, RowField::Comments, &row.comments, warnings);
    let likes = coerce_count(index, RowField::Likes, &row.likes, warnings);
    let timestamp = coerce_timestamp(index, &row.date, warnings);
    let content_type = coerce_text(index, RowField::ContentType, row.content_type, warnings);

    VideoRecord::new(title, views, comments, likes, timestamp, content_type)
}

fn coerce_text(
    index: usize,
    field: RowField,
    value: RawValue,
    warnings: &mut Vec<RowParseWarning>,
) -> String {
    match value {
        RawValue::Text(s) if !s.trim().is_empty() => s,
        RawValue::Int(i) => i.to_string(),
        RawValue::UInt(u) => u.to_string(),
        RawValue::Float(x) => x.to_string(),
        other => {
            warnings.push(RowParseWarning::new(index, field, other.to_string(), "is missing"));
            String::new()
        }
    }
}

fn coerce_count(
    index: usize,
    field: RowField,
    value: &RawValue,
    warnings: &mut Vec<RowParseWarning>,
) -> u64 {
    match parse_count(value) {
        Ok(CountValue::Exact(n)) => n,
        Ok(CountValue::Rounded(n)) => {
            warnings.push(RowParseWarning::new(
                index,
                field,
                value.to_string(),
                format!("is not a whole number; rounded to {}", n),
            ));
            n
        }
        Err(reason) => {
            warnings.push(RowParseWarning::new(
                index,
                field,
                value.to_string(),
                format!("{}; using 0", reason),
            ));
            0
        }
    }
}

fn coerce_timestamp(
    index: usize,
    value: &RawValue,
    warnings: &mut Vec<RowParseWarning>,
) -> Option<chrono::NaiveDateTime> {
    let reason = match value {
        RawValue::Text(s) if !s.trim().is_empty() => match parse_timestamp(s) {
            Some(ts) => return Some(ts),
            None => "is not a recognised date-time",
        },
        RawValue::Int(_) | RawValue::UInt(_) | RawValue::Float(_) => "is not a recognised date-time",
        _ => "is missing",
    };

    warnings.push(RowParseWarning::new(index, RowField::Date, value.to_string(), reason));
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountValue {
    Exact(u64),
    Rounded(u64),
}

/// Interpret a raw cell as a non-negative count.
///
/// Integers, integral floats (`120.0`) and numeric text are exact. Fractional
/// values are rounded to the nearest integer.
fn parse_count(value: &RawValue) -> Result<CountValue, &'static str> {
    match value {
        RawValue::Int(i) => u64::try_from(*i)
            .map(CountValue::Exact)
            .map_err(|_| "is negative"),
        RawValue::UInt(u) => Ok(CountValue::Exact(*u)),
        RawValue::Float(x) => count_from_float(*x),
        RawValue::Text(s) if !s.trim().is_empty() => {
            let s = s.trim();
            if let Ok(n) = s.parse::<u64>() {
                return Ok(CountValue::Exact(n));
            }
            match s.parse::<f64>() {
                Ok(x) => count_from_float(x),
                Err(_) => Err("is not a number"),
            }
        }
        _ => Err("is missing"),
    }
}

fn count_from_float(x: f64) -> Result<CountValue, &'static str> {
    if !x.is_finite() {
        return Err("is not a number");
    }
    let rounded = x.round();
    if rounded < 0.0 {
        return Err("is negative");
    }
    if rounded >= u64::MAX as f64 {
        return Err("is out of range");
    }
    if rounded == x {
        Ok(CountValue::Exact(rounded as u64))
    } else {
        Ok(CountValue::Rounded(rounded as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::raw::REQUIRED_COLUMNS;
    use chrono::{NaiveDate, Timelike};

    fn row(views: RawValue, date: RawValue) -> RawRow {
        RawRow {
            title: "A".into(),
            views,
            comments: RawValue::Int(5),
            likes: RawValue::Int(10),
            date,
            content_type: "Shorts".into(),
        }
    }

    #[test]
    fn test_ingest_clean_row() {
        let table = RawTable::with_required_columns(vec![row(
            RawValue::from("100"),
            RawValue::from("2025-01-01 10:00"),
        )]);

        let outcome = ingest(table).unwrap();
        assert!(outcome.warnings.is_empty());

        let record = &outcome.dataset.records()[0];
        assert_eq!(record.title, "A");
        assert_eq!(record.views, 100);
        assert_eq!(record.comments, 5);
        assert_eq!(record.likes, 10);
        assert_eq!(record.content_type, "Shorts");
        assert_eq!(record.timestamp.unwrap().hour(), 10);
        assert!(record.day_of_week.is_none());
        assert!(record.engagement_rate.is_none());
    }

    #[test]
    fn test_bad_date_keeps_row() {
        let table = RawTable::with_required_columns(vec![
            row(RawValue::Int(1), RawValue::from("someday")),
            row(RawValue::Int(2), RawValue::Null),
        ]);

        let outcome = ingest(table).unwrap();
        assert_eq!(outcome.dataset.len(), 2);
        assert!(outcome.dataset.iter().all(|r| r.timestamp.is_none()));
        assert_eq!(outcome.warnings.len(), 2);
        assert_eq!(outcome.warnings[0].field, RowField::Date);
        assert_eq!(outcome.warnings[0].row, 0);
        assert_eq!(outcome.warnings[1].reason, "is missing");
    }

    #[test]
    fn test_missing_columns_is_fatal() {
        let columns = REQUIRED_COLUMNS
            .iter()
            .filter(|c| **c != "views")
            .map(|c| c.to_string())
            .collect();
        let table = RawTable::new(columns, vec![RawRow::default()]);

        match ingest(table) {
            Err(IngestError::MissingColumns { missing }) => assert_eq!(missing, vec!["views"]),
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(parse_count(&RawValue::Int(7)), Ok(CountValue::Exact(7)));
        assert_eq!(parse_count(&RawValue::Float(120.0)), Ok(CountValue::Exact(120)));
        assert_eq!(parse_count(&RawValue::from(" 42 ")), Ok(CountValue::Exact(42)));
        assert_eq!(parse_count(&RawValue::from("3.0")), Ok(CountValue::Exact(3)));
        assert_eq!(parse_count(&RawValue::from("2.6")), Ok(CountValue::Rounded(3)));
        assert_eq!(parse_count(&RawValue::Int(-1)), Err("is negative"));
        assert_eq!(parse_count(&RawValue::UInt(u64::MAX)), Ok(CountValue::Exact(u64::MAX)));
        assert_eq!(parse_count(&RawValue::Float(1e30)), Err("is out of range"));
        assert_eq!(parse_count(&RawValue::from("many")), Err("is not a number"));
        assert_eq!(parse_count(&RawValue::from("NaN")), Err("is not a number"));
        assert_eq!(parse_count(&RawValue::Null), Err("is missing"));
    }

    #[test]
    fn test_bad_counts_become_zero_with_warning() {
        let table = RawTable::with_required_columns(vec![row(
            RawValue::from("lots"),
            RawValue::from("2025-01-01"),
        )]);

        let outcome = ingest(table).unwrap();
        assert_eq!(outcome.dataset.records()[0].views, 0);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].field, RowField::Views);
    }

    #[test]
    fn test_numeric_title_is_stringified() {
        let mut raw = row(RawValue::Int(1), RawValue::from("2025-01-01"));
        raw.title = RawValue::Int(2024);
        let outcome = ingest(RawTable::with_required_columns(vec![raw])).unwrap();
        assert_eq!(outcome.dataset.records()[0].title, "2024");
        assert_eq!(
            outcome.dataset.records()[0].date(),
            NaiveDate::from_ymd_opt(2025, 1, 1)
        );
    }
}
