//! Error types for ingestion, export and configuration.
//!
//! Only structural problems are errors. Per-row anomalies are reported as
//! [`RowParseWarning`]s next to a successfully ingested dataset.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Result type for ingestion operations
pub type IngestResult<T> = Result<T, IngestError>;

/// Structurally invalid input. No partial dataset is ever returned with one.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// One or more required columns are absent from the source entirely.
    #[error("Missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// A row could not be interpreted as a record at all (e.g. a JSON scalar).
    #[error("Malformed row {index}: {reason}")]
    MalformedRow { index: usize, reason: String },

    /// The CSV payload could not be read as a table.
    #[error("CSV error: {0}")]
    Csv(String),

    /// The JSON payload is not valid JSON or not an array of rows.
    #[error("JSON error: {0}")]
    Json(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    pub fn missing_columns(missing: Vec<String>) -> Self {
        Self::MissingColumns { missing }
    }

    pub fn malformed_row(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            index,
            reason: reason.into(),
        }
    }

    pub fn csv(message: impl fmt::Display) -> Self {
        Self::Csv(message.to_string())
    }

    pub fn json(message: impl fmt::Display) -> Self {
        Self::Json(message.to_string())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure while serializing a view to CSV.
#[derive(Debug, thiserror::Error)]
#[error("Export error: {0}")]
pub struct ExportError(pub String);

impl From<polars::prelude::PolarsError> for ExportError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        ExportError(err.to_string())
    }
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("No analytics.toml found in standard locations")]
    NotFound,
}

/// Field of a row that failed coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowField {
    Title,
    Views,
    Comments,
    Likes,
    Date,
    ContentType,
}

impl RowField {
    pub fn column(self) -> &'static str {
        match self {
            RowField::Title => "title",
            RowField::Views => "views",
            RowField::Comments => "comments",
            RowField::Likes => "likes",
            RowField::Date => "date",
            RowField::ContentType => "content_type",
        }
    }
}

/// Non-fatal per-row coercion problem. The row is kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowParseWarning {
    /// Zero-based row index in the source table
    pub row: usize,
    pub field: RowField,
    /// Offending raw value as text
    pub value: String,
    pub reason: String,
}

impl RowParseWarning {
    pub fn new(row: usize, field: RowField, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            row,
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for RowParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}: {} '{}' {}",
            self.row,
            self.field.column(),
            self.value,
            self.reason
        )
    }
}
