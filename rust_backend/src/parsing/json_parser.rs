use serde_json::Value;
use std::path::Path;

use crate::core::raw::{RawRow, RawTable, RawValue, REQUIRED_COLUMNS};
use crate::error::{IngestError, IngestResult};

/// Parse a JSON file containing an array of row objects.
pub fn parse_video_json(json_path: &Path) -> IngestResult<RawTable> {
    let content =
        std::fs::read_to_string(json_path).map_err(|e| IngestError::io(json_path, e))?;
    parse_video_json_str(&content)
}

/// Parse a JSON string containing an array of row objects.
pub fn parse_video_json_str(json_str: &str) -> IngestResult<RawTable> {
    let value: Value = serde_json::from_str(json_str).map_err(IngestError::json)?;
    match value {
        Value::Array(rows) => parse_video_rows(&rows),
        other => Err(IngestError::json(format!(
            "expected an array of row objects, found {}",
            json_kind(&other)
        ))),
    }
}

/// Convert already-decoded JSON rows into a raw table.
///
/// A column counts as present when at least one row carries the key; rows
/// lacking it get a null cell. An empty array yields an empty table that
/// declares the full schema, since there is nothing structurally wrong with it.
pub fn parse_video_rows(rows: &[Value]) -> IngestResult<RawTable> {
    if rows.is_empty() {
        return Ok(RawTable::with_required_columns(Vec::new()));
    }

    let mut columns: Vec<String> = Vec::new();
    let mut parsed = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let object = row.as_object().ok_or_else(|| {
            IngestError::malformed_row(index, format!("expected an object, found {}", json_kind(row)))
        })?;

        for key in object.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }

        let mut raw = RawRow::default();
        for name in REQUIRED_COLUMNS {
            if let (Some(value), Some(slot)) = (object.get(name), raw.field_mut(name)) {
                *slot = RawValue::from(value);
            }
        }
        parsed.push(raw);
    }

    Ok(RawTable::new(columns, parsed))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
