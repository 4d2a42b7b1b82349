//! Loosely-typed input rows.
//!
//! Every data source (uploaded CSV, JSON rows, the demo generator) is first
//! converted into a [`RawTable`]; ingestion then coerces it into typed
//! [`VideoRecord`](super::domain::VideoRecord)s.

use serde_json::Value;
use std::fmt;

/// Columns every input table must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = ["title", "views", "comments", "likes", "date", "content_type"];

/// A single untyped cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    #[default]
    Null,
    Text(String),
    Int(i64),
    /// Integers above `i64::MAX`, kept exact.
    UInt(u64),
    Float(f64),
}

impl RawValue {
    /// `true` for `Null` and for text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => f.write_str("null"),
            RawValue::Text(s) => f.write_str(s),
            RawValue::Int(i) => write!(f, "{}", i),
            RawValue::UInt(u) => write!(f, "{}", u),
            RawValue::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        RawValue::Int(i)
    }
}

impl From<f64> for RawValue {
    fn from(x: f64) -> Self {
        RawValue::Float(x)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Null)
    }
}

impl From<&Value> for RawValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => RawValue::Null,
            Value::String(s) => RawValue::Text(s.clone()),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RawValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    RawValue::UInt(u)
                } else {
                    n.as_f64().map(RawValue::Float).unwrap_or(RawValue::Null)
                }
            }
            other => RawValue::Text(other.to_string()),
        }
    }
}

/// One input row with the six schema fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    pub title: RawValue,
    pub views: RawValue,
    pub comments: RawValue,
    pub likes: RawValue,
    pub date: RawValue,
    pub content_type: RawValue,
}

impl RawRow {
    /// Mutable access to a schema field by column name.
    pub fn field_mut(&mut self, column: &str) -> Option<&mut RawValue> {
        match column {
            "title" => Some(&mut self.title),
            "views" => Some(&mut self.views),
            "comments" => Some(&mut self.comments),
            "likes" => Some(&mut self.likes),
            "date" => Some(&mut self.date),
            "content_type" => Some(&mut self.content_type),
            _ => None,
        }
    }
}

/// Rows plus the column names the source actually provided.
///
/// Column presence is tracked separately from the rows so that a table whose
/// source lacks e.g. `likes` entirely can be told apart from one where some
/// `likes` cells are empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { columns, rows }
    }

    /// Table declaring every required column.
    pub fn with_required_columns(rows: Vec<RawRow>) -> Self {
        Self {
            columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Required columns absent from this table, in schema order.
    pub fn missing_columns(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|c| !self.has_column(c))
            .map(|c| c.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_value_from_json() {
        assert_eq!(RawValue::from(&json!(12)), RawValue::Int(12));
        assert_eq!(RawValue::from(&json!(1.5)), RawValue::Float(1.5));
        assert_eq!(RawValue::from(&json!(u64::MAX)), RawValue::UInt(u64::MAX));
        assert_eq!(RawValue::from(&json!(-3)), RawValue::Int(-3));
        assert_eq!(RawValue::from(&json!("x")), RawValue::Text("x".to_string()));
        assert_eq!(RawValue::from(&json!(null)), RawValue::Null);
        assert_eq!(RawValue::from(&json!(true)), RawValue::Text("true".to_string()));
    }

    #[test]
    fn test_blank_values() {
        assert!(RawValue::Null.is_blank());
        assert!(RawValue::from("   ").is_blank());
        assert!(!RawValue::Int(0).is_blank());
    }

    #[test]
    fn test_missing_columns() {
        let table = RawTable::new(
            vec!["title".to_string(), "views".to_string(), "date".to_string()],
            vec![],
        );
        assert_eq!(table.missing_columns(), vec!["comments", "likes", "content_type"]);
        assert!(RawTable::with_required_columns(vec![]).missing_columns().is_empty());
    }
}
