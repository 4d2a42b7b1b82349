use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

use crate::core::domain::FilteredView;
use crate::core::raw::{RawRow, RawTable, RawValue, REQUIRED_COLUMNS};
use crate::error::{ExportError, IngestError, IngestResult};
use crate::time::format_timestamp;

/// Column order of exported views: the source schema followed by derived fields.
pub const EXPORT_COLUMNS: [&str; 9] = [
    "title",
    "views",
    "comments",
    "likes",
    "date",
    "content_type",
    "day_of_week",
    "hour",
    "engagement_rate",
];

/// Parse a CSV file into a raw table.
pub fn parse_video_csv(csv_path: &Path) -> IngestResult<RawTable> {
    let bytes = std::fs::read(csv_path).map_err(|e| IngestError::io(csv_path, e))?;
    parse_video_csv_bytes(&bytes)
}

/// Parse CSV bytes (e.g. an upload body) into a raw table.
///
/// Every column is read as text (`infer_schema_length = 0`) so that coercion
/// of numbers and dates happens row by row during ingestion, where a bad cell
/// only produces a warning instead of failing the whole file.
pub fn parse_video_csv_bytes(bytes: &[u8]) -> IngestResult<RawTable> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .map_err(IngestError::csv)?;

    dataframe_to_raw_table(&df)
}

/// Convert a Polars DataFrame into a raw table.
///
/// Columns outside the schema are listed in `columns` but otherwise ignored.
pub fn dataframe_to_raw_table(df: &DataFrame) -> IngestResult<RawTable> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut rows = vec![RawRow::default(); df.height()];

    for name in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == name) {
            continue;
        }

        let column = df
            .column(name)
            .and_then(|c| c.cast(&DataType::String))
            .map_err(IngestError::csv)?;
        let values = column.str().map_err(IngestError::csv)?;

        for (row, value) in rows.iter_mut().zip(values) {
            if let Some(slot) = row.field_mut(name) {
                *slot = RawValue::from(value);
            }
        }
    }

    Ok(RawTable::new(columns, rows))
}

/// Convert a filtered view to a DataFrame with [`EXPORT_COLUMNS`].
pub fn view_to_dataframe(view: &FilteredView) -> PolarsResult<DataFrame> {
    let n = view.len();

    let mut titles = Vec::with_capacity(n);
    let mut views = Vec::with_capacity(n);
    let mut comments = Vec::with_capacity(n);
    let mut likes = Vec::with_capacity(n);
    let mut dates = Vec::with_capacity(n);
    let mut content_types = Vec::with_capacity(n);
    let mut days = Vec::with_capacity(n);
    let mut hours = Vec::with_capacity(n);
    let mut rates = Vec::with_capacity(n);

    for record in view.iter() {
        titles.push(record.title.clone());
        views.push(record.views);
        comments.push(record.comments);
        likes.push(record.likes);
        dates.push(record.timestamp.as_ref().map(format_timestamp));
        content_types.push(record.content_type.clone());
        days.push(record.day_of_week.map(|d| d.name().to_string()));
        hours.push(record.hour_of_day);
        rates.push(record.engagement_rate);
    }

    df!(
        "title" => titles,
        "views" => views,
        "comments" => comments,
        "likes" => likes,
        "date" => dates,
        "content_type" => content_types,
        "day_of_week" => days,
        "hour" => hours,
        "engagement_rate" => rates,
    )
}

/// Serialize a filtered view as CSV with a header row. Nulls become empty fields.
pub fn write_view_csv(view: &FilteredView) -> Result<Vec<u8>, ExportError> {
    let mut df = view_to_dataframe(view)?;
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut df)?;
    Ok(buffer)
}
