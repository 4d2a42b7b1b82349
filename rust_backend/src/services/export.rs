use crate::core::domain::FilteredView;
use crate::error::ExportError;
use crate::parsing::write_view_csv;

/// Suggested file name for downloaded exports.
pub const EXPORT_FILENAME: &str = "youtube_analysis.csv";

/// MIME type of exported data.
pub const EXPORT_MIME: &str = "text/csv";

/// Serialize a view, engagement rates included, to CSV with a header row.
pub fn export_csv(view: &FilteredView) -> Result<Vec<u8>, ExportError> {
    let bytes = write_view_csv(view)?;
    log::debug!("Exported {} records ({} bytes)", view.len(), bytes.len());
    Ok(bytes)
}
