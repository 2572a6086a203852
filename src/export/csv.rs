//! CSV serialization.

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::DataSet;

/// Serialize `dataset` as UTF-8 CSV: a header row of field names, then one record per row.
///
/// Cells use [`crate::types::Value`]'s `Display` text, so integer and float columns keep their
/// types when loaded back. No index column is written.
pub fn to_csv_bytes(dataset: &DataSet) -> AnalysisResult<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    wtr.write_record(dataset.schema.field_names())?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }

    wtr.into_inner()
        .map_err(|e| AnalysisError::Io(e.into_error()))
}
