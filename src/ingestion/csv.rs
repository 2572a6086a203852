//! CSV loading.

use std::io::Read;
use std::path::Path;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::DataSet;

use super::infer::{RawCell, RawTable};

/// Load a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - The first row is the header row; header names are trimmed.
/// - A record shorter than the header is padded with missing cells; a longer one is an error.
/// - Column types are inferred (see [`crate::ingestion`]).
/// - `StudentID` / `Name` are synthesized when absent.
pub fn load_csv_from_path(path: impl AsRef<Path>) -> AnalysisResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    load_csv_from_reader(&mut rdr)
}

/// Load CSV data held in memory (e.g. an uploaded file).
pub fn load_csv_from_bytes(bytes: &[u8]) -> AnalysisResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    load_csv_from_reader(&mut rdr)
}

/// Load CSV data from an existing CSV reader.
///
/// Short records are only accepted if `rdr` was built with `flexible(true)`.
pub fn load_csv_from_reader<R: Read>(rdr: &mut csv::Reader<R>) -> AnalysisResult<DataSet> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(AnalysisError::Malformed {
            message: "no header row found".to_string(),
        });
    }

    let mut table = RawTable {
        headers: headers.iter().map(str::to_owned).collect(),
        rows: Vec::new(),
    };
    for result in rdr.records() {
        let record = result?;
        if record.len() > headers.len() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(AnalysisError::Malformed {
                message: format!(
                    "line {line}: expected at most {} fields, found {}",
                    headers.len(),
                    record.len()
                ),
            });
        }
        table
            .rows
            .push(record.iter().map(RawCell::from_text).collect());
    }

    let ds = table.into_dataset();
    log::debug!(
        "loaded csv: rows={} columns={}",
        ds.row_count(),
        ds.schema.fields.len()
    );
    Ok(ds)
}
