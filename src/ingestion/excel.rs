#![cfg(feature = "excel")]

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::DataSet;

use super::infer::{RawCell, RawTable};

/// Load a spreadsheet (`.xlsx`, `.xls`, `.ods`, etc.) into an in-memory `DataSet`.
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row
/// - Skips rows with no non-empty cells
/// - Infers column types the same way the CSV loader does
pub fn load_excel_from_path(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
) -> AnalysisResult<DataSet> {
    let mut workbook = open_workbook_auto(path)?;
    load_from_workbook(&mut workbook, sheet_name)
}

/// Load a spreadsheet held in memory (e.g. an uploaded `.xlsx`).
pub fn load_excel_from_bytes(bytes: &[u8], sheet_name: Option<&str>) -> AnalysisResult<DataSet> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    load_from_workbook(&mut workbook, sheet_name)
}

fn load_from_workbook<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    sheet_name: Option<&str>,
) -> AnalysisResult<DataSet> {
    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| AnalysisError::Malformed {
                message: "workbook has no sheets".to_string(),
            })?,
    };

    let range = workbook.worksheet_range(&sheet)?;
    let table = read_sheet_range(&sheet, &range)?;
    let ds = table.into_dataset();
    log::debug!(
        "loaded sheet '{sheet}': rows={} columns={}",
        ds.row_count(),
        ds.schema.fields.len()
    );
    Ok(ds)
}

fn read_sheet_range(sheet: &str, range: &calamine::Range<Data>) -> AnalysisResult<RawTable> {
    let mut rows = range
        .rows()
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)));

    let header = rows.next().ok_or_else(|| AnalysisError::Malformed {
        message: format!("sheet '{sheet}' has no non-empty rows (no header row found)"),
    })?;

    Ok(RawTable {
        headers: header.iter().map(cell_to_header_string).collect(),
        rows: rows.map(|row| row.iter().map(convert_cell).collect()).collect(),
    })
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn convert_cell(c: &Data) -> RawCell {
    match c {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::String(s) => RawCell::from_text(s),
        Data::Int(i) => RawCell::Int(*i),
        Data::Float(f) => RawCell::Number(*f),
        Data::Bool(b) => RawCell::Bool(*b),
        other => RawCell::Text(other.to_string()),
    }
}
