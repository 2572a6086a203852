//! Export of a (usually filtered) [`DataSet`] as CSV and XLSX bytes.
//!
//! Both serializations carry the same header and row order and no index column. The CSV
//! loads back into an identical dataset; the workbook loads back with the same names,
//! order and values, except that integral floats come back as integers (a spreadsheet
//! number has no integer/float distinction).

pub mod csv;
pub mod xlsx;

use std::fs;
use std::path::Path;

use crate::error::AnalysisResult;
use crate::types::DataSet;

pub use self::csv::to_csv_bytes;
pub use self::xlsx::{to_xlsx_bytes, SHEET_NAME};

/// Download formats offered to the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// Fixed download file name.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "students_filtered.csv",
            ExportFormat::Xlsx => "students_filtered.xlsx",
        }
    }

    /// MIME type for the download.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

/// The two serializations of one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    /// UTF-8 CSV.
    pub csv: Vec<u8>,
    /// Single-sheet workbook.
    pub xlsx: Vec<u8>,
}

impl ExportBundle {
    /// The serialization for `format`.
    pub fn bytes(&self, format: ExportFormat) -> &[u8] {
        match format {
            ExportFormat::Csv => &self.csv,
            ExportFormat::Xlsx => &self.xlsx,
        }
    }

    /// Write both files into `dir` under their fixed names.
    pub fn save_to_dir(&self, dir: impl AsRef<Path>) -> AnalysisResult<()> {
        let dir = dir.as_ref();
        for format in [ExportFormat::Csv, ExportFormat::Xlsx] {
            fs::write(dir.join(format.file_name()), self.bytes(format))?;
        }
        Ok(())
    }
}

/// Serialize `dataset` to CSV and XLSX.
pub fn export(dataset: &DataSet) -> AnalysisResult<ExportBundle> {
    let bundle = ExportBundle {
        csv: to_csv_bytes(dataset)?,
        xlsx: to_xlsx_bytes(dataset)?,
    };
    log::debug!(
        "exported rows={} csv_bytes={} xlsx_bytes={}",
        dataset.row_count(),
        bundle.csv.len(),
        bundle.xlsx.len()
    );
    Ok(bundle)
}
