//! Unified loading entrypoints.
//!
//! Most callers should use [`load_from_path`] (sample data, files on disk) or [`load_upload`]
//! (an uploaded file's name plus its bytes).
//!
//! - If [`LoadOptions::format`] is `None`, the format is inferred from the file extension.
//! - If a [`super::observability::LoadObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::DataSet;

use super::csv;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Supported tabular input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma-separated values, UTF-8, header row.
    Csv,
    /// Spreadsheet/workbook formats (loading is feature-gated behind `excel`).
    Excel,
}

impl TableFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Parse a format from a file name such as `marks.xlsx`.
    pub fn from_file_name(name: &str) -> Option<Self> {
        Path::new(name)
            .extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
    }
}

/// Options controlling unified loading behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<TableFormat>,
    /// Spreadsheet sheet to read. `None` reads the first sheet.
    pub sheet: Option<String>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("sheet", &self.sheet)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            sheet: None,
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load a mark sheet from disk.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use marks_analysis::ingestion::{load_from_path, LoadOptions};
///
/// # fn main() -> Result<(), marks_analysis::AnalysisError> {
/// // Uses `.csv` to select CSV loading.
/// let ds = load_from_path("data/sample_marks.csv", &LoadOptions::default())?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
///
/// Force a format when the file has no (or a misleading) extension:
///
/// ```no_run
/// use marks_analysis::ingestion::{load_from_path, LoadOptions, TableFormat};
///
/// # fn main() -> Result<(), marks_analysis::AnalysisError> {
/// let opts = LoadOptions {
///     format: Some(TableFormat::Csv),
///     ..Default::default()
/// };
/// let ds = load_from_path("marks_export", &opts)?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> AnalysisResult<DataSet> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let ctx = LoadContext {
        source: path.display().to_string(),
        format,
    };

    let result = match format {
        TableFormat::Csv => csv::load_csv_from_path(path),
        TableFormat::Excel => load_excel_path_dispatch(path, options.sheet.as_deref()),
    };

    report(options, &ctx, result)
}

/// Load a mark sheet held in memory, in a known format.
pub fn load_from_bytes(
    bytes: &[u8],
    format: TableFormat,
    options: &LoadOptions,
) -> AnalysisResult<DataSet> {
    let ctx = LoadContext {
        source: "<memory>".to_string(),
        format,
    };
    report(options, &ctx, load_bytes_dispatch(bytes, format, options))
}

/// Load an uploaded file, inferring the format from its name unless `options.format` is set.
pub fn load_upload(
    file_name: &str,
    bytes: &[u8],
    options: &LoadOptions,
) -> AnalysisResult<DataSet> {
    let format = match options.format {
        Some(f) => f,
        None => TableFormat::from_file_name(file_name).ok_or_else(|| {
            AnalysisError::UnsupportedFormat {
                message: format!("cannot infer format from upload name '{file_name}'"),
            }
        })?,
    };
    let ctx = LoadContext {
        source: file_name.to_string(),
        format,
    };
    report(options, &ctx, load_bytes_dispatch(bytes, format, options))
}

fn load_bytes_dispatch(
    bytes: &[u8],
    format: TableFormat,
    options: &LoadOptions,
) -> AnalysisResult<DataSet> {
    match format {
        TableFormat::Csv => csv::load_csv_from_bytes(bytes),
        TableFormat::Excel => load_excel_bytes_dispatch(bytes, options.sheet.as_deref()),
    }
}

fn report(
    options: &LoadOptions,
    ctx: &LoadContext,
    result: AnalysisResult<DataSet>,
) -> AnalysisResult<DataSet> {
    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(ds) => obs.on_success(
                ctx,
                LoadStats {
                    rows: ds.row_count(),
                    columns: ds.schema.fields.len(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(ctx, sev, e);
                }
            }
        }
    }
    result
}

fn severity_for_error(e: &AnalysisError) -> LoadSeverity {
    match e {
        AnalysisError::Io(_) => LoadSeverity::Critical,
        AnalysisError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        #[cfg(feature = "excel")]
        AnalysisError::Excel(calamine::Error::Io(_)) => LoadSeverity::Critical,
        #[cfg(feature = "excel")]
        AnalysisError::Excel(_) => LoadSeverity::Error,
        AnalysisError::Malformed { .. }
        | AnalysisError::UnsupportedFormat { .. }
        | AnalysisError::NoSubjectColumns { .. } => LoadSeverity::Error,
        AnalysisError::Export(_) => LoadSeverity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> AnalysisResult<TableFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| AnalysisError::UnsupportedFormat {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    TableFormat::from_extension(ext).ok_or_else(|| AnalysisError::UnsupportedFormat {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

fn load_excel_path_dispatch(path: &Path, sheet: Option<&str>) -> AnalysisResult<DataSet> {
    // Avoid unused warnings when the feature is off.
    let _ = (path, sheet);

    #[cfg(feature = "excel")]
    {
        super::excel::load_excel_from_path(path, sheet)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(excel_disabled())
    }
}

fn load_excel_bytes_dispatch(bytes: &[u8], sheet: Option<&str>) -> AnalysisResult<DataSet> {
    let _ = (bytes, sheet);

    #[cfg(feature = "excel")]
    {
        super::excel::load_excel_from_bytes(bytes, sheet)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(excel_disabled())
    }
}

#[cfg(not(feature = "excel"))]
fn excel_disabled() -> AnalysisError {
    AnalysisError::UnsupportedFormat {
        message: "spreadsheet loading not enabled (enable cargo feature 'excel')".to_string(),
    }
}
