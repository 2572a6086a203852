use thiserror::Error;

/// Convenience result type used across the crate.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Error type returned by loading, subject detection and export.
///
/// Missing optional columns and missing scores are never errors; they are filled or skipped
/// by the stage that meets them.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The input could not be read as CSV (unequal row lengths, invalid UTF-8, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "excel")]
    /// Spreadsheet read error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// The input was readable but has no usable tabular structure.
    #[error("malformed table: {message}")]
    Malformed { message: String },

    /// The input format could not be determined or is not enabled.
    #[error("unsupported format: {message}")]
    UnsupportedFormat { message: String },

    /// No numeric subject columns remain after excluding identity/derived fields.
    #[error("no numeric subject columns detected (excluded: {excluded:?})")]
    NoSubjectColumns { excluded: Vec<String> },

    /// Spreadsheet serialization failed.
    #[error("export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}

impl AnalysisError {
    /// True when the raw input could not be parsed as tabular data.
    ///
    /// I/O errors surfaced through the CSV reader are not parse errors.
    pub fn is_parse_error(&self) -> bool {
        match self {
            AnalysisError::Csv(err) => !matches!(err.kind(), csv::ErrorKind::Io(_)),
            #[cfg(feature = "excel")]
            AnalysisError::Excel(_) => true,
            AnalysisError::Malformed { .. } => true,
            _ => false,
        }
    }
}
