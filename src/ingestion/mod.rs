//! Loading entrypoints and implementations.
//!
//! Most callers should use [`load_from_path`] or [`load_upload`] (from [`unified`]) which:
//!
//! - auto-detect the format by file extension (or you can override via [`LoadOptions`])
//! - load into an in-memory [`crate::types::DataSet`] with inferred column types
//! - optionally report success/failure/alerts to a [`LoadObserver`]
//!
//! Column types are inferred per column: blank cells are `Null`; a column whose remaining cells
//! are all integers is `Int64`, else all numbers is `Float64`, else all `true`/`false` is `Bool`,
//! else `Utf8`. A column with no values at all is `Float64`.
//!
//! Every loaded dataset has a `StudentID` and a `Name` column; missing ones are synthesized
//! (`1..=n` and `Student {n}`).
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - `excel` (requires the `excel` feature)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
mod infer;
pub mod observability;
pub mod unified;

pub use observability::{
    CompositeObserver, FileObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats,
    LogObserver, StdErrObserver,
};
pub use unified::{load_from_bytes, load_from_path, load_upload, LoadOptions, TableFormat};
