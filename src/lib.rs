//! `marks-analysis` turns a student mark sheet (CSV or spreadsheet) into an in-memory
//! [`types::DataSet`], derives per-student totals, percentages and letter grades, and offers
//! the filtering, ranking, KPIs and export a dashboard needs.
//!
//! ## Pipeline
//!
//! 1. [`ingestion`]: load a sheet, infer column types, guarantee `StudentID` and `Name`
//! 2. [`processing::SubjectColumns::detect`]: decide once which numeric columns are subjects
//! 3. [`processing::aggregate()`]: `Total`, `Percentage`, `Grade` under a
//!    [`processing::MissingPolicy`]
//! 4. [`processing::filter()`]: class / section / minimum percentage / top-N
//! 5. [`processing::summarize()`] and [`export::export()`] on the filtered rows
//!
//! [`gradebook::Gradebook`] bundles these steps as owned per-session state.
//!
//! ## Quick example
//!
//! ```no_run
//! use marks_analysis::gradebook::Gradebook;
//! use marks_analysis::ingestion::LoadOptions;
//! use marks_analysis::processing::{FilterCriteria, MissingPolicy, SchemaConfig};
//!
//! # fn main() -> Result<(), marks_analysis::AnalysisError> {
//! let book = Gradebook::open(
//!     "data/sample_marks.csv",
//!     &LoadOptions::default(),
//!     &SchemaConfig::default(),
//!     MissingPolicy::ZeroFill,
//! )?;
//!
//! let criteria = FilterCriteria::default().with_class("10").with_top_n(5);
//! let stats = book.summary(&criteria);
//! println!("avg={} median={} pass_rate={}", stats.avg, stats.median, stats.pass_rate);
//!
//! let files = book.export(&criteria)?;
//! files.save_to_dir(".")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Unreadable input and sheets without numeric subjects are reported as [`AnalysisError`].
//! Missing optional columns (`Class`, `Section`, `StudentID`, `Name`) and missing scores are
//! never errors: they are synthesized, skipped or handled by the missing-score policy.
//!
//! ## Modules
//!
//! - [`ingestion`]: unified loading entrypoints and format-specific implementations
//! - [`types`]: schema + in-memory dataset types
//! - [`processing`]: aggregation, grading, filtering, statistics and derived views
//! - [`export`]: CSV and XLSX serialization
//! - [`gradebook`]: per-session state
//! - [`columns`]: recognized column names
//! - [`error`]: error types

pub mod columns;
pub mod error;
pub mod export;
pub mod gradebook;
pub mod ingestion;
pub mod processing;
pub mod types;

pub use error::{AnalysisError, AnalysisResult};
