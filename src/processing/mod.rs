//! In-memory mark-sheet transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by loading.
//! Every function here is pure: it borrows its input and returns a new value.
//!
//! - [`SubjectColumns::detect`]: decide which columns are graded subjects
//! - [`aggregate()`]: per-student Total, Percentage and Grade under a [`MissingPolicy`]
//! - [`grade()`]: percentage → [`Grade`]
//! - [`filter()`]: class/section/threshold filtering and top-N ranking
//! - [`summarize()`]: avg/median/highest/pass-rate KPIs
//! - [`insights`]: filter choices, subject averages, correlation, leaderboard, student detail
//!
//! ## Example: aggregate → filter → summarize
//!
//! ```rust
//! use marks_analysis::processing::{
//!     aggregate, filter, summarize, FilterCriteria, MissingPolicy, SchemaConfig, SubjectColumns,
//! };
//! use marks_analysis::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("StudentID", DataType::Int64),
//!     Field::new("Math", DataType::Int64),
//!     Field::new("Science", DataType::Int64),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(1), Value::Int64(80), Value::Int64(70)],
//!         vec![Value::Int64(2), Value::Int64(50), Value::Int64(40)],
//!         vec![Value::Int64(3), Value::Int64(100), Value::Int64(100)],
//!     ],
//! );
//!
//! let subjects = SubjectColumns::detect(&ds.schema, &SchemaConfig::default()).unwrap();
//! let graded = aggregate(&ds, &subjects, MissingPolicy::ZeroFill);
//! let passing = filter(&graded, &FilterCriteria::default().with_min_percent(50.0));
//! assert_eq!(passing.row_count(), 2);
//!
//! let stats = summarize(&graded);
//! assert_eq!(stats.avg, 73.33);
//! assert_eq!(stats.pass_rate, 100.0);
//! ```

pub mod aggregate;
pub mod filter;
pub mod grade;
pub mod insights;
pub mod stats;
pub mod subjects;

pub use aggregate::{aggregate, MissingPolicy};
pub use filter::{filter, FilterCriteria, Selection};
pub use grade::{grade, grade_value, Grade};
pub use insights::{
    filter_options, find_student, subject_averages, subject_correlation, top_students,
    CorrelationMatrix, FilterOptions, StudentRecord,
};
pub use stats::{summarize, StatsSummary, PASS_MARK};
pub use subjects::{SchemaConfig, SubjectColumns};

/// Round half away from zero to 2 decimal places.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
