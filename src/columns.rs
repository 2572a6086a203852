//! Recognized column names.
//!
//! Everything else in a mark sheet is either a subject score (numeric) or carried through
//! untouched.

/// Unique integer identity; synthesized as `1..=n` when absent.
pub const STUDENT_ID: &str = "StudentID";
/// Display name; synthesized as `Student {n}` when absent.
pub const NAME: &str = "Name";
/// Optional grouping field.
pub const CLASS: &str = "Class";
/// Optional grouping field.
pub const SECTION: &str = "Section";
/// Derived whole-number sum of subject scores.
pub const TOTAL: &str = "Total";
/// Derived percentage of the maximum possible total, rounded to 2 decimals.
pub const PERCENTAGE: &str = "Percentage";
/// Derived letter grade. Recomputed by aggregation if present in the input.
pub const GRADE: &str = "Grade";
