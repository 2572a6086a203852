//! Per-student Total, Percentage and Grade.

use serde::{Deserialize, Serialize};

use crate::columns::{GRADE, PERCENTAGE, TOTAL};
use crate::types::{DataSet, DataType, Field, Value};

use super::grade::grade;
use super::round2;
use super::subjects::SubjectColumns;

/// Maximum score for a single subject.
pub const MAX_SUBJECT_SCORE: f64 = 100.0;

/// How missing subject scores count toward a student's Total and Percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingPolicy {
    /// A missing score is a 0; the maximum is `100 × subject count` for everyone.
    #[default]
    ZeroFill,
    /// Missing scores are left out; the maximum is `100 × scores present` for that student.
    SkipMissing,
}

impl MissingPolicy {
    /// Map the dashboard's "treat missing as zero" toggle onto a policy.
    pub fn from_treat_missing_as_zero(treat_missing_as_zero: bool) -> Self {
        if treat_missing_as_zero {
            MissingPolicy::ZeroFill
        } else {
            MissingPolicy::SkipMissing
        }
    }
}

/// Score of one student before storage rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RowScore {
    total: f64,
    percentage: f64,
}

/// Returns a new [`DataSet`] with `Total`, `Percentage` and `Grade` computed for every row.
///
/// - Subjects missing from the dataset entirely are appended as `Float64` columns of `0.0`.
/// - Non-numeric and null subject cells are missing scores, handled per `policy`.
/// - `Total` is stored as `Int64` (fractional sums truncate); `Percentage` is rounded to
///   2 decimals; `Grade` is the letter for the rounded percentage.
/// - Existing `Total` / `Percentage` / `Grade` columns are overwritten in place; otherwise
///   they are appended in that order.
pub fn aggregate(dataset: &DataSet, subjects: &SubjectColumns, policy: MissingPolicy) -> DataSet {
    let mut out = dataset.clone();
    let n = out.row_count();

    for name in subjects.iter() {
        if !out.schema.contains(name) {
            log::debug!("subject column '{name}' absent; filling with 0.0");
            out.set_column(
                Field::new(name, DataType::Float64),
                vec![Value::Float64(0.0); n],
            );
        }
    }

    let idxs: Vec<usize> = subjects
        .iter()
        .filter_map(|name| out.schema.index_of(name))
        .collect();

    let mut totals = Vec::with_capacity(n);
    let mut percentages = Vec::with_capacity(n);
    let mut grades = Vec::with_capacity(n);
    for row in &out.rows {
        let score = score_row(row, &idxs, policy);
        let pct = round2(score.percentage);
        totals.push(Value::Int64(score.total.trunc() as i64));
        percentages.push(Value::Float64(pct));
        grades.push(Value::Utf8(grade(pct).to_string()));
    }

    out.set_column(Field::new(TOTAL, DataType::Int64), totals);
    out.set_column(Field::new(PERCENTAGE, DataType::Float64), percentages);
    out.set_column(Field::new(GRADE, DataType::Utf8), grades);
    out
}

fn score_row(row: &[Value], idxs: &[usize], policy: MissingPolicy) -> RowScore {
    let present: Vec<f64> = idxs
        .iter()
        .filter_map(|&i| row.get(i).and_then(Value::as_f64))
        .collect();
    let total: f64 = present.iter().sum();

    let max_total = match policy {
        MissingPolicy::ZeroFill => MAX_SUBJECT_SCORE * idxs.len() as f64,
        MissingPolicy::SkipMissing => MAX_SUBJECT_SCORE * present.len() as f64,
    };
    let percentage = if max_total > 0.0 {
        total / max_total * 100.0
    } else {
        0.0
    };

    RowScore { total, percentage }
}
