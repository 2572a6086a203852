//! Derived views the front end renders: filter choices, per-subject averages, subject
//! correlation, the top-students table and a single student's detail record.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::columns::{CLASS, GRADE, NAME, PERCENTAGE, SECTION, STUDENT_ID, TOTAL};
use crate::types::{DataSet, Value};

use super::filter::{rank_order, ALL};
use super::grade::{grade_value, Grade};
use super::subjects::SubjectColumns;

/// Choices for the class/section pickers: `All` followed by the sorted distinct values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Class picker entries.
    pub classes: Vec<String>,
    /// Section picker entries.
    pub sections: Vec<String>,
}

/// Picker choices for `dataset`; only `All` where the column is absent.
pub fn filter_options(dataset: &DataSet) -> FilterOptions {
    FilterOptions {
        classes: options_for(dataset, CLASS),
        sections: options_for(dataset, SECTION),
    }
}

fn options_for(dataset: &DataSet, column: &str) -> Vec<String> {
    let mut values: Vec<&Value> = dataset.column(column).filter(|v| !v.is_null()).collect();
    values.sort_by(|a, b| option_order(a, b));
    let mut labels: Vec<String> = values.into_iter().map(Value::to_string).collect();
    labels.dedup();
    std::iter::once(ALL.to_string()).chain(labels).collect()
}

/// Numbers by value, ahead of text sorted lexically.
fn option_order(a: &Value, b: &Value) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_string().cmp(&b.to_string()),
    }
}

/// Mean score per subject, ignoring missing scores. `None` when a subject has no scores.
pub fn subject_averages(dataset: &DataSet, subjects: &SubjectColumns) -> Vec<(String, Option<f64>)> {
    subjects
        .iter()
        .map(|name| {
            let scores: Vec<f64> = dataset.column(name).filter_map(Value::as_f64).collect();
            let avg = if scores.is_empty() {
                None
            } else {
                Some(scores.iter().sum::<f64>() / scores.len() as f64)
            };
            (name.to_string(), avg)
        })
        .collect()
}

/// Pairwise Pearson correlation between subjects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    /// Row and column labels.
    pub subjects: Vec<String>,
    /// `values[i][j]` correlates `subjects[i]` with `subjects[j]`; `None` where undefined
    /// (fewer than two shared scores, or a constant subject).
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Correlation of subjects `a` and `b`; `None` if undefined or either is unknown.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.subjects.iter().position(|s| s == a)?;
        let j = self.subjects.iter().position(|s| s == b)?;
        self.values[i][j]
    }
}

/// Correlate every pair of subjects over the rows where both scores are present.
pub fn subject_correlation(dataset: &DataSet, subjects: &SubjectColumns) -> CorrelationMatrix {
    let columns: Vec<Vec<Option<f64>>> = subjects
        .iter()
        .map(|name| match dataset.schema.index_of(name) {
            Some(idx) => dataset.rows.iter().map(|row| row[idx].as_f64()).collect(),
            None => vec![None; dataset.row_count()],
        })
        .collect();

    let values = columns
        .iter()
        .map(|a| columns.iter().map(|b| pearson(a, b)).collect())
        .collect();

    CorrelationMatrix {
        subjects: subjects.names().to_vec(),
        values,
    }
}

fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

/// The leaderboard: identity, grouping and score columns (those present), best first.
///
/// Ties keep their input order.
pub fn top_students(dataset: &DataSet, n: usize) -> DataSet {
    let mut out = dataset.select(&[STUDENT_ID, CLASS, NAME, SECTION, PERCENTAGE, TOTAL]);
    if let Some(idx) = out.schema.index_of(PERCENTAGE) {
        out.rows.sort_by(|a, b| rank_order(&a[idx], &b[idx]));
    }
    out.rows.truncate(n);
    out
}

/// One student's scores and derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    pub student_id: Option<i64>,
    pub name: String,
    pub class: Option<String>,
    pub section: Option<String>,
    /// Score per subject, `None` where missing.
    pub scores: BTreeMap<String, Option<f64>>,
    pub total: Option<i64>,
    pub percentage: Option<f64>,
    pub grade: Grade,
}

impl StudentRecord {
    /// Build the record for row `idx`. Returns `None` if the row does not exist.
    pub fn from_row(dataset: &DataSet, subjects: &SubjectColumns, idx: usize) -> Option<Self> {
        let row = dataset.rows.get(idx)?;
        let cell = |name: &str| dataset.schema.index_of(name).map(|i| &row[i]);
        let text = |name: &str| cell(name).filter(|v| !v.is_null()).map(Value::to_string);

        let scores = subjects
            .iter()
            .map(|s| (s.to_string(), cell(s).and_then(Value::as_f64)))
            .collect();
        let percentage = cell(PERCENTAGE).and_then(Value::as_f64);
        let grade = match cell(GRADE).and_then(Value::as_str) {
            Some(label) => label.parse().unwrap_or(Grade::NotAvailable),
            None => cell(PERCENTAGE).map_or(Grade::NotAvailable, grade_value),
        };

        Some(Self {
            student_id: cell(STUDENT_ID).and_then(|v| match v {
                Value::Int64(i) => Some(*i),
                _ => None,
            }),
            name: text(NAME).unwrap_or_default(),
            class: text(CLASS),
            section: text(SECTION),
            scores,
            total: cell(TOTAL).and_then(Value::as_f64).map(|t| t as i64),
            percentage,
            grade,
        })
    }
}

/// Detail record for the first student with exactly this name.
pub fn find_student(dataset: &DataSet, subjects: &SubjectColumns, name: &str) -> Option<StudentRecord> {
    let idx = dataset.schema.index_of(NAME)?;
    let row = dataset
        .rows
        .iter()
        .position(|r| r[idx].as_str() == Some(name))?;
    StudentRecord::from_row(dataset, subjects, row)
}
