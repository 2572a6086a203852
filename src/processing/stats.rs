//! Scalar KPIs over the `Percentage` column.

use std::cmp::Ordering;

use serde::Serialize;

use crate::columns::PERCENTAGE;
use crate::types::DataSet;

use super::round2;

/// Percentage at or above which a student passes.
pub const PASS_MARK: f64 = 40.0;

/// Headline statistics for a set of students. All values are rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StatsSummary {
    /// Mean percentage.
    pub avg: f64,
    /// Median percentage (mean of the two middle values for even counts).
    pub median: f64,
    /// Highest percentage.
    pub highest: f64,
    /// Share of students at or above [`PASS_MARK`], as a percentage.
    pub pass_rate: f64,
}

/// Summarize the `Percentage` column. Never fails.
///
/// Returns the all-zero summary for an empty dataset, a dataset without a `Percentage`
/// column, or one whose percentages are all missing. Missing percentages are ignored for
/// avg/median/highest but still count (as not passing) in the pass rate.
pub fn summarize(dataset: &DataSet) -> StatsSummary {
    if dataset.is_empty() {
        return StatsSummary::default();
    }
    let Some(idx) = dataset.schema.index_of(PERCENTAGE) else {
        return StatsSummary::default();
    };

    let values: Vec<f64> = dataset.reduce_rows(Vec::new(), |mut acc, row| {
        if let Some(v) = row.get(idx).and_then(|v| v.as_f64()) {
            acc.push(v);
        }
        acc
    });
    if values.is_empty() {
        return StatsSummary::default();
    }

    let avg = values.iter().sum::<f64>() / values.len() as f64;
    let highest = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let passed = values.iter().filter(|&&v| v >= PASS_MARK).count();
    let pass_rate = passed as f64 / dataset.row_count() as f64 * 100.0;

    StatsSummary {
        avg: round2(avg),
        median: round2(median(&values)),
        highest: round2(highest),
        pass_rate: round2(pass_rate),
    }
}

/// Median; 0 for an empty slice.
pub(crate) fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[(n / 2) - 1] + sorted[n / 2]) / 2.0
    }
}
