//! Class/section/threshold filtering and top-N ranking.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::columns::{CLASS, PERCENTAGE, SECTION};
use crate::types::{DataSet, Value};

/// Label the dashboard uses for "no filter" on a categorical field.
pub const ALL: &str = "All";

/// A categorical filter choice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    /// Keep every value.
    #[default]
    All,
    /// Keep only cells whose text is exactly this (case-sensitive).
    Only(String),
}

impl Selection {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value.to_string() == *wanted,
        }
    }
}

impl From<&str> for Selection {
    fn from(s: &str) -> Self {
        if s == ALL {
            Selection::All
        } else {
            Selection::Only(s.to_string())
        }
    }
}

impl From<String> for Selection {
    fn from(s: String) -> Self {
        if s == ALL {
            Selection::All
        } else {
            Selection::Only(s)
        }
    }
}

/// Filter settings chosen in the front end.
///
/// The default keeps every row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Matched against the `Class` column.
    pub class: Selection,
    /// Matched against the `Section` column.
    pub section: Selection,
    /// Minimum `Percentage` (inclusive). `0` disables the threshold.
    pub min_percent: f64,
    /// Keep only the N best by `Percentage`. `None` and `Some(0)` disable ranking.
    pub top_n: Option<usize>,
}

impl FilterCriteria {
    /// Restrict to one class (`"All"` clears the restriction).
    pub fn with_class(mut self, class: impl Into<Selection>) -> Self {
        self.class = class.into();
        self
    }

    /// Restrict to one section (`"All"` clears the restriction).
    pub fn with_section(mut self, section: impl Into<Selection>) -> Self {
        self.section = section.into();
        self
    }

    /// Drop students below `min_percent`.
    pub fn with_min_percent(mut self, min_percent: f64) -> Self {
        self.min_percent = min_percent;
        self
    }

    /// Keep the `top_n` best students.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }
}

/// Returns a new [`DataSet`] narrowed by `criteria`. The input is never modified.
///
/// Steps, in order:
///
/// 1. `class` (skipped if there is no `Class` column)
/// 2. `section` (skipped if there is no `Section` column)
/// 3. `Percentage >= min_percent` when `min_percent > 0` (skipped without `Percentage`)
/// 4. stable sort by `Percentage` descending, then truncate to `top_n`
///    (skipped without `Percentage`)
///
/// # Examples
///
/// ```rust
/// use marks_analysis::processing::{filter, FilterCriteria};
/// use marks_analysis::types::{DataSet, DataType, Field, Schema, Value};
///
/// let ds = DataSet::new(
///     Schema::new(vec![
///         Field::new("Name", DataType::Utf8),
///         Field::new("Percentage", DataType::Float64),
///     ]),
///     vec![
///         vec![Value::Utf8("a".into()), Value::Float64(75.0)],
///         vec![Value::Utf8("b".into()), Value::Float64(45.0)],
///         vec![Value::Utf8("c".into()), Value::Float64(100.0)],
///     ],
/// );
/// let out = filter(&ds, &FilterCriteria::default().with_min_percent(50.0));
/// assert_eq!(out.row_count(), 2);
/// ```
pub fn filter(dataset: &DataSet, criteria: &FilterCriteria) -> DataSet {
    let mut out = filter_category(dataset, CLASS, &criteria.class);
    out = filter_category(&out, SECTION, &criteria.section);

    let Some(pct_idx) = out.schema.index_of(PERCENTAGE) else {
        log::debug!("no '{PERCENTAGE}' column; skipping threshold and ranking");
        return out;
    };

    if criteria.min_percent > 0.0 {
        out = out.filter_rows(|row| {
            row.get(pct_idx)
                .and_then(Value::as_f64)
                .is_some_and(|pct| pct >= criteria.min_percent)
        });
    }

    if let Some(n) = criteria.top_n.filter(|&n| n > 0) {
        out.rows.sort_by(|a, b| rank_order(&a[pct_idx], &b[pct_idx]));
        out.rows.truncate(n);
    }

    out
}

fn filter_category(dataset: &DataSet, column: &str, selection: &Selection) -> DataSet {
    if *selection == Selection::All {
        return dataset.clone();
    }
    match dataset.schema.index_of(column) {
        Some(idx) => dataset.filter_rows(|row| row.get(idx).is_some_and(|v| selection.matches(v))),
        None => {
            log::debug!("no '{column}' column; ignoring {selection:?}");
            dataset.clone()
        }
    }
}

/// Descending by numeric value; missing values last.
pub(crate) fn rank_order(a: &Value, b: &Value) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::{filter, FilterCriteria, Selection};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn sample_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("Name", DataType::Utf8),
            Field::new("Class", DataType::Int64),
            Field::new("Section", DataType::Utf8),
            Field::new("Percentage", DataType::Float64),
        ]);
        let row = |name: &str, class: i64, section: &str, pct: f64| {
            vec![
                Value::Utf8(name.to_string()),
                Value::Int64(class),
                Value::Utf8(section.to_string()),
                Value::Float64(pct),
            ]
        };
        DataSet::new(
            schema,
            vec![
                row("a", 10, "A", 75.0),
                row("b", 10, "B", 45.0),
                row("c", 9, "A", 100.0),
                row("d", 10, "A", 75.0),
                row("e", 9, "B", 30.0),
            ],
        )
    }

    fn names(ds: &DataSet) -> Vec<String> {
        ds.column("Name").map(|v| v.to_string()).collect()
    }

    #[test]
    fn default_criteria_keep_everything() {
        let ds = sample_dataset();
        assert_eq!(filter(&ds, &FilterCriteria::default()), ds);
    }

    #[test]
    fn class_and_section_match_exactly() {
        let ds = sample_dataset();
        let criteria = FilterCriteria::default().with_class("10").with_section("A");
        assert_eq!(names(&filter(&ds, &criteria)), vec!["a", "d"]);

        let lower = FilterCriteria::default().with_section("a");
        assert!(filter(&ds, &lower).is_empty());
    }

    #[test]
    fn all_label_is_no_filter() {
        assert_eq!(Selection::from("All"), Selection::All);
        assert_eq!(Selection::from("all"), Selection::Only("all".to_string()));
    }

    #[test]
    fn min_percent_is_inclusive() {
        let ds = sample_dataset();
        let out = filter(&ds, &FilterCriteria::default().with_min_percent(75.0));
        assert_eq!(names(&out), vec!["a", "c", "d"]);
    }

    #[test]
    fn top_n_sorts_descending_and_keeps_tie_order() {
        let ds = sample_dataset();
        let out = filter(&ds, &FilterCriteria::default().with_top_n(3));
        assert_eq!(names(&out), vec!["c", "a", "d"]);
    }

    #[test]
    fn top_n_zero_is_a_no_op() {
        let ds = sample_dataset();
        let out = filter(&ds, &FilterCriteria::default().with_top_n(0));
        assert_eq!(out, ds);
    }

    #[test]
    fn top_n_applies_after_other_filters() {
        let ds = sample_dataset();
        let criteria = FilterCriteria::default().with_class("9").with_top_n(1);
        assert_eq!(names(&filter(&ds, &criteria)), vec!["c"]);
    }

    #[test]
    fn filtering_twice_is_idempotent() {
        let ds = sample_dataset();
        let criteria = FilterCriteria::default()
            .with_section("A")
            .with_min_percent(50.0)
            .with_top_n(2);
        let once = filter(&ds, &criteria);
        assert_eq!(filter(&once, &criteria), once);
    }

    #[test]
    fn missing_columns_make_steps_no_ops() {
        let ds = sample_dataset().select(&["Name"]);
        let criteria = FilterCriteria::default()
            .with_class("10")
            .with_section("A")
            .with_min_percent(50.0)
            .with_top_n(1);
        assert_eq!(filter(&ds, &criteria), ds);
    }

    #[test]
    fn missing_percentages_fail_threshold_and_rank_last() {
        let mut ds = sample_dataset();
        ds.rows[0][3] = Value::Null;
        let ranked = filter(&ds, &FilterCriteria::default().with_top_n(5));
        assert_eq!(names(&ranked), vec!["c", "d", "b", "e", "a"]);

        let thresholded = filter(&ds, &FilterCriteria::default().with_min_percent(1.0));
        assert!(!names(&thresholded).contains(&"a".to_string()));
    }
}
