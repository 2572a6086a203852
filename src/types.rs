//! Core data model types.
//!
//! Loaders produce an in-memory [`DataSet`] whose [`Schema`] (a list of typed [`Field`]s) is
//! inferred from the input. Every later stage (aggregation, filtering, summarizing, export)
//! consumes and produces the same shape.

use std::fmt;

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

impl DataType {
    /// Whether values of this type are numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int64 | DataType::Float64)
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A list of fields describing the shape of a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns true if a field with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value. Non-numeric values and NaN yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    /// String slice for [`Value::Utf8`] values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Text rendering used for CSV cells and for categorical comparisons.
///
/// Floats always carry a decimal point or exponent so they reload as floats.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v:?}"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Utf8(s) => f.write_str(s),
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// A dataset with the given schema and no rows.
    pub fn empty(schema: Schema) -> Self {
        Self::new(schema, Vec::new())
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate the values of one column. Yields nothing if the column does not exist.
    pub fn column<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Value> + 'a {
        let idx = self.schema.index_of(name);
        self.rows
            .iter()
            .filter_map(move |row| idx.and_then(|i| row.get(i)))
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset keeps the input schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Reduce (fold) all rows into an accumulator value.
    ///
    /// This is similar to `Iterator::fold`, but provides each row as `&[Value]`.
    pub fn reduce_rows<A, F>(&self, init: A, mut reducer: F) -> A
    where
        F: FnMut(A, &[Value]) -> A,
    {
        self.rows
            .iter()
            .fold(init, |acc, row| reducer(acc, row.as_slice()))
    }

    /// Insert a column at `position` (clamped to the field count).
    ///
    /// # Panics
    ///
    /// Panics if `values` does not hold exactly one value per row.
    pub fn insert_column(&mut self, position: usize, field: Field, values: Vec<Value>) {
        assert!(
            values.len() == self.rows.len(),
            "column '{}' has {} values for {} rows",
            field.name,
            values.len(),
            self.rows.len()
        );
        let position = position.min(self.schema.fields.len());
        self.schema.fields.insert(position, field);
        for (row, v) in self.rows.iter_mut().zip(values) {
            row.insert(position, v);
        }
    }

    /// Replace the column named `field.name` in place, or append it if absent.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not hold exactly one value per row.
    pub fn set_column(&mut self, field: Field, values: Vec<Value>) {
        match self.schema.index_of(&field.name) {
            Some(idx) => {
                assert!(
                    values.len() == self.rows.len(),
                    "column '{}' has {} values for {} rows",
                    field.name,
                    values.len(),
                    self.rows.len()
                );
                self.schema.fields[idx] = field;
                for (row, v) in self.rows.iter_mut().zip(values) {
                    row[idx] = v;
                }
            }
            None => {
                let end = self.schema.fields.len();
                self.insert_column(end, field, values);
            }
        }
    }

    /// Project onto the named columns, in the given order. Unknown names are skipped.
    pub fn select(&self, names: &[&str]) -> Self {
        let idxs: Vec<usize> = names
            .iter()
            .filter_map(|n| self.schema.index_of(n))
            .collect();
        let schema = Schema::new(idxs.iter().map(|&i| self.schema.fields[i].clone()).collect());
        let rows = self
            .rows
            .iter()
            .map(|row| idxs.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Self::new(schema, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSet, DataType, Field, Schema, Value};

    fn sample_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("StudentID", DataType::Int64),
            Field::new("Name", DataType::Utf8),
            Field::new("Math", DataType::Float64),
        ]);
        DataSet::new(
            schema,
            vec![
                vec![Value::Int64(1), Value::Utf8("Ada".to_string()), Value::Float64(80.0)],
                vec![Value::Int64(2), Value::Utf8("Grace".to_string()), Value::Null],
            ],
        )
    }

    #[test]
    fn schema_index_of_works() {
        let ds = sample_dataset();
        assert_eq!(ds.schema.index_of("StudentID"), Some(0));
        assert_eq!(ds.schema.index_of("Math"), Some(2));
        assert_eq!(ds.schema.index_of("missing"), None);
    }

    #[test]
    fn display_keeps_floats_distinguishable_from_ints() {
        assert_eq!(Value::Float64(75.0).to_string(), "75.0");
        assert_eq!(Value::Float64(73.33).to_string(), "73.33");
        assert_eq!(Value::Int64(150).to_string(), "150");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Bool(true).to_string(), "True");
    }

    #[test]
    fn set_column_overwrites_in_place_or_appends() {
        let mut ds = sample_dataset();
        ds.set_column(
            Field::new("Math", DataType::Int64),
            vec![Value::Int64(1), Value::Int64(2)],
        );
        assert_eq!(ds.schema.index_of("Math"), Some(2));
        assert_eq!(ds.schema.fields[2].data_type, DataType::Int64);

        ds.set_column(
            Field::new("Grade", DataType::Utf8),
            vec![Value::Utf8("A".into()), Value::Utf8("F".into())],
        );
        assert_eq!(ds.schema.index_of("Grade"), Some(3));
        assert_eq!(ds.rows[1][3], Value::Utf8("F".into()));
    }

    #[test]
    #[should_panic(expected = "has 1 values for 2 rows")]
    fn insert_column_panics_on_wrong_length() {
        let mut ds = sample_dataset();
        ds.insert_column(0, Field::new("x", DataType::Int64), vec![Value::Int64(1)]);
    }

    #[test]
    fn select_projects_and_skips_unknown_columns() {
        let ds = sample_dataset();
        let out = ds.select(&["Math", "missing", "Name"]);
        assert_eq!(out.schema.field_names().collect::<Vec<_>>(), vec!["Math", "Name"]);
        assert_eq!(out.rows[0], vec![Value::Float64(80.0), Value::Utf8("Ada".to_string())]);
    }

    #[test]
    fn column_iterates_values_or_nothing() {
        let ds = sample_dataset();
        assert_eq!(ds.column("Math").count(), 2);
        assert_eq!(ds.column("nope").count(), 0);
    }
}
