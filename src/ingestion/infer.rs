//! Column type inference shared by the CSV and spreadsheet loaders.
//!
//! Loaders collect header names plus untyped [`RawCell`]s; [`RawTable::into_dataset`] then
//! decides one [`DataType`] per column and guarantees the identity columns.

use crate::columns::{NAME, STUDENT_ID};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// An untyped cell as read from the source.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawCell {
    Empty,
    Text(String),
    Int(i64),
    Number(f64),
    Bool(bool),
}

impl RawCell {
    /// Text cells that are blank after trimming are treated as missing.
    pub(crate) fn from_text(s: &str) -> Self {
        if s.trim().is_empty() {
            RawCell::Empty
        } else {
            RawCell::Text(s.to_owned())
        }
    }

    fn as_int(&self) -> Option<i64> {
        match self {
            RawCell::Int(i) => Some(*i),
            RawCell::Number(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 => {
                Some(*f as i64)
            }
            RawCell::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            RawCell::Int(i) => Some(*i as f64),
            RawCell::Number(f) => Some(*f),
            RawCell::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            RawCell::Bool(b) => Some(*b),
            RawCell::Text(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("true") {
                    Some(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Some(false)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            RawCell::Empty => None,
            RawCell::Text(s) => Some(s),
            RawCell::Int(i) => Some(Value::Int64(i).to_string()),
            RawCell::Number(f) => match RawCell::Number(f).as_int() {
                Some(i) => Some(i.to_string()),
                None => Some(Value::Float64(f).to_string()),
            },
            RawCell::Bool(b) => Some(Value::Bool(b).to_string()),
        }
    }
}

/// Header names plus untyped rows, before inference.
#[derive(Debug, Default)]
pub(crate) struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    /// Infer column types, build the [`DataSet`] and guarantee `StudentID` / `Name`.
    pub(crate) fn into_dataset(self) -> DataSet {
        let headers = normalize_headers(self.headers);
        let width = headers.len();
        let height = self.rows.len();

        let mut columns: Vec<Vec<RawCell>> = (0..width).map(|_| Vec::with_capacity(height)).collect();
        for row in self.rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.push(cells.next().unwrap_or(RawCell::Empty));
            }
        }

        let mut fields = Vec::with_capacity(width);
        let mut rows: Vec<Vec<Value>> = (0..height).map(|_| Vec::with_capacity(width)).collect();
        for (name, cells) in headers.into_iter().zip(columns) {
            let data_type = infer_type(&cells);
            for (row, cell) in rows.iter_mut().zip(cells) {
                row.push(convert(cell, data_type));
            }
            fields.push(Field::new(name, data_type));
        }

        let mut ds = DataSet::new(Schema::new(fields), rows);
        ensure_identity_columns(&mut ds);
        ds
    }
}

/// Trim header names (and a stray byte-order mark); name blank headers `Unnamed: {index}`.
fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    headers
        .into_iter()
        .enumerate()
        .map(|(idx, h)| {
            let trimmed = h.trim_start_matches('\u{feff}').trim();
            if trimmed.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                trimmed.to_owned()
            }
        })
        .collect()
}

fn infer_type(cells: &[RawCell]) -> DataType {
    let present: Vec<&RawCell> = cells.iter().filter(|c| **c != RawCell::Empty).collect();
    // An all-missing column is a numeric column with no scores yet.
    if present.is_empty() {
        return DataType::Float64;
    }
    if present.iter().all(|c| c.as_int().is_some()) {
        DataType::Int64
    } else if present.iter().all(|c| c.as_float().is_some()) {
        DataType::Float64
    } else if present.iter().all(|c| c.as_bool().is_some()) {
        DataType::Bool
    } else {
        DataType::Utf8
    }
}

fn convert(cell: RawCell, data_type: DataType) -> Value {
    let value = match data_type {
        DataType::Int64 => cell.as_int().map(Value::Int64),
        DataType::Float64 => cell.as_float().map(Value::Float64),
        DataType::Bool => cell.as_bool().map(Value::Bool),
        DataType::Utf8 => cell.into_text().map(Value::Utf8),
    };
    value.unwrap_or(Value::Null)
}

/// Insert `StudentID` (position 0) and `Name` (position 1) when the input lacks them.
pub(crate) fn ensure_identity_columns(ds: &mut DataSet) {
    let n = ds.row_count();
    if !ds.schema.contains(STUDENT_ID) {
        log::debug!("synthesizing '{STUDENT_ID}' for {n} rows");
        let ids = (1..=n).map(|i| Value::Int64(i as i64)).collect();
        ds.insert_column(0, Field::new(STUDENT_ID, DataType::Int64), ids);
    }
    if !ds.schema.contains(NAME) {
        log::debug!("synthesizing '{NAME}' for {n} rows");
        let names = (1..=n).map(|i| Value::Utf8(format!("Student {i}"))).collect();
        ds.insert_column(1, Field::new(NAME, DataType::Utf8), names);
    }
}
