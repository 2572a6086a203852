//! Spreadsheet serialization.

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{DataSet, Value};

/// Name of the single worksheet written by [`to_xlsx_bytes`].
pub const SHEET_NAME: &str = "Students";

/// Largest column count a worksheet can hold.
const MAX_COLUMNS: usize = 16_384;

/// Serialize `dataset` as a single-sheet `.xlsx` workbook.
///
/// Row 1 holds the field names; each following row holds one record in the same order.
/// Numbers are written as numbers, booleans as booleans, nulls as blank cells.
pub fn to_xlsx_bytes(dataset: &DataSet) -> AnalysisResult<Vec<u8>> {
    if dataset.schema.fields.len() > MAX_COLUMNS {
        return Err(AnalysisError::Malformed {
            message: format!(
                "{} columns exceed the worksheet limit of {MAX_COLUMNS}",
                dataset.schema.fields.len()
            ),
        });
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, name) in dataset.schema.field_names().enumerate() {
            sheet.write_string(0, col as u16, name)?;
        }
        for (idx, row) in dataset.rows.iter().enumerate() {
            let r = u32::try_from(idx + 1).map_err(|_| AnalysisError::Malformed {
                message: format!("row {idx} exceeds the worksheet limit"),
            })?;
            for (col, value) in row.iter().enumerate() {
                write_cell(sheet, r, col as u16, value)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<(), XlsxError> {
    match value {
        Value::Null => {}
        Value::Int64(v) => {
            sheet.write_number(row, col, *v as f64)?;
        }
        Value::Float64(v) if v.is_finite() => {
            sheet.write_number(row, col, *v)?;
        }
        Value::Float64(_) => {
            sheet.write_string(row, col, value.to_string())?;
        }
        Value::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        Value::Utf8(s) => {
            sheet.write_string(row, col, s)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::to_xlsx_bytes;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    #[test]
    fn produces_a_zip_container() {
        let ds = DataSet::new(
            Schema::new(vec![Field::new("Name", DataType::Utf8)]),
            vec![vec![Value::Utf8("Ada".to_string())]],
        );
        let bytes = to_xlsx_bytes(&ds).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
