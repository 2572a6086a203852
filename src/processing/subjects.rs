//! Subject-column detection.
//!
//! Subject columns are decided once, from the loaded [`Schema`], and the resulting
//! [`SubjectColumns`] is handed to every later stage.

use crate::columns::{PERCENTAGE, STUDENT_ID, TOTAL};
use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{DataType, Schema};

/// Describes which schema fields count as graded subjects.
#[derive(Debug, Clone)]
pub struct SchemaConfig {
    /// Field names never treated as subjects, even when numeric.
    pub excluded: Vec<String>,
    /// Which field types hold scores.
    pub is_numeric: fn(&DataType) -> bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            excluded: vec![TOTAL.to_string(), PERCENTAGE.to_string(), STUDENT_ID.to_string()],
            is_numeric: DataType::is_numeric,
        }
    }
}

/// Ordered, non-empty set of subject column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectColumns {
    names: Vec<String>,
}

impl SubjectColumns {
    /// Select all numeric fields not listed in `config.excluded`, in schema order.
    ///
    /// Fails with [`AnalysisError::NoSubjectColumns`] if nothing is left.
    pub fn detect(schema: &Schema, config: &SchemaConfig) -> AnalysisResult<Self> {
        let names: Vec<String> = schema
            .fields
            .iter()
            .filter(|f| (config.is_numeric)(&f.data_type))
            .filter(|f| !config.excluded.iter().any(|e| *e == f.name))
            .map(|f| f.name.clone())
            .collect();
        Self::new(names).map_err(|_| AnalysisError::NoSubjectColumns {
            excluded: config.excluded.clone(),
        })
    }

    /// Use an explicit list of subjects. Columns need not exist in the dataset yet.
    pub fn new(names: Vec<String>) -> AnalysisResult<Self> {
        if names.is_empty() {
            return Err(AnalysisError::NoSubjectColumns { excluded: Vec::new() });
        }
        Ok(Self { names })
    }

    /// Subject names in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of subjects.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Never true for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate subject names in column order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
