//! Letter grades.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Value;

/// Letter grade derived from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    C,
    D,
    F,
    /// The percentage was missing or not a number.
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl Grade {
    /// Display label (`A+`, `B+`, `N/A`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
            Grade::NotAvailable => "N/A",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A+" => Ok(Grade::APlus),
            "A" => Ok(Grade::A),
            "B+" => Ok(Grade::BPlus),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            "N/A" => Ok(Grade::NotAvailable),
            other => Err(format!("unknown grade '{other}'")),
        }
    }
}

/// Converts a percentage (0–100) into a letter grade.
///
/// Lower bounds are inclusive, so a boundary value gets the higher grade.
///
/// | Range    | Grade |
/// |----------|-------|
/// | >= 90    | A+    |
/// | >= 80    | A     |
/// | >= 70    | B+    |
/// | >= 60    | B     |
/// | >= 50    | C     |
/// | >= 40    | D     |
/// | < 40     | F     |
///
/// NaN yields [`Grade::NotAvailable`].
pub fn grade(pct: f64) -> Grade {
    match pct {
        p if p.is_nan() => Grade::NotAvailable,
        p if p >= 90.0 => Grade::APlus,
        p if p >= 80.0 => Grade::A,
        p if p >= 70.0 => Grade::BPlus,
        p if p >= 60.0 => Grade::B,
        p if p >= 50.0 => Grade::C,
        p if p >= 40.0 => Grade::D,
        _ => Grade::F,
    }
}

/// Grade an arbitrary cell. Numeric strings are parsed; anything else is `N/A`.
pub fn grade_value(value: &Value) -> Grade {
    match value {
        Value::Int64(_) | Value::Float64(_) => value.as_f64().map_or(Grade::NotAvailable, grade),
        Value::Utf8(s) => s
            .trim()
            .parse::<f64>()
            .map_or(Grade::NotAvailable, grade),
        Value::Null | Value::Bool(_) => Grade::NotAvailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(grade(100.0), Grade::APlus);
        assert_eq!(grade(90.0), Grade::APlus);
        assert_eq!(grade(89.99), Grade::A);
        assert_eq!(grade(80.0), Grade::A);
        assert_eq!(grade(79.99), Grade::BPlus);
        assert_eq!(grade(70.0), Grade::BPlus);
        assert_eq!(grade(60.0), Grade::B);
        assert_eq!(grade(50.0), Grade::C);
        assert_eq!(grade(40.0), Grade::D);
        assert_eq!(grade(39.99), Grade::F);
        assert_eq!(grade(0.0), Grade::F);
    }

    #[test]
    fn unparseable_input_is_not_available() {
        assert_eq!(grade_value(&Value::Utf8("x".to_string())), Grade::NotAvailable);
        assert_eq!(grade_value(&Value::Null), Grade::NotAvailable);
        assert_eq!(grade_value(&Value::Float64(f64::NAN)), Grade::NotAvailable);
        assert_eq!(grade_value(&Value::Utf8(" 72.5 ".to_string())), Grade::BPlus);
        assert_eq!(grade_value(&Value::Int64(90)), Grade::APlus);
    }

    #[test]
    fn labels_round_trip() {
        for g in [
            Grade::APlus,
            Grade::A,
            Grade::BPlus,
            Grade::B,
            Grade::C,
            Grade::D,
            Grade::F,
            Grade::NotAvailable,
        ] {
            assert_eq!(g.to_string().parse::<Grade>(), Ok(g));
        }
    }
}
