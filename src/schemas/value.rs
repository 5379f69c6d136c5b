//! Cell value - a single raw value stored in a sheet cell

use serde::{Deserialize, Serialize};

/// A raw cell value as the sheet stores it.
///
/// Serializes untagged, so a workbook row is a plain JSON array of
/// `null`, booleans, numbers and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    /// Nothing stored (JSON null)
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Whether the value counts as present.
    ///
    /// Empty cells, `false`, zero, NaN and the empty string are absent.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Bool(b) => *b,
            CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CellValue::Text(s) => !s.is_empty(),
        }
    }

    /// Coerce to a number. Anything unparseable becomes 0.
    pub fn to_number(&self) -> f64 {
        let n = match self {
            CellValue::Empty => 0.0,
            CellValue::Bool(true) => 1.0,
            CellValue::Bool(false) => 0.0,
            CellValue::Number(n) => *n,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(0.0)
                }
            }
        };
        if n.is_nan() {
            0.0
        } else {
            n
        }
    }

    /// String form used for change detection.
    ///
    /// Absent values render as the empty string, so `null`, `""` and `0`
    /// compare equal to each other.
    pub fn as_display(&self) -> String {
        if !self.is_truthy() {
            return String::new();
        }
        match self {
            CellValue::Empty => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Parse user input from the command line into a typed value.
    pub fn parse_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        match trimmed {
            "true" => return CellValue::Bool(true),
            "false" => return CellValue::Bool(false),
            _ => {}
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(input.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}
