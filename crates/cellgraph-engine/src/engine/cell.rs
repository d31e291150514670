//! Cell data structures.
//!
//! - [`CellContents`] - What a cell stores (number, text, or formula)
//! - [`CellValue`] - What a cell evaluates to (number, text, or formula error)

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{FormulaError, FormulaFormatError};
use super::format::format_number;
use super::formula::Formula;

/// The contents stored in a cell. An empty cell is `Text("")`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellContents {
    Number(f64),
    Text(String),
    Formula(Formula),
}

impl CellContents {
    /// Classify user input.
    /// - Trimmed text that parses as a finite number -> Number
    /// - Starts with '=' -> Formula (the rest must be a valid formula)
    /// - Otherwise -> Text, verbatim
    pub fn from_input(input: &str) -> Result<CellContents, FormulaFormatError> {
        if let Ok(n) = input.trim().parse::<f64>() {
            if n.is_finite() {
                return Ok(CellContents::Number(n));
            }
        }

        if let Some(formula) = input.strip_prefix('=') {
            return Ok(CellContents::Formula(Formula::new(formula)?));
        }

        Ok(CellContents::Text(input.to_string()))
    }

    pub fn empty() -> CellContents {
        CellContents::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellContents::Text(s) if s.is_empty())
    }

    /// The string form that [`from_input`](Self::from_input) turns back into
    /// equal contents: numbers in round-trip form, text verbatim, formulas
    /// as `=` plus their canonical string.
    pub fn to_input_string(&self) -> String {
        match self {
            CellContents::Number(n) => format_number(*n),
            CellContents::Text(s) => s.clone(),
            CellContents::Formula(f) => format!("={}", f),
        }
    }
}

/// The computed value of a cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Error(FormulaError),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }
}

impl From<Result<f64, FormulaError>> for CellValue {
    fn from(result: Result<f64, FormulaError>) -> Self {
        match result {
            Ok(n) => CellValue::Number(n),
            Err(e) => CellValue::Error(e),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Error(e) => write!(f, "#ERR: {}", e),
        }
    }
}
