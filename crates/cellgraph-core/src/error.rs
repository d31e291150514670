//! Error types for Cellgraph core.

use thiserror::Error;

use cellgraph_engine::engine::{CircularReference, FormulaFormatError};

/// Errors returned by spreadsheet operations.
///
/// Formula evaluation problems (division by zero, non-numeric operands) are
/// not errors here; they come back as [`CellValue::Error`](cellgraph_engine::engine::CellValue).
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    #[error("Invalid cell name: {0}")]
    InvalidName(String),

    #[error("Formula format error: {0}")]
    FormulaFormat(#[from] FormulaFormatError),

    #[error("Circular dependency detected in cell {0}")]
    CircularDependency(String),

    #[error("{0}")]
    ReadWrite(String),
}

impl From<CircularReference> for SpreadsheetError {
    fn from(err: CircularReference) -> Self {
        SpreadsheetError::CircularDependency(err.cell)
    }
}

pub type Result<T> = std::result::Result<T, SpreadsheetError>;
