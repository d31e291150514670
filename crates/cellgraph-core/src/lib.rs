//! cellgraph-core - UI-agnostic spreadsheet model + storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::Spreadsheet;
pub use error::{Result, SpreadsheetError};

pub use cellgraph_engine::engine::{CellContents, CellValue, Formula, FormulaError};
