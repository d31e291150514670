//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`CellContents`], [`CellValue`] - What a cell stores and what it evaluates to
//! - [`CellName`] - Cell name validation and normalization (`a1` -> `A1`)
//! - [`DependencyGraph`] - Bidirectional dependee/dependent index
//! - [`CircularReference`] - Cycle signal from [`DependencyGraph::recalc_order`]
//! - [`Formula`] - Validated infix arithmetic with a canonical string form
//! - [`format_number`] - Round-trip-safe number rendering

mod cell;
mod cell_name;
mod cycle;
mod error;
mod eval;
mod format;
mod formula;
mod graph;
mod tokenize;

pub use cell::{CellContents, CellValue};
pub use cell_name::CellName;
pub use cycle::CircularReference;
pub use error::{FormulaError, FormulaFormatError};
pub use format::format_number;
pub use formula::Formula;
pub use graph::DependencyGraph;
pub use tokenize::{Operator, Token};
