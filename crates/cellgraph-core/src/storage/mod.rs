//! Storage for the JSON spreadsheet format.
//!
//! ```json
//! { "Cells": { "A1": { "StringForm": "5" }, "B1": { "StringForm": "=A1+2" } } }
//! ```
//!
//! Each `StringForm` is exactly what `set_contents_of_cell` accepts.

mod parser;
mod writer;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use parser::{parse_sheet, parse_sheet_content};
pub use writer::{write_sheet, write_sheet_content};

/// Cell name -> string form, sorted by name for stable output.
pub type StringForms = BTreeMap<String, String>;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SheetFile {
    #[serde(rename = "Cells")]
    cells: BTreeMap<String, StoredCell>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredCell {
    #[serde(rename = "StringForm")]
    string_form: String,
}
