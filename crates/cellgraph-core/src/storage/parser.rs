//! Parser for the JSON spreadsheet format

use super::{SheetFile, StringForms};
use crate::error::{Result, SpreadsheetError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a spreadsheet file and return its cell string forms
pub fn parse_sheet(path: &Path) -> Result<StringForms> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            SpreadsheetError::ReadWrite(format!("File not found: {}", path.display()))
        }
        _ => SpreadsheetError::ReadWrite(format!(
            "Error reading spreadsheet from file {}: {}",
            path.display(),
            e
        )),
    })?;
    parse_sheet_content(&content)
}

/// Parse spreadsheet JSON from a string
pub fn parse_sheet_content(content: &str) -> Result<StringForms> {
    let file: SheetFile = serde_json::from_str(content)
        .map_err(|e| SpreadsheetError::ReadWrite(format!("Malformed spreadsheet file: {}", e)))?;

    Ok(file
        .cells
        .into_iter()
        .map(|(name, cell)| (name, cell.string_form))
        .collect())
}
