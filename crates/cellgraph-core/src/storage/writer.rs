//! Writer for the JSON spreadsheet format

use super::{SheetFile, StoredCell, StringForms};
use crate::error::{Result, SpreadsheetError};
use std::fs;
use std::path::Path;

/// Write cell string forms to a spreadsheet file
pub fn write_sheet(path: &Path, forms: &StringForms) -> Result<()> {
    let content = write_sheet_content(forms)?;
    fs::write(path, content).map_err(|e| {
        SpreadsheetError::ReadWrite(format!(
            "Error saving spreadsheet to file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Render cell string forms as pretty-printed spreadsheet JSON
pub fn write_sheet_content(forms: &StringForms) -> Result<String> {
    let file = SheetFile {
        cells: forms
            .iter()
            .map(|(name, form)| {
                (
                    name.clone(),
                    StoredCell {
                        string_form: form.clone(),
                    },
                )
            })
            .collect(),
    };
    serde_json::to_string_pretty(&file)
        .map_err(|e| SpreadsheetError::ReadWrite(format!("Error serializing spreadsheet: {}", e)))
}
