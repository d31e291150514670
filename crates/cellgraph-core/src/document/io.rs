use super::Spreadsheet;
use crate::error::{Result, SpreadsheetError};
use crate::storage::{
    StringForms, parse_sheet, parse_sheet_content, write_sheet, write_sheet_content,
};
use std::path::Path;
use tracing::info;

impl Spreadsheet {
    /// Cell name -> string form for every non-empty cell.
    pub fn string_forms(&self) -> StringForms {
        self.cells
            .iter()
            .map(|(name, contents)| (name.clone(), contents.to_input_string()))
            .collect()
    }

    /// Build a spreadsheet by setting each cell from its string form.
    ///
    /// Entry order does not matter. Any invalid name, malformed formula, or
    /// cycle fails the whole build; the partially built sheet is discarded.
    pub fn from_string_forms<I, K, V>(forms: I) -> Result<Spreadsheet>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut sheet = Spreadsheet::new();
        for (name, form) in forms {
            let name = name.as_ref();
            sheet
                .set_contents_of_cell(name, form.as_ref())
                .map_err(|e| match e {
                    SpreadsheetError::InvalidName(_) => {
                        SpreadsheetError::ReadWrite(format!("Invalid cell name: {}", name))
                    }
                    SpreadsheetError::FormulaFormat(err) => SpreadsheetError::ReadWrite(format!(
                        "Invalid formula in cell {}: {}",
                        name, err
                    )),
                    SpreadsheetError::CircularDependency(_) => SpreadsheetError::ReadWrite(
                        format!("Circular dependency detected in cell {}", name),
                    ),
                    other => other,
                })?;
        }
        sheet.changed = false;
        Ok(sheet)
    }

    /// Serialize to the JSON spreadsheet format.
    pub fn to_json(&self) -> Result<String> {
        write_sheet_content(&self.string_forms())
    }

    /// Deserialize from the JSON spreadsheet format.
    pub fn from_json(content: &str) -> Result<Spreadsheet> {
        Self::from_string_forms(parse_sheet_content(content)?)
    }

    /// Open a spreadsheet file.
    pub fn open(path: &Path) -> Result<Spreadsheet> {
        let sheet = Self::from_string_forms(parse_sheet(path)?).map_err(|e| {
            SpreadsheetError::ReadWrite(format!(
                "Error reading spreadsheet from file {}: {}",
                path.display(),
                e
            ))
        })?;
        info!(path = %path.display(), cells = sheet.cells.len(), "loaded spreadsheet");
        Ok(sheet)
    }

    /// Replace this spreadsheet with the contents of a file.
    /// On error `self` is left exactly as it was.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        *self = Self::open(path)?;
        Ok(())
    }

    /// Save to a file and clear the changed flag.
    pub fn save_file(&mut self, path: &Path) -> Result<()> {
        write_sheet(path, &self.string_forms())?;
        self.changed = false;
        info!(path = %path.display(), cells = self.cells.len(), "saved spreadsheet");
        Ok(())
    }
}
