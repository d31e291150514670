use crate::error::{Result, SpreadsheetError};
use cellgraph_engine::engine::{CellContents, CellName, DependencyGraph};
use std::collections::{HashMap, HashSet};

/// UI-agnostic spreadsheet state.
///
/// Cells are stored sparsely by canonical (uppercase) name; a cell that is
/// not in `cells` is empty. `dependencies` always holds exactly the edges
/// `variable -> cell` for every formula cell currently stored.
#[derive(Debug, Default, Clone)]
pub struct Spreadsheet {
    /// Non-empty cells keyed by canonical name
    pub(crate) cells: HashMap<String, CellContents>,
    /// Edges from each referenced cell to the formula cells that read it
    pub(crate) dependencies: DependencyGraph,
    /// Whether contents changed since construction, load, or save
    pub(crate) changed: bool,
}

impl Spreadsheet {
    /// Create an empty spreadsheet.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any cell was set since construction, load, or the last save.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Names of all cells with non-empty contents.
    pub fn names_of_nonempty_cells(&self) -> HashSet<String> {
        self.cells.keys().cloned().collect()
    }

    /// Read-only view of the dependency graph.
    pub fn dependencies(&self) -> &DependencyGraph {
        &self.dependencies
    }

    /// Validate a cell name and return its canonical form.
    pub(crate) fn normalize_name(name: &str) -> Result<String> {
        CellName::from_str(name)
            .map(CellName::into_string)
            .ok_or_else(|| SpreadsheetError::InvalidName(name.to_string()))
    }
}
