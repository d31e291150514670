use super::Spreadsheet;
use crate::error::{Result, SpreadsheetError};
use cellgraph_engine::engine::{CellContents, Formula};
use tracing::{debug, warn};

impl Spreadsheet {
    /// Contents of a cell; empty text if the cell is unset.
    pub fn get_cell_contents(&self, name: &str) -> Result<CellContents> {
        let name = Self::normalize_name(name)?;
        Ok(self
            .cells
            .get(&name)
            .cloned()
            .unwrap_or_else(CellContents::empty))
    }

    /// Set cell contents from input string.
    ///
    /// Returns the cell followed by every cell that transitively depends on
    /// it, in an order where each cell comes after everything it reads.
    /// If the input is a formula that would make the cell depend on itself,
    /// nothing changes and `CircularDependency` is returned.
    pub fn set_contents_of_cell(&mut self, name: &str, input: &str) -> Result<Vec<String>> {
        let name = Self::normalize_name(name)?;
        let contents = CellContents::from_input(input)?;

        let order = match contents {
            CellContents::Formula(formula) => self.set_formula(&name, formula)?,
            other => self.set_plain(&name, other)?,
        };

        self.changed = true;
        debug!(cell = %name, recalculate = order.len(), "cell contents set");
        Ok(order)
    }

    /// Store a number or text. Empty text clears the cell.
    fn set_plain(&mut self, name: &str, contents: CellContents) -> Result<Vec<String>> {
        self.dependencies.replace_dependees(name, std::iter::empty::<&str>());
        if contents.is_empty() {
            self.cells.remove(name);
        } else {
            self.cells.insert(name.to_string(), contents);
        }
        // With no dependees left the cell cannot reach itself.
        Ok(self.dependencies.recalc_order(name)?)
    }

    /// Install the formula's edges, then check for a cycle before storing it.
    fn set_formula(&mut self, name: &str, formula: Formula) -> Result<Vec<String>> {
        let previous: Vec<String> = self
            .dependencies
            .get_dependees(name)
            .map(str::to_string)
            .collect();
        self.dependencies.replace_dependees(name, formula.variables());

        match self.dependencies.recalc_order(name) {
            Ok(order) => {
                self.cells
                    .insert(name.to_string(), CellContents::Formula(formula));
                Ok(order)
            }
            Err(cycle) => {
                self.dependencies.replace_dependees(name, &previous);
                warn!(cell = %name, formula = %formula, "rejected circular formula");
                Err(SpreadsheetError::from(cycle))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn names(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn dependees(sheet: &Spreadsheet, cell: &str) -> HashSet<String> {
        sheet
            .dependencies()
            .get_dependees(cell)
            .map(str::to_string)
            .collect()
    }

    fn position(order: &[String], cell: &str) -> usize {
        order.iter().position(|c| c == cell).unwrap()
    }

    #[test]
    fn test_invalid_names_are_rejected() {
        let mut sheet = Spreadsheet::new();
        for bad in ["", "1A", "A", "A1A", "a_1", "A 1"] {
            assert!(matches!(
                sheet.set_contents_of_cell(bad, "5"),
                Err(SpreadsheetError::InvalidName(_))
            ));
            assert!(matches!(
                sheet.get_cell_contents(bad),
                Err(SpreadsheetError::InvalidName(_))
            ));
        }
        assert!(!sheet.changed());
        assert!(sheet.names_of_nonempty_cells().is_empty());
    }

    #[test]
    fn test_contents_by_kind() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "5").unwrap();
        sheet.set_contents_of_cell("b1", "hello").unwrap();
        sheet.set_contents_of_cell("C1", "=a1 + 2").unwrap();

        assert_eq!(sheet.get_cell_contents("a1").unwrap(), CellContents::Number(5.0));
        assert_eq!(
            sheet.get_cell_contents("B1").unwrap(),
            CellContents::Text("hello".to_string())
        );
        assert_eq!(
            sheet.get_cell_contents("c1").unwrap(),
            CellContents::Formula(Formula::new("A1+2").unwrap())
        );
        assert_eq!(sheet.get_cell_contents("Z99").unwrap(), CellContents::empty());
        assert_eq!(sheet.names_of_nonempty_cells(), names(&["A1", "B1", "C1"]));
    }

    #[test]
    fn test_empty_text_clears_cell() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "text").unwrap();
        assert_eq!(sheet.set_contents_of_cell("A1", "").unwrap(), vec!["A1".to_string()]);
        assert!(sheet.names_of_nonempty_cells().is_empty());

        // Clearing an unset cell is allowed and still reports the cell.
        assert_eq!(sheet.set_contents_of_cell("B7", "").unwrap(), vec!["B7".to_string()]);
        assert!(sheet.names_of_nonempty_cells().is_empty());
    }

    #[test]
    fn test_formula_format_error_leaves_cell_untouched() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "=B1").unwrap();
        assert!(matches!(
            sheet.set_contents_of_cell("A1", "=B1 +"),
            Err(SpreadsheetError::FormulaFormat(_))
        ));
        assert_eq!(
            sheet.get_cell_contents("A1").unwrap(),
            CellContents::Formula(Formula::new("B1").unwrap())
        );
        assert_eq!(dependees(&sheet, "A1"), names(&["B1"]));
    }

    #[test]
    fn test_recalc_order_after_change() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "5").unwrap();
        sheet.set_contents_of_cell("B1", "=A1+2").unwrap();
        sheet.set_contents_of_cell("C1", "=A1+B1").unwrap();

        let order = sheet.set_contents_of_cell("A1", "10").unwrap();
        assert_eq!(order.len(), 3);
        assert_eq!(order[0], "A1");
        assert!(position(&order, "B1") < position(&order, "C1"));
    }

    #[test]
    fn test_replacing_formula_updates_edges() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "=B1 + C1").unwrap();
        assert_eq!(dependees(&sheet, "A1"), names(&["B1", "C1"]));

        sheet.set_contents_of_cell("A1", "=D1").unwrap();
        assert_eq!(dependees(&sheet, "A1"), names(&["D1"]));
        assert!(!sheet.dependencies().has_dependents("B1"));

        sheet.set_contents_of_cell("A1", "7").unwrap();
        assert!(!sheet.dependencies().has_dependees("A1"));
        assert_eq!(sheet.dependencies().size(), 0);
    }

    #[test]
    fn test_clearing_formula_cell_removes_edges() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "=B1 * 2").unwrap();
        sheet.set_contents_of_cell("A1", "").unwrap();
        assert_eq!(sheet.dependencies().size(), 0);
        assert!(sheet.names_of_nonempty_cells().is_empty());
    }

    #[test]
    fn test_self_reference_is_circular() {
        let mut sheet = Spreadsheet::new();
        let err = sheet.set_contents_of_cell("A1", "=a1 + 1").unwrap_err();
        assert!(matches!(err, SpreadsheetError::CircularDependency(ref c) if c == "A1"));
        assert!(sheet.names_of_nonempty_cells().is_empty());
        assert_eq!(sheet.dependencies().size(), 0);
        assert!(!sheet.changed());
    }

    #[test]
    fn test_two_cell_cycle_rolls_back() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "=A2").unwrap();
        assert!(matches!(
            sheet.set_contents_of_cell("A2", "=A1"),
            Err(SpreadsheetError::CircularDependency(_))
        ));

        assert_eq!(sheet.get_cell_contents("A2").unwrap(), CellContents::empty());
        assert_eq!(sheet.names_of_nonempty_cells(), names(&["A1"]));
        assert_eq!(dependees(&sheet, "A1"), names(&["A2"]));
        assert!(!sheet.dependencies().has_dependees("A2"));
        assert_eq!(sheet.dependencies().size(), 1);
    }

    #[test]
    fn test_cycle_restores_previous_formula_edges() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "=B1 + C1").unwrap();
        sheet.set_contents_of_cell("B1", "=D1").unwrap();

        assert!(sheet.set_contents_of_cell("B1", "=A1 * 2").is_err());
        assert_eq!(
            sheet.get_cell_contents("B1").unwrap(),
            CellContents::Formula(Formula::new("D1").unwrap())
        );
        assert_eq!(dependees(&sheet, "B1"), names(&["D1"]));
        assert_eq!(dependees(&sheet, "A1"), names(&["B1", "C1"]));
        assert_eq!(sheet.dependencies().size(), 3);
    }

    #[test]
    fn test_cycle_over_number_cell_keeps_number() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("B1", "=A1").unwrap();
        sheet.set_contents_of_cell("A1", "3").unwrap();
        assert!(sheet.set_contents_of_cell("A1", "=B1").is_err());
        assert_eq!(sheet.get_cell_contents("A1").unwrap(), CellContents::Number(3.0));
        assert!(!sheet.dependencies().has_dependees("A1"));
    }

    #[test]
    fn test_long_chain_cycle_keeps_chain() {
        let mut sheet = Spreadsheet::new();
        for i in 1..=100 {
            sheet
                .set_contents_of_cell(&format!("A{i}"), &format!("=A{}", i + 1))
                .unwrap();
        }
        let size_before = sheet.dependencies().size();

        assert!(matches!(
            sheet.set_contents_of_cell("A101", "=A1"),
            Err(SpreadsheetError::CircularDependency(_))
        ));

        assert_eq!(sheet.dependencies().size(), size_before);
        assert_eq!(sheet.get_cell_contents("A101").unwrap(), CellContents::empty());
        for i in 1..=100 {
            assert_eq!(
                sheet.get_cell_contents(&format!("A{i}")).unwrap(),
                CellContents::Formula(Formula::new(&format!("A{}", i + 1)).unwrap())
            );
        }
        assert_eq!(sheet.set_contents_of_cell("A101", "1").unwrap().len(), 101);
    }

    #[test]
    fn test_long_chain_recalc_midpoint() {
        let mut sheet = Spreadsheet::new();
        for i in 1..500 {
            sheet
                .set_contents_of_cell(&format!("A{i}"), &format!("=A{} + 1", i + 1))
                .unwrap();
        }

        let order = sheet.set_contents_of_cell("A250", "0").unwrap();
        let expected: Vec<String> = (1..=250).rev().map(|i| format!("A{i}")).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_changed_flag() {
        let mut sheet = Spreadsheet::new();
        assert!(!sheet.changed());
        sheet.set_contents_of_cell("A1", "1").unwrap();
        assert!(sheet.changed());
    }
}
