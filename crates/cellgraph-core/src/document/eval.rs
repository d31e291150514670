use super::Spreadsheet;
use crate::error::Result;
use cellgraph_engine::engine::{CellContents, CellValue, Formula, FormulaError};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Values computed during one top-level evaluation, so cells read by
/// several formulas are only evaluated once per call.
type ValueMemo = RefCell<HashMap<String, CellValue>>;

impl Spreadsheet {
    /// Value of a cell: its number or text, or the result of evaluating its
    /// formula. Unset cells evaluate to empty text.
    ///
    /// Formula problems are returned as [`CellValue::Error`]; the only
    /// failure is an invalid cell name.
    pub fn get_cell_value(&self, name: &str) -> Result<CellValue> {
        let name = Self::normalize_name(name)?;
        let memo = ValueMemo::default();
        self.evaluate_dependees(&[name.as_str()], &memo);
        Ok(self.value_of(&name, &memo))
    }

    /// Evaluate a formula that is not stored in any cell against this sheet.
    pub fn evaluate_formula(&self, formula: &Formula) -> CellValue {
        let memo = ValueMemo::default();
        let variables = formula.variables();
        let roots: Vec<&str> = variables.iter().map(String::as_str).collect();
        self.evaluate_dependees(&roots, &memo);
        formula
            .evaluate(|variable| self.numeric_value(variable, &memo))
            .into()
    }

    /// Evaluate `roots` and everything they read into `memo`, dependees
    /// first, so no formula lookup has to recurse more than one level.
    fn evaluate_dependees(&self, roots: &[&str], memo: &ValueMemo) {
        let mut seen = HashSet::new();
        let mut stack = Vec::new();

        for &root in roots {
            if seen.insert(root) {
                stack.push((root, self.dependencies.get_dependees(root)));
            }
            while let Some((node, dependees)) = stack.last_mut() {
                let node = *node;
                match dependees.next() {
                    Some(dependee) => {
                        if seen.insert(dependee) {
                            stack.push((dependee, self.dependencies.get_dependees(dependee)));
                        }
                    }
                    None => {
                        stack.pop();
                        self.value_of(node, memo);
                    }
                }
            }
        }
    }

    fn value_of(&self, name: &str, memo: &ValueMemo) -> CellValue {
        if let Some(value) = memo.borrow().get(name) {
            return value.clone();
        }

        let value = match self.cells.get(name) {
            None => CellValue::Text(String::new()),
            Some(CellContents::Number(n)) => CellValue::Number(*n),
            Some(CellContents::Text(s)) => CellValue::Text(s.clone()),
            Some(CellContents::Formula(formula)) => formula
                .evaluate(|variable| self.numeric_value(variable, memo))
                .into(),
        };

        memo.borrow_mut().insert(name.to_string(), value.clone());
        value
    }

    /// Lookup used while evaluating formulas: only numeric cells qualify.
    fn numeric_value(&self, name: &str, memo: &ValueMemo) -> std::result::Result<f64, FormulaError> {
        match self.value_of(name, memo) {
            CellValue::Number(n) => Ok(n),
            // Keep the original reason so dependents show the root cause.
            CellValue::Error(err) => Err(err),
            CellValue::Text(s) if s.is_empty() => Err(FormulaError::unknown_variable(name)),
            CellValue::Text(_) => Err(FormulaError::new(format!(
                "Cell {} does not contain a numeric value",
                name
            ))),
        }
    }
}
