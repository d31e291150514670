//! cellgraph_engine - Formula parsing, evaluation, and dependency tracking.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;
    use std::collections::HashMap;

    #[test]
    fn test_formula_variables_feed_graph() {
        let mut graph = DependencyGraph::new();
        let formulas = [("B1", "A1 * 2"), ("C1", "a1 + b1"), ("D1", "c1 / (b1 - 1)")];
        for (cell, text) in formulas {
            let formula = Formula::new(text).unwrap();
            graph.replace_dependees(cell, formula.variables());
        }

        assert_eq!(graph.size(), 5);
        let order = graph.recalc_order("A1").unwrap();
        assert_eq!(order.len(), 4);
        assert_eq!(order[0], "A1");
        assert_eq!(order[3], "D1");
    }

    #[test]
    fn test_evaluate_in_recalc_order() {
        let formulas: HashMap<&str, Formula> = [("B1", "A1 + 2"), ("C1", "A1 + B1")]
            .into_iter()
            .map(|(cell, text)| (cell, Formula::new(text).unwrap()))
            .collect();

        let mut graph = DependencyGraph::new();
        for (cell, formula) in &formulas {
            graph.replace_dependees(cell, formula.variables());
        }

        let mut values: HashMap<String, f64> = HashMap::new();
        values.insert("A1".to_string(), 10.0);
        for cell in graph.recalc_order("A1").unwrap().iter().skip(1) {
            let value = formulas[cell.as_str()]
                .evaluate(|name| {
                    values
                        .get(name)
                        .copied()
                        .ok_or_else(|| FormulaError::unknown_variable(name))
                })
                .unwrap();
            values.insert(cell.clone(), value);
        }

        assert_eq!(values["B1"], 12.0);
        assert_eq!(values["C1"], 22.0);
    }

    #[test]
    fn test_cell_names_match_formula_variables() {
        let formula = Formula::new("ab12 + Z9").unwrap();
        for variable in formula.variables() {
            let name = CellName::from_str(&variable).unwrap();
            assert_eq!(name.as_str(), variable);
        }
    }

    #[test]
    fn test_format_error_messages() {
        let err = Formula::new("5 + ,").unwrap_err();
        assert_eq!(err.to_string(), "Invalid token: ,");
        let err = Formula::new("").unwrap_err();
        assert_eq!(err.to_string(), "Formula must contain at least one token.");
    }
}
