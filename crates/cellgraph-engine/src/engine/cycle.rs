//! Recalculation order and circular dependency detection.
//!
//! When a cell changes, everything that transitively depends on it must be
//! recomputed, each cell after all of its dependees. A depth-first walk over
//! the dependents relation, emitting each node after its dependents and then
//! reversing, gives exactly that order. Reaching the start node again during
//! the walk means the start depends on itself, and the walk stops there.

use std::collections::HashSet;
use thiserror::Error;

use super::DependencyGraph;

/// The start node of [`DependencyGraph::recalc_order`] reaches itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("circular dependency through {cell}")]
pub struct CircularReference {
    pub cell: String,
}

impl DependencyGraph {
    /// Return `start` followed by every node that transitively depends on
    /// it, ordered so each node comes after all of its dependees.
    pub fn recalc_order(&self, start: &str) -> Result<Vec<String>, CircularReference> {
        let mut visited = HashSet::from([start]);
        let mut order = Vec::new();
        let mut stack = vec![(start, self.get_dependents(start))];

        while let Some((node, dependents)) = stack.last_mut() {
            let node = *node;
            match dependents.next() {
                Some(dependent) if dependent == start => {
                    return Err(CircularReference {
                        cell: start.to_string(),
                    });
                }
                Some(dependent) => {
                    if visited.insert(dependent) {
                        stack.push((dependent, self.get_dependents(dependent)));
                    }
                }
                None => {
                    stack.pop();
                    order.push(node);
                }
            }
        }

        Ok(order.into_iter().rev().map(str::to_string).collect())
    }
}
