//! Dependency graph between named nodes.
//!
//! Stores a set of ordered pairs `(dependee, dependent)`, meaning the
//! dependent's value is computed from the dependee's. Two indices are kept
//! in step by every mutation:
//!
//! - `dependents`: dependee -> nodes that depend on it
//! - `dependees`: dependent -> nodes it depends on
//!
//! A node with no relationships has no entry in either index. Every
//! operation accepts any string; unknown nodes simply have empty sets.

use std::collections::{HashMap, HashSet};

#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    dependents: HashMap<String, HashSet<String>>,
    dependees: HashMap<String, HashSet<String>>,
}

/// Remove `value` from the set at `key`, dropping the entry once it is empty.
fn remove_from(index: &mut HashMap<String, HashSet<String>>, key: &str, value: &str) {
    if let Some(set) = index.get_mut(key) {
        set.remove(value);
        if set.is_empty() {
            index.remove(key);
        }
    }
}

fn related<'a>(
    index: &'a HashMap<String, HashSet<String>>,
    node: &str,
) -> impl Iterator<Item = &'a str> + use<'a> {
    index
        .get(node)
        .into_iter()
        .flat_map(|set| set.iter().map(String::as_str))
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `(dependee, dependent)` pairs.
    pub fn size(&self) -> usize {
        self.dependents.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }

    pub fn has_dependents(&self, node: &str) -> bool {
        self.dependents.get(node).is_some_and(|set| !set.is_empty())
    }

    pub fn has_dependees(&self, node: &str) -> bool {
        self.dependees.get(node).is_some_and(|set| !set.is_empty())
    }

    /// Nodes whose values depend on `node`.
    pub fn get_dependents<'a>(&'a self, node: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        related(&self.dependents, node)
    }

    /// Nodes that `node` depends on.
    pub fn get_dependees<'a>(&'a self, node: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        related(&self.dependees, node)
    }

    /// Record that `dependent` depends on `dependee`. No-op if already present.
    pub fn add_dependency(&mut self, dependee: &str, dependent: &str) {
        self.dependents
            .entry(dependee.to_string())
            .or_default()
            .insert(dependent.to_string());
        self.dependees
            .entry(dependent.to_string())
            .or_default()
            .insert(dependee.to_string());
    }

    /// Remove the pair if present.
    pub fn remove_dependency(&mut self, dependee: &str, dependent: &str) {
        remove_from(&mut self.dependents, dependee, dependent);
        remove_from(&mut self.dependees, dependent, dependee);
    }

    /// Replace every `(node, *)` pair with `(node, t)` for each `t` in `new_dependents`.
    pub fn replace_dependents<I, S>(&mut self, node: &str, new_dependents: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(old) = self.dependents.remove(node) {
            for dependent in &old {
                remove_from(&mut self.dependees, dependent, node);
            }
        }
        for dependent in new_dependents {
            self.add_dependency(node, dependent.as_ref());
        }
    }

    /// Replace every `(*, node)` pair with `(s, node)` for each `s` in `new_dependees`.
    pub fn replace_dependees<I, S>(&mut self, node: &str, new_dependees: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(old) = self.dependees.remove(node) {
            for dependee in &old {
                remove_from(&mut self.dependents, dependee, node);
            }
        }
        for dependee in new_dependees {
            self.add_dependency(dependee.as_ref(), node);
        }
    }

    /// Panics if the two indices disagree or hold empty sets.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        for (dependee, set) in &self.dependents {
            assert!(!set.is_empty(), "empty dependents entry for {dependee}");
            for dependent in set {
                assert!(
                    self.dependees
                        .get(dependent)
                        .is_some_and(|s| s.contains(dependee)),
                    "({dependee}, {dependent}) missing from reverse index"
                );
            }
        }
        for (dependent, set) in &self.dependees {
            assert!(!set.is_empty(), "empty dependees entry for {dependent}");
            for dependee in set {
                assert!(
                    self.dependents
                        .get(dependee)
                        .is_some_and(|s| s.contains(dependent)),
                    "({dependee}, {dependent}) missing from forward index"
                );
            }
        }
        let reverse_size: usize = self.dependees.values().map(HashSet::len).sum();
        assert_eq!(self.size(), reverse_size);
    }
}
