//! Validated arithmetic formulas.
//!
//! A [`Formula`] is an immutable token sequence that has passed every
//! syntax rule in [`tokenize`](super::tokenize). Identity is defined by the
//! canonical string: whitespace removed, variables uppercased, numbers
//! rendered by [`format_number`](super::format_number). So `a1 + 2.00` and
//! `A1+2` are the same formula.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::error::FormulaFormatError;
use super::tokenize::{Token, tokenize};

/// An infix arithmetic expression over numbers and variables.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Formula {
    tokens: Vec<Token>,
    canonical: String,
}

impl Formula {
    /// Parse and validate formula text (without a leading `=`).
    pub fn new(formula: &str) -> Result<Formula, FormulaFormatError> {
        let tokens = tokenize(formula)?;
        let canonical = tokens.iter().map(|t| t.to_string()).collect();
        Ok(Formula { tokens, canonical })
    }

    /// The distinct variables referenced by the formula, uppercased.
    pub fn variables(&self) -> HashSet<String> {
        self.tokens
            .iter()
            .filter_map(|token| match token {
                Token::Variable(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The canonical string, also available through `Display`.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for Formula {}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl std::str::FromStr for Formula {
    type Err = FormulaFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::new(s)
    }
}

impl TryFrom<String> for Formula {
    type Error = FormulaFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Formula::new(&value)
    }
}

impl From<Formula> for String {
    fn from(formula: Formula) -> String {
        formula.canonical
    }
}
