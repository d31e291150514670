//! Error types for formula construction and evaluation.

use thiserror::Error;

/// Why a formula string was rejected at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaFormatError {
    #[error("Formula must contain at least one token.")]
    Empty,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Closing parenthesis without matching opening parenthesis.")]
    UnmatchedClosingParen,

    #[error("Mismatched parentheses: {0} opening parenthesis(es) not closed.")]
    UnclosedParen(usize),

    #[error("The first token must be a number, a variable, or an opening parenthesis, found '{0}'.")]
    InvalidFirstToken(String),

    #[error("The last token must be a number, a variable, or a closing parenthesis, found '{0}'.")]
    InvalidLastToken(String),

    /// After `(` or an operator, only an operand or `(` may appear.
    #[error("Expected a number, variable, or '(' after '{after}', found '{found}'.")]
    ExpectedOperand { after: String, found: String },

    /// After an operand or `)`, only an operator or `)` may appear.
    #[error("Expected an operator or ')' after '{after}', found '{found}'.")]
    ExpectedOperator { after: String, found: String },

    #[error("Number out of range: {0}")]
    NumberOutOfRange(String),
}

/// A formula evaluated to an error value instead of a number.
///
/// This is a result, not a failure: cells holding it are still readable and
/// dependents see it as a non-numeric operand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct FormulaError {
    pub reason: String,
}

impl FormulaError {
    pub fn new(reason: impl Into<String>) -> Self {
        FormulaError {
            reason: reason.into(),
        }
    }

    pub fn division_by_zero() -> Self {
        FormulaError::new("Division by zero")
    }

    pub fn unknown_variable(name: &str) -> Self {
        FormulaError::new(format!("Unknown variable: {}", name))
    }
}
