//! Formula lexing and syntax validation.
//!
//! Splits formula text into tokens and checks them against the grammar:
//!
//! - Tokens: numbers, variables (`[A-Za-z]+[0-9]+`), `+ - * /`, `(`, `)`
//! - Whitespace separates tokens and is otherwise ignored
//! - Anything else is an invalid token
//!
//! Rules are checked in a fixed order and the first violation is reported,
//! so the same malformed input always yields the same error.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use super::error::FormulaFormatError;
use super::format::format_number;

/// A binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    fn from_symbol(symbol: &str) -> Option<Operator> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// `*` and `/` bind tighter than `+` and `-`.
    pub fn is_multiplicative(self) -> bool {
        matches!(self, Operator::Multiply | Operator::Divide)
    }
}

/// A single validated formula token.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// A numeric literal, keeping the text it was written with.
    Number { literal: String, value: f64 },
    /// A variable name in canonical (uppercase) form.
    Variable(String),
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl Token {
    /// Numbers and variables.
    pub fn is_operand(&self) -> bool {
        matches!(self, Token::Number { .. } | Token::Variable(_))
    }

    /// Tokens allowed to open an expression: operands and `(`.
    fn starts_operand(&self) -> bool {
        self.is_operand() || *self == Token::LeftParen
    }

    /// Tokens allowed to close an expression: operands and `)`.
    fn ends_operand(&self) -> bool {
        self.is_operand() || *self == Token::RightParen
    }
}

impl fmt::Display for Token {
    /// Writes the canonical form of the token.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number { value, .. } => f.write_str(&format_number(*value)),
            Token::Variable(name) => f.write_str(name),
            Token::Operator(op) => write!(f, "{}", op.symbol()),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
        }
    }
}

/// Raw lexer output: either a recognized token or text nothing matched.
enum Lexeme<'a> {
    Token(Token),
    Invalid(&'a str),
}

fn token_re() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| {
        Regex::new(
            r"(?x)
            (?P<lparen>\() |
            (?P<rparen>\)) |
            (?P<op>[+\-*/]) |
            (?P<var>[A-Za-z]+[0-9]+) |
            (?P<num>(?:[0-9]+\.[0-9]*|[0-9]*\.[0-9]+|[0-9]+)(?:[eE][+\-]?[0-9]+)?)
            ",
        )
        .expect("formula token regex must compile")
    })
}

/// Split text that no token pattern matched into whitespace-separated pieces.
fn push_unmatched<'a>(gap: &'a str, out: &mut Vec<Lexeme<'a>>) {
    out.extend(gap.split_whitespace().map(Lexeme::Invalid));
}

fn lex(formula: &str) -> Vec<Lexeme<'_>> {
    let mut lexemes = Vec::new();
    let mut last_end = 0;

    for caps in token_re().captures_iter(formula) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_unmatched(&formula[last_end..whole.start()], &mut lexemes);
        last_end = whole.end();

        let text = whole.as_str();
        let lexeme = if caps.name("lparen").is_some() {
            Lexeme::Token(Token::LeftParen)
        } else if caps.name("rparen").is_some() {
            Lexeme::Token(Token::RightParen)
        } else if let Some(op) = caps.name("op").and_then(|m| Operator::from_symbol(m.as_str())) {
            Lexeme::Token(Token::Operator(op))
        } else if caps.name("var").is_some() {
            Lexeme::Token(Token::Variable(text.to_ascii_uppercase()))
        } else {
            match text.parse::<f64>() {
                Ok(value) => Lexeme::Token(Token::Number {
                    literal: text.to_string(),
                    value,
                }),
                Err(_) => Lexeme::Invalid(text),
            }
        };
        lexemes.push(lexeme);
    }
    push_unmatched(&formula[last_end..], &mut lexemes);

    lexemes
}

/// Tokenize and validate a formula.
pub(crate) fn tokenize(formula: &str) -> Result<Vec<Token>, FormulaFormatError> {
    let lexemes = lex(formula);
    if lexemes.is_empty() {
        return Err(FormulaFormatError::Empty);
    }

    let mut tokens = Vec::with_capacity(lexemes.len());
    for lexeme in lexemes {
        match lexeme {
            Lexeme::Invalid(text) => return Err(FormulaFormatError::InvalidToken(text.to_string())),
            Lexeme::Token(Token::Number { literal, value }) if !value.is_finite() => {
                return Err(FormulaFormatError::NumberOutOfRange(literal));
            }
            Lexeme::Token(token) => tokens.push(token),
        }
    }

    check_parentheses(&tokens)?;
    check_ends(&tokens)?;
    check_operand_follows(&tokens)?;
    check_operator_follows(&tokens)?;
    Ok(tokens)
}

fn check_parentheses(tokens: &[Token]) -> Result<(), FormulaFormatError> {
    let mut open = 0usize;
    for token in tokens {
        match token {
            Token::LeftParen => open += 1,
            Token::RightParen => {
                open = open
                    .checked_sub(1)
                    .ok_or(FormulaFormatError::UnmatchedClosingParen)?;
            }
            _ => {}
        }
    }
    if open != 0 {
        return Err(FormulaFormatError::UnclosedParen(open));
    }
    Ok(())
}

fn check_ends(tokens: &[Token]) -> Result<(), FormulaFormatError> {
    if let Some(first) = tokens.first() {
        if !first.starts_operand() {
            return Err(FormulaFormatError::InvalidFirstToken(first.to_string()));
        }
    }
    if let Some(last) = tokens.last() {
        if !last.ends_operand() {
            return Err(FormulaFormatError::InvalidLastToken(last.to_string()));
        }
    }
    Ok(())
}

/// An open parenthesis or operator must be followed by a number, variable or `(`.
fn check_operand_follows(tokens: &[Token]) -> Result<(), FormulaFormatError> {
    for pair in tokens.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        if matches!(current, Token::LeftParen | Token::Operator(_)) && !next.starts_operand() {
            return Err(FormulaFormatError::ExpectedOperand {
                after: current.to_string(),
                found: next.to_string(),
            });
        }
    }
    Ok(())
}

/// A number, variable or `)` must be followed by an operator or `)`.
fn check_operator_follows(tokens: &[Token]) -> Result<(), FormulaFormatError> {
    for pair in tokens.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        if current.ends_operand() && !matches!(next, Token::Operator(_) | Token::RightParen) {
            return Err(FormulaFormatError::ExpectedOperator {
                after: current.to_string(),
                found: next.to_string(),
            });
        }
    }
    Ok(())
}
