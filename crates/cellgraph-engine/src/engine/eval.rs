//! Formula evaluation.
//!
//! Uses two stacks (operands and pending operators). `*` and `/` are applied
//! as soon as their right operand is known; `+` and `-` wait until an
//! operator of equal or lower precedence, a `)`, or the end of input forces
//! them. This gives standard precedence with left-to-right associativity.

use super::error::FormulaError;
use super::formula::Formula;
use super::tokenize::{Operator, Token};

enum Pending {
    Op(Operator),
    Open,
}

#[derive(Default)]
struct Stacks {
    operands: Vec<f64>,
    operators: Vec<Pending>,
}

fn apply(op: Operator, left: f64, right: f64) -> Result<f64, FormulaError> {
    match op {
        Operator::Add => Ok(left + right),
        Operator::Subtract => Ok(left - right),
        Operator::Multiply => Ok(left * right),
        Operator::Divide if right == 0.0 => Err(FormulaError::division_by_zero()),
        Operator::Divide => Ok(left / right),
    }
}

impl Stacks {
    fn pop_operand(&mut self) -> f64 {
        self.operands
            .pop()
            .expect("validated formula always has an operand for each operator")
    }

    /// Push an operand, first folding it into a pending `*` or `/`.
    fn push_operand(&mut self, value: f64) -> Result<(), FormulaError> {
        let value = match self.operators.last() {
            Some(Pending::Op(op)) if op.is_multiplicative() => {
                let op = *op;
                self.operators.pop();
                let left = self.pop_operand();
                apply(op, left, value)?
            }
            _ => value,
        };
        self.operands.push(value);
        Ok(())
    }

    /// Apply pending `+`/`-` operators down to the nearest `(` or the bottom.
    fn reduce_additive(&mut self) -> Result<(), FormulaError> {
        while let Some(Pending::Op(op)) = self.operators.last() {
            if op.is_multiplicative() {
                break;
            }
            let op = *op;
            self.operators.pop();
            let right = self.pop_operand();
            let left = self.pop_operand();
            self.operands.push(apply(op, left, right)?);
        }
        Ok(())
    }

    fn close_paren(&mut self) -> Result<(), FormulaError> {
        self.reduce_additive()?;
        if let Some(Pending::Open) = self.operators.last() {
            self.operators.pop();
        }
        // The parenthesized value may be the right operand of a pending `*`/`/`.
        let value = self.pop_operand();
        self.push_operand(value)
    }
}

impl Formula {
    /// Evaluate the formula.
    ///
    /// `lookup` receives canonical (uppercase) variable names. Its errors,
    /// and division by zero, stop evaluation and are returned as the
    /// [`FormulaError`] value. Evaluation does not mutate the formula, so
    /// one formula can be evaluated any number of times with different
    /// lookups.
    pub fn evaluate<F>(&self, mut lookup: F) -> Result<f64, FormulaError>
    where
        F: FnMut(&str) -> Result<f64, FormulaError>,
    {
        let mut stacks = Stacks::default();

        for token in self.tokens() {
            match token {
                Token::Number { value, .. } => stacks.push_operand(*value)?,
                Token::Variable(name) => stacks.push_operand(lookup(name)?)?,
                Token::Operator(op) if op.is_multiplicative() => {
                    stacks.operators.push(Pending::Op(*op));
                }
                Token::Operator(op) => {
                    stacks.reduce_additive()?;
                    stacks.operators.push(Pending::Op(*op));
                }
                Token::LeftParen => stacks.operators.push(Pending::Open),
                Token::RightParen => stacks.close_paren()?,
            }
        }

        stacks.reduce_additive()?;
        Ok(stacks.pop_operand())
    }
}
