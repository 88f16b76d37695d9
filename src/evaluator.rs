use thiserror::Error;

use crate::token::{Op, Token};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// An operator ran out of operands part-way through the walk
    #[error("{} evaluation error!", .0.describe())]
    MissingOperands(Op),
    /// Factorial of a negative or non-finite operand
    #[error("Factorial domain error!")]
    FactorialDomain,
    /// The walk finished with other than exactly one value
    #[error("Input error - too many values!")]
    UnbalancedValues,
}

/// Evaluates a postfix token sequence against a value stack.
///
/// Binary operators pop the right-hand operand first, keeping subtraction
/// and division in source order. Division follows IEEE semantics: a zero
/// divisor yields a signed infinity or NaN, never an error.
pub fn evaluate(postfix: &[Token]) -> Result<f64, EvalError> {
    let mut stack: Vec<f64> = Vec::new();

    for token in postfix {
        match *token {
            Token::Number(value) => stack.push(value),
            Token::Op(op) => {
                let value = match op {
                    Op::Add => {
                        let (oper1, oper2) = pop_pair(&mut stack, op)?;
                        oper1 + oper2
                    }
                    Op::Subtract => {
                        let (oper1, oper2) = pop_pair(&mut stack, op)?;
                        oper1 - oper2
                    }
                    Op::Multiply => {
                        let (oper1, oper2) = pop_pair(&mut stack, op)?;
                        oper1 * oper2
                    }
                    Op::Divide => {
                        let (oper1, oper2) = pop_pair(&mut stack, op)?;
                        oper1 / oper2
                    }
                    Op::Negate => -pop_one(&mut stack, op)?,
                    Op::Reciprocal => 1.0 / pop_one(&mut stack, op)?,
                    Op::Factorial => factorial(pop_one(&mut stack, op)?)?,
                };
                stack.push(value);
            }
            Token::LParen | Token::RParen => {
                unreachable!("parentheses never survive conversion")
            }
        }
    }

    match stack.as_slice() {
        [result] => Ok(*result),
        _ => Err(EvalError::UnbalancedValues),
    }
}

/// Pop both operands of a binary operator; the first popped is the
/// right-hand one.
fn pop_pair(stack: &mut Vec<f64>, op: Op) -> Result<(f64, f64), EvalError> {
    let oper2 = stack.pop().ok_or(EvalError::MissingOperands(op))?;
    let oper1 = stack.pop().ok_or(EvalError::MissingOperands(op))?;
    Ok((oper1, oper2))
}

fn pop_one(stack: &mut Vec<f64>, op: Op) -> Result<f64, EvalError> {
    stack.pop().ok_or(EvalError::MissingOperands(op))
}

/// Factorial of the operand truncated toward zero. Negative and
/// non-finite operands are rejected; anything past 170! overflows `f64`
/// and evaluates to infinity.
fn factorial(oper1: f64) -> Result<f64, EvalError> {
    if oper1 < 0.0 || !oper1.is_finite() {
        return Err(EvalError::FactorialDomain);
    }
    if oper1 >= 171.0 {
        return Ok(f64::INFINITY);
    }
    let n = oper1.trunc() as u64;
    Ok((2..=n).fold(1.0, |product, k| product * k as f64))
}
