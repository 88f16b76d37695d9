//! An interactive desk calculator: incrementally typed infix expressions
//! are lexed, converted to postfix with the shunting-yard algorithm, and
//! evaluated to an `f64` result.
//!
//! The one-shot pipeline is exposed as [`eval`]:
//!
//! ```
//! assert_eq!(deskcalc::eval("3+5*2", 0.0), Ok(13.0));
//! ```
//!
//! The stateful [`Calculator`] keeps the pending input text and the last
//! result, and reports every outcome through subscription channels, so a
//! display layer only ever reacts to notifications:
//!
//! ```
//! let mut calculator = deskcalc::Calculator::new();
//! calculator.append_input("1+2");
//! calculator.evaluate();
//! assert_eq!(calculator.result(), 3.0);
//! ```
//!
//! An expression that opens with an operator continues from the previous
//! result, so `+2` after the above evaluates to `5`. Besides the four
//! binary operators and parentheses, the input language has postfix `!`
//! (factorial) and the `1/x` reciprocal key.

mod calculator;
mod converter;
mod editor;
mod evaluator;
mod lexer;
mod token;

pub use calculator::{eval, CalcError, Calculator};
pub use converter::{convert, ConvertError};
pub use editor::InputBuffer;
pub use evaluator::{evaluate, EvalError};
pub use lexer::tokenize;
pub use token::{Op, Token};
