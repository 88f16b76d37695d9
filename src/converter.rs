use compact_str::CompactString;
use thiserror::Error;

use crate::token::{Op, Token};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Input error - mismatched parenthesis!")]
    MismatchedParenthesis,
}

/// Converts an infix lexeme sequence to postfix order with the
/// shunting-yard algorithm.
///
/// When the sequence opens with an operator rather than a number,
/// `implied` is emitted as the leading operand, so an expression like
/// `+2` continues from the previous result. Lexemes that are neither
/// numbers nor known symbols are skipped.
pub fn convert(lexemes: &[CompactString], implied: f64) -> Result<Vec<Token>, ConvertError> {
    let mut output = Vec::with_capacity(lexemes.len());
    let mut ops: Vec<Token> = Vec::new();

    for (i, lexeme) in lexemes.iter().enumerate() {
        if let Ok(value) = lexeme.parse::<f64>() {
            output.push(Token::Number(value));
            continue;
        }

        let token = match lexeme.as_str() {
            "+" => Token::Op(Op::Add),
            "-" => Token::Op(Op::Subtract),
            "*" => Token::Op(Op::Multiply),
            "/" => Token::Op(Op::Divide),
            "!" => Token::Op(Op::Factorial),
            "$" => Token::Op(Op::Reciprocal),
            "~" => Token::Op(Op::Negate),
            "(" => Token::LParen,
            ")" => Token::RParen,
            _ => continue,
        };

        match token {
            Token::Op(op) => {
                if i == 0 {
                    output.push(Token::Number(implied));
                }
                // Ties pop, which makes equal precedence left-associative.
                // A left parenthesis on top never pops.
                while let Some(&Token::Op(top)) = ops.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    ops.pop();
                    output.push(Token::Op(top));
                }
                ops.push(token);
            }
            Token::LParen => ops.push(token),
            Token::RParen => loop {
                match ops.pop() {
                    Some(Token::LParen) => break,
                    Some(pending) => output.push(pending),
                    None => return Err(ConvertError::MismatchedParenthesis),
                }
            },
            Token::Number(_) => unreachable!("numbers are handled by the parse above"),
        }
    }

    while let Some(pending) = ops.pop() {
        if matches!(pending, Token::LParen) {
            return Err(ConvertError::MismatchedParenthesis);
        }
        output.push(pending);
    }

    Ok(output)
}
