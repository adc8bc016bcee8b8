/// Shunting-yard conversion from infix to postfix order

use crate::calculation::errors::{CalcError, CalcResult};
use crate::calculation::token::{Operator, Token};

/// Entry on the operator stack: either a pending operator or an open parenthesis
#[derive(Debug, Clone, Copy)]
enum StackEntry {
    Operator(Operator),
    LeftParen,
}

/// Convert an infix token sequence into postfix order
///
/// All operators are binary and left-associative: an incoming operator first pops
/// every stacked operator of greater or equal precedence.
pub fn infix_to_postfix(tokens: &[Token]) -> CalcResult<Vec<Token>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<StackEntry> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) => output.push(token.clone()),
            Token::LeftParen => stack.push(StackEntry::LeftParen),
            Token::RightParen => loop {
                match stack.pop() {
                    Some(StackEntry::Operator(op)) => output.push(Token::Operator(op)),
                    Some(StackEntry::LeftParen) => break,
                    None => {
                        tracing::debug!("Closing parenthesis without a matching opener");
                        return Err(CalcError::MismatchedParentheses);
                    }
                }
            },
            Token::Operator(incoming) => {
                while let Some(StackEntry::Operator(top)) = stack.last().copied() {
                    if top.precedence() < incoming.precedence() {
                        break;
                    }
                    stack.pop();
                    output.push(Token::Operator(top));
                }
                stack.push(StackEntry::Operator(*incoming));
            }
        }
    }

    while let Some(entry) = stack.pop() {
        match entry {
            StackEntry::Operator(op) => output.push(Token::Operator(op)),
            StackEntry::LeftParen => {
                tracing::debug!("Opening parenthesis left unclosed");
                return Err(CalcError::MismatchedParentheses);
            }
        }
    }

    Ok(output)
}
