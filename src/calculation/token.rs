/// Lexical tokens and the tokenizer
///
/// Numbers keep their source spelling so re-tokenizing joined output reproduces
/// the same sequence. Parsing into `f64` happens later, in the DAG builder.

use crate::calculation::errors::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four supported binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Binding strength used by the shunting-yard conversion
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
        }
    }

    /// Apply the operator to two operands
    ///
    /// Division by an exact zero is rejected instead of producing an infinity.
    pub fn apply(self, lhs: f64, rhs: f64) -> CalcResult<f64> {
        match self {
            Operator::Add => Ok(lhs + rhs),
            Operator::Sub => Ok(lhs - rhs),
            Operator::Mul => Ok(lhs * rhs),
            Operator::Div if rhs == 0.0 => Err(CalcError::DivisionByZero),
            Operator::Div => Ok(lhs / rhs),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single lexical unit of an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Decimal literal exactly as written (digits and dots)
    Number(String),
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(text) => f.write_str(text),
            Token::Operator(op) => write!(f, "{}", op),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
        }
    }
}

/// Split an expression into tokens
///
/// Digits and `.` accumulate into one number until any other character shows up.
/// Operators and parentheses become single-character tokens; everything else,
/// whitespace included, is dropped. Never fails: malformed input surfaces in the
/// converter or the builder.
pub fn tokenize(expression: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut number = String::new();

    for c in expression.chars() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
            continue;
        }

        if !number.is_empty() {
            tokens.push(Token::Number(std::mem::take(&mut number)));
        }

        match c {
            '(' => tokens.push(Token::LeftParen),
            ')' => tokens.push(Token::RightParen),
            _ => {
                if let Some(op) = Operator::from_char(c) {
                    tokens.push(Token::Operator(op));
                }
            }
        }
    }

    if !number.is_empty() {
        tokens.push(Token::Number(number));
    }

    tracing::trace!("Tokenized {:?} into {} tokens", expression, tokens.len());
    tokens
}

/// Parse a numeric literal produced by [`tokenize`]
///
/// Literals too large for an `f64` are rejected rather than becoming infinite.
pub fn parse_number(text: &str) -> CalcResult<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CalcError::InvalidNumber(text.to_string()))
}

/// Render tokens back into text, separated by single spaces
pub fn join_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Token {
        Token::Number(s.to_string())
    }

    #[test]
    fn splits_numbers_operators_and_parens() {
        let tokens = tokenize("(12.5+3)*4");
        assert_eq!(
            tokens,
            vec![
                Token::LeftParen,
                num("12.5"),
                Token::Operator(Operator::Add),
                num("3"),
                Token::RightParen,
                Token::Operator(Operator::Mul),
                num("4"),
            ]
        );
    }

    #[test]
    fn drops_whitespace_and_unknown_characters() {
        assert_eq!(
            tokenize(" 1 \t+ x 2 "),
            vec![num("1"), Token::Operator(Operator::Add), num("2")]
        );
    }

    #[test]
    fn whitespace_splits_numbers() {
        assert_eq!(tokenize("1 2"), vec![num("1"), num("2")]);
    }

    #[test]
    fn keeps_malformed_literals_verbatim() {
        assert_eq!(tokenize("1.2.3"), vec![num("1.2.3")]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn retokenizing_joined_output_is_stable() {
        for expr in ["2+3*4", "(1.5 - 2)/ (3*(4+5))", "10/0", "7", "((8))", "1+1*"] {
            let first = tokenize(expr);
            let second = tokenize(&join_tokens(&first));
            assert_eq!(first, second, "unstable for {expr}");
        }
    }

    #[test]
    fn oversized_literals_are_invalid() {
        let huge = "9".repeat(400);
        assert_eq!(parse_number(&huge), Err(CalcError::InvalidNumber(huge.clone())));
        assert_eq!(parse_number(&"9".repeat(300)).map(f64::is_finite), Ok(true));
        assert_eq!(parse_number("0.5"), Ok(0.5));
    }

    #[test]
    fn operator_precedence_and_apply() {
        assert!(Operator::Mul.precedence() > Operator::Add.precedence());
        assert_eq!(Operator::Div.precedence(), Operator::Mul.precedence());
        assert_eq!(Operator::Sub.precedence(), Operator::Add.precedence());
        assert_eq!(Operator::Sub.apply(2.0, 5.0), Ok(-3.0));
        assert_eq!(Operator::Div.apply(1.0, 2.0), Ok(0.5));
        assert_eq!(Operator::Div.apply(1.0, 0.0), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn operators_serialize_as_symbols() {
        assert_eq!(serde_json::to_string(&Operator::Mul).unwrap(), "\"*\"");
        let op: Operator = serde_json::from_str("\"-\"").unwrap();
        assert_eq!(op, Operator::Sub);
    }
}
