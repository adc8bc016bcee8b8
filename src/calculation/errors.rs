/// Compilation error taxonomy
/// 
/// Every failure a submission can hit before it reaches the scheduler. The enum is
/// closed so the HTTP layer can map variants to status codes structurally.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("expression is empty")]
    EmptyExpression,

    #[error("invalid character in expression: {0:?}")]
    InvalidCharacter(char),

    #[error("mismatched parentheses")]
    MismatchedParentheses,

    #[error("insufficient operands for operation")]
    InsufficientOperands,

    #[error("invalid expression format")]
    InvalidExpressionFormat,

    #[error("invalid number literal: {0}")]
    InvalidNumber(String),

    #[error("division by zero")]
    DivisionByZero,
}

pub type CalcResult<T> = std::result::Result<T, CalcError>;
