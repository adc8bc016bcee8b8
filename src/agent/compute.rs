/// Arithmetic performed by agents

use crate::calculation::{CalcError, Operator};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputeError {
    #[error("invalid operands: {0} and {1}")]
    InvalidOperands(f64, f64),

    #[error("division by zero")]
    DivisionByZero,

    #[error("result of {0} {1} {2} is not a finite number")]
    Overflow(f64, Operator, f64),
}

/// Apply `operation` to a pair of finite operands, insisting on a finite result
pub fn perform_operation(arg1: f64, arg2: f64, operation: Operator) -> Result<f64, ComputeError> {
    if !arg1.is_finite() || !arg2.is_finite() {
        return Err(ComputeError::InvalidOperands(arg1, arg2));
    }

    let result = operation.apply(arg1, arg2).map_err(|e| match e {
        CalcError::DivisionByZero => ComputeError::DivisionByZero,
        _ => ComputeError::InvalidOperands(arg1, arg2),
    })?;

    if !result.is_finite() {
        return Err(ComputeError::Overflow(arg1, operation, arg2));
    }
    Ok(result)
}
