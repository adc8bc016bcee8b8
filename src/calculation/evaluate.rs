/// Sequential postfix evaluation
///
/// Computes an expression in-process, without the scheduler. The distributed
/// pipeline must agree with this evaluator on every valid input.

use crate::calculation::errors::{CalcError, CalcResult};
use crate::calculation::postfix::infix_to_postfix;
use crate::calculation::token::{parse_number, tokenize, Token};
use crate::calculation::validation::validate_expression;

/// Evaluate a postfix token sequence with an operand stack
pub fn evaluate_postfix(tokens: &[Token]) -> CalcResult<f64> {
    let mut stack: Vec<f64> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(text) => stack.push(parse_number(text)?),
            Token::Operator(op) => {
                let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
                    return Err(CalcError::InsufficientOperands);
                };
                stack.push(op.apply(lhs, rhs)?);
            }
            // Parentheses never survive the postfix conversion.
            Token::LeftParen | Token::RightParen => return Err(CalcError::InvalidExpressionFormat),
        }
    }

    match stack.as_slice() {
        [result] => Ok(*result),
        _ => Err(CalcError::InvalidExpressionFormat),
    }
}

/// Validate, convert and evaluate an expression in one call
pub fn calculate(expression: &str) -> CalcResult<f64> {
    validate_expression(expression)?;
    let postfix = infix_to_postfix(&tokenize(expression))?;
    let result = evaluate_postfix(&postfix)?;
    tracing::debug!("Evaluated {:?} = {}", expression, result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_basic_expressions() {
        let cases = [
            ("1+1", 2.0),
            ("(2+2)*2", 8.0),
            ("2+2*2", 6.0),
            ("1/2", 0.5),
            ("2+3*4", 14.0),
            ("(2+3)*4", 20.0),
            ("8-3-2", 3.0),
            ("42", 42.0),
        ];
        for (expr, expected) in cases {
            assert_eq!(calculate(expr), Ok(expected), "{expr}");
        }
    }

    #[test]
    fn reports_failures() {
        assert_eq!(calculate(""), Err(CalcError::EmptyExpression));
        assert_eq!(calculate("1+1*"), Err(CalcError::InsufficientOperands));
        assert_eq!(calculate("(1+2"), Err(CalcError::MismatchedParentheses));
        assert_eq!(calculate("1+2)"), Err(CalcError::MismatchedParentheses));
        assert_eq!(calculate("10/0"), Err(CalcError::DivisionByZero));
        assert_eq!(calculate("1 2"), Err(CalcError::InvalidExpressionFormat));
        assert_eq!(calculate("1.2.3+1"), Err(CalcError::InvalidNumber("1.2.3".into())));
    }
}
