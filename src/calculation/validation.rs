/// Raw-input pre-filter
///
/// Rejects obviously broken submissions before tokenization. Passing validation
/// does not mean the expression is complete: `2++3` gets through and fails later.

use crate::calculation::errors::{CalcError, CalcResult};

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || matches!(c, '.' | '+' | '-' | '*' | '/' | '(' | ')')
}

/// Validate raw expression text
///
/// Checks, in order: emptiness, the character whitelist, and parenthesis balance
/// (a running depth that never goes negative and ends at zero).
pub fn validate_expression(expression: &str) -> CalcResult<()> {
    if expression.is_empty() {
        tracing::debug!("Rejected empty expression");
        return Err(CalcError::EmptyExpression);
    }

    if let Some(c) = expression.chars().find(|&c| !is_allowed(c)) {
        tracing::debug!("Rejected expression with invalid character {:?}", c);
        return Err(CalcError::InvalidCharacter(c));
    }

    let mut depth: i64 = 0;
    for c in expression.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(CalcError::MismatchedParentheses);
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(CalcError::MismatchedParentheses);
    }

    Ok(())
}
