/// Expression compilation layer
/// 
/// Pure, lock-free building blocks that turn raw expression text into postfix
/// token streams:
/// - Validation of raw input (characters, parentheses)
/// - Tokenization into numbers, operators and parentheses
/// - Shunting-yard conversion to postfix order
/// - A sequential postfix evaluator used as the arithmetic reference

// Error taxonomy shared by every compilation stage
pub mod errors;

// Token and operator definitions plus the tokenizer
pub mod token;

// Cheap pre-filter run before any compilation work
pub mod validation;

// Infix-to-postfix conversion (shunting-yard)
pub mod postfix;

// Sequential postfix evaluation
pub mod evaluate;

// Re-export commonly used items
pub use errors::CalcError;
pub use evaluate::{calculate, evaluate_postfix};
pub use postfix::infix_to_postfix;
pub use token::{tokenize, Operator, Token};
pub use validation::validate_expression;
