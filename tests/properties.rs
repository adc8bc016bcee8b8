mod common;

use common::compute;
use distcalc::calculation::token::join_tokens;
use distcalc::calculation::{calculate, tokenize, CalcError, Operator};
use distcalc::orchestrator::{ExpressionStatus, SchedulerError, SchedulerState};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Expr {
    Num(String, f64),
    Bin(Box<Expr>, Operator, Box<Expr>),
}

impl Expr {
    fn eval(&self) -> Result<f64, CalcError> {
        match self {
            Expr::Num(_, value) => Ok(*value),
            Expr::Bin(lhs, op, rhs) => op.apply(lhs.eval()?, rhs.eval()?),
        }
    }

    /// Every binary node wrapped in parentheses: grouping matches the tree.
    fn render_grouped(&self) -> String {
        match self {
            Expr::Num(text, _) => text.clone(),
            Expr::Bin(lhs, op, rhs) => {
                format!("({} {} {})", lhs.render_grouped(), op, rhs.render_grouped())
            }
        }
    }

    /// No parentheses at all: grouping comes from precedence alone.
    fn render_flat(&self) -> String {
        match self {
            Expr::Num(text, _) => text.clone(),
            Expr::Bin(lhs, op, rhs) => format!("{}{}{}", lhs.render_flat(), op, rhs.render_flat()),
        }
    }
}

fn operator() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Add),
        Just(Operator::Sub),
        Just(Operator::Mul),
        Just(Operator::Div),
    ]
}

fn expr_strategy() -> impl Strategy<Value = Expr> {
    let leaf = (0u32..50, proptest::option::of(0u32..10)).prop_map(|(int, frac)| match frac {
        Some(frac) => {
            let text = format!("{}.{}", int, frac);
            let value = text.parse().unwrap();
            Expr::Num(text, value)
        }
        None => Expr::Num(int.to_string(), f64::from(int)),
    });

    leaf.prop_recursive(5, 32, 2, |inner| {
        (inner.clone(), operator(), inner)
            .prop_map(|(lhs, op, rhs)| Expr::Bin(Box::new(lhs), op, Box::new(rhs)))
    })
}

/// What the scheduler made of an expression after running every dispatchable task
#[derive(Debug, PartialEq)]
enum Outcome {
    Value(f64),
    DivisionByZero,
}

fn run_distributed(source: &str) -> Outcome {
    let mut state = SchedulerState::default();
    let id = match state.compile(source) {
        Ok(id) => id,
        Err(SchedulerError::Compile(CalcError::DivisionByZero)) => return Outcome::DivisionByZero,
        Err(e) => panic!("unexpected compile error for {source:?}: {e}"),
    };

    while let Some(task) = state.dispatch() {
        match state.complete(task.id, compute(&task)) {
            Ok(()) | Err(SchedulerError::DivisionByZero { .. }) => {}
            Err(e) => panic!("unexpected completion error: {e}"),
        }
    }

    let expression = state.expression(id).unwrap();
    match expression.status {
        ExpressionStatus::Completed => Outcome::Value(expression.result.unwrap()),
        ExpressionStatus::Failed => Outcome::DivisionByZero,
        ExpressionStatus::Pending => panic!("{source:?} stalled with nothing dispatchable"),
    }
}

fn expected(reference: Result<f64, CalcError>) -> Outcome {
    match reference {
        Ok(value) => Outcome::Value(value),
        Err(CalcError::DivisionByZero) => Outcome::DivisionByZero,
        Err(e) => panic!("reference evaluator failed: {e}"),
    }
}

proptest! {
    #[test]
    fn grouped_expressions_match_tree_evaluation(expr in expr_strategy()) {
        let source = expr.render_grouped();
        prop_assert_eq!(run_distributed(&source), expected(expr.eval()), "{}", source);
    }

    #[test]
    fn flat_expressions_match_reference_evaluator(expr in expr_strategy()) {
        let source = expr.render_flat();
        prop_assert_eq!(run_distributed(&source), expected(calculate(&source)), "{}", source);
    }

    #[test]
    fn tokenizer_is_stable_under_rejoin(input in "[0-9. +*/()a-z-]{0,40}") {
        let tokens = tokenize(&input);
        prop_assert_eq!(tokenize(&join_tokens(&tokens)), tokens);
    }
}
