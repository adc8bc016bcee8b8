/// Task DAG construction from postfix tokens
///
/// Literals receive task IDs of their own and are resolved on the spot; only
/// operators become schedulable [`Task`]s. Each operator pops its two inputs off
/// the build stack, so the final reduction is always the last task created and
/// therefore the root.

use crate::calculation::token::parse_number;
use crate::calculation::{CalcError, Token};
use crate::orchestrator::duration::DurationPolicy;
use crate::orchestrator::types::{Task, TaskId};
use std::collections::HashMap;

/// Where an expression's final value comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuildRoot {
    /// The last created task
    Task(TaskId),
    /// The expression is a bare number and needs no work
    Literal(f64),
}

/// Everything produced by one successful build
#[derive(Debug, Clone)]
pub struct BuiltDag {
    /// Operator tasks in creation order
    pub tasks: Vec<Task>,
    /// Literal IDs with their pre-seeded values
    pub literals: Vec<(TaskId, f64)>,
    pub root: BuildRoot,
    /// First task ID not consumed by this build
    pub next_id: TaskId,
}

/// Builds one expression's tasks, allocating IDs from `next_id` upward
///
/// Nothing outside the builder is touched, so a failed build leaves no trace.
pub struct DagBuilder<'a> {
    next_id: TaskId,
    durations: &'a DurationPolicy,
    resolved: HashMap<TaskId, f64>,
}

impl<'a> DagBuilder<'a> {
    pub fn new(first_id: TaskId, durations: &'a DurationPolicy) -> Self {
        Self {
            next_id: first_id,
            durations,
            resolved: HashMap::new(),
        }
    }

    fn allocate_id(&mut self) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Consume a postfix sequence and produce the task DAG
    pub fn build(mut self, postfix: &[Token]) -> Result<BuiltDag, CalcError> {
        let mut stack: Vec<TaskId> = Vec::new();
        let mut tasks: Vec<Task> = Vec::new();
        let mut literals: Vec<(TaskId, f64)> = Vec::new();

        for token in postfix {
            match token {
                Token::Number(text) => {
                    let value = parse_number(text)?;
                    let id = self.allocate_id();
                    self.resolved.insert(id, value);
                    literals.push((id, value));
                    stack.push(id);
                }
                Token::Operator(op) => {
                    let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                        tracing::debug!("Operator {} is missing operands", op);
                        return Err(CalcError::InsufficientOperands);
                    };

                    let id = self.allocate_id();
                    let mut task = Task::new(id, *op, [left, right], self.durations.duration_for(*op));
                    task.arg1 = self.resolved.get(&left).copied();
                    task.arg2 = self.resolved.get(&right).copied();

                    if task.has_operands() {
                        if task.divides_by_zero() {
                            return Err(CalcError::DivisionByZero);
                        }
                        task.is_ready = true;
                    }

                    tracing::debug!(
                        "Built task {}: {} {} {} (ready: {})",
                        id, left, op, right, task.is_ready
                    );
                    tasks.push(task);
                    stack.push(id);
                }
                Token::LeftParen | Token::RightParen => {
                    return Err(CalcError::InvalidExpressionFormat);
                }
            }
        }

        let [root_id] = stack.as_slice() else {
            tracing::debug!("Build stack ended with {} entries", stack.len());
            return Err(CalcError::InvalidExpressionFormat);
        };

        let root = match tasks.last() {
            Some(task) => BuildRoot::Task(task.id),
            None => BuildRoot::Literal(self.resolved.get(root_id).copied().ok_or(CalcError::InvalidExpressionFormat)?),
        };

        Ok(BuiltDag {
            tasks,
            literals,
            root,
            next_id: self.next_id,
        })
    }
}
