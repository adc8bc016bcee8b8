/// Core scheduler type definitions
///
/// Tasks and expressions are serialized straight into inspection responses, so
/// field names follow the wire format used by agents and clients.

use crate::calculation::Operator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Process-wide task identifier, shared by literals and operator tasks
pub type TaskId = u64;

/// Expression identifier, allocated independently from task IDs
pub type ExpressionId = u64;

/// Lifecycle of a single task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Waiting for operands or for an agent to report a result
    Pending,
    /// Result recorded
    Completed,
}

/// Lifecycle of a submitted expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpressionStatus {
    Pending,
    Completed,
    /// A deferred divisor resolved to zero; the expression can never complete
    Failed,
}

/// One binary operation of an expression's DAG
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub operation: Operator,
    /// Left operand, known once the first parent has a result
    pub arg1: Option<f64>,
    /// Right operand, known once the second parent has a result
    pub arg2: Option<f64>,
    /// Parents feeding `arg1` and `arg2`, in that order
    pub parent_task_ids: [TaskId; 2],
    pub status: TaskStatus,
    pub is_ready: bool,
    /// Advisory execution time for the agent, in milliseconds
    pub operation_time: u64,
    pub result: Option<f64>,
}

impl Task {
    /// Create a task with no operands filled in yet
    pub fn new(id: TaskId, operation: Operator, parents: [TaskId; 2], operation_time: u64) -> Self {
        Self {
            id,
            operation,
            arg1: None,
            arg2: None,
            parent_task_ids: parents,
            status: TaskStatus::Pending,
            is_ready: false,
            operation_time,
            result: None,
        }
    }

    /// Both operands known
    pub fn has_operands(&self) -> bool {
        self.arg1.is_some() && self.arg2.is_some()
    }

    /// Whether the known divisor makes this task impossible to execute
    pub fn divides_by_zero(&self) -> bool {
        self.operation == Operator::Div && self.arg2 == Some(0.0)
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// A submitted expression and every task derived from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expression {
    pub id: ExpressionId,
    /// Submitted text, verbatim
    pub source: String,
    /// Tasks in creation order; the last one is the root of the DAG
    pub tasks: Vec<Task>,
    pub status: ExpressionStatus,
    pub result: Option<f64>,
    /// Failure reason for `Failed` expressions
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Expression {
    /// Root task, if the expression has any operator at all
    pub fn root(&self) -> Option<&Task> {
        self.tasks.last()
    }

    pub fn all_tasks_completed(&self) -> bool {
        self.tasks.iter().all(Task::is_completed)
    }

    pub fn summary(&self) -> ExpressionSummary {
        ExpressionSummary {
            id: self.id,
            status: self.status,
            result: self.result,
        }
    }
}

/// Compact listing entry for an expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionSummary {
    pub id: ExpressionId,
    pub status: ExpressionStatus,
    pub result: Option<f64>,
}
