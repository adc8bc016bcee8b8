/// Scheduler error taxonomy

use crate::calculation::CalcError;
use crate::orchestrator::types::{ExpressionId, TaskId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// The submission failed validation or compilation; nothing was registered
    #[error(transparent)]
    Compile(#[from] CalcError),

    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("task already completed: {0}")]
    TaskAlreadyCompleted(TaskId),

    /// A deferred divisor resolved to zero while propagating a completion.
    /// The completion itself has been recorded.
    #[error("division by zero in task {task_id} of expression {expression_id}")]
    DivisionByZero {
        task_id: TaskId,
        expression_id: ExpressionId,
    },

    /// A reported result was NaN or infinite; the expression has been failed
    #[error("non-finite result for task {task_id} of expression {expression_id}")]
    NonFiniteResult {
        task_id: TaskId,
        expression_id: ExpressionId,
    },

    #[error("expression not found: {0}")]
    ExpressionNotFound(ExpressionId),
}

pub type SchedulerResult<T> = std::result::Result<T, SchedulerError>;
