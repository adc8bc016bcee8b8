/// Orchestrator core
/// 
/// This module owns the expression/task state machine. It handles:
/// - Building task DAGs from postfix token streams
/// - Tracking readiness through a FIFO ready queue and a pending set
/// - Dispatching each ready task exactly once
/// - Propagating completions to dependent tasks and expressions

// Task, expression and status definitions
pub mod types;

// Scheduler-level error taxonomy
pub mod errors;

// Operator -> simulated duration lookup
pub mod duration;

// Postfix -> task DAG construction
pub mod builder;

// Authoritative, single-owner scheduler state
pub mod state;

// Lock-guarded async facade shared by the HTTP layer
pub mod scheduler;

// Re-export main types
pub use duration::DurationPolicy;
pub use errors::SchedulerError;
pub use scheduler::Scheduler;
pub use state::SchedulerState;
pub use types::{Expression, ExpressionId, ExpressionStatus, ExpressionSummary, Task, TaskId, TaskStatus};
