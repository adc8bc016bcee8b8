/// distcalc: distributed arithmetic expression evaluation
/// 
/// Expressions are compiled into DAGs of binary operations, and a single
/// scheduler hands ready operations to polling agents, propagating each result to
/// the operations that depend on it.

// Core configuration and setup
pub mod config;

// Expression compilation - validation, tokenization, shunting-yard, reference evaluator
pub mod calculation;

// Task DAG construction and the dependency-driven scheduler
pub mod orchestrator;

// HTTP API layer - expression submission, inspection and agent task endpoints
pub mod api;

// Worker process that polls the orchestrator and computes tasks
pub mod agent;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use calculation::{CalcError, Operator};
pub use orchestrator::{Expression, ExpressionStatus, Scheduler, SchedulerError, Task, TaskStatus};
pub use server::start_server;
