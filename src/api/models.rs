/// Wire formats for the HTTP API
/// 
/// The agent deserializes the same task types the orchestrator serializes, so
/// both sides share these definitions.

use crate::calculation::Operator;
use crate::orchestrator::{Expression, ExpressionId, ExpressionStatus, ExpressionSummary, Task, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// POST /api/v1/calculate body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    pub expression: String,
}

/// POST /api/v1/calculate success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateResponse {
    pub id: ExpressionId,
}

/// Work item handed to an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAssignment {
    pub id: TaskId,
    pub arg1: f64,
    pub arg2: f64,
    pub operation: Operator,
    /// Simulated execution time in milliseconds
    pub operation_time: u64,
}

impl TaskAssignment {
    /// Build an assignment from a dispatched task; `None` if an operand is missing
    pub fn from_task(task: &Task) -> Option<Self> {
        Some(Self {
            id: task.id,
            arg1: task.arg1?,
            arg2: task.arg2?,
            operation: task.operation,
            operation_time: task.operation_time,
        })
    }
}

/// GET /internal/task success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskEnvelope {
    pub task: TaskAssignment,
}

/// POST /internal/task body
///
/// Carries either the computed `result` or, when the agent could not produce a
/// finite value, an `error` describing why. JSON has no spelling for infinities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResultRequest {
    pub id: TaskId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TaskResultRequest {
    pub fn success(id: TaskId, result: f64) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: TaskId, error: impl Into<String>) -> Self {
        Self {
            id,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// GET /api/v1/expressions body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionList {
    pub expressions: Vec<ExpressionSummary>,
}

/// Detailed view of one expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionView {
    pub id: ExpressionId,
    pub status: ExpressionStatus,
    pub result: Option<f64>,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub task_count: usize,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&Expression> for ExpressionView {
    fn from(expression: &Expression) -> Self {
        Self {
            id: expression.id,
            status: expression.status,
            result: expression.result,
            source: expression.source.clone(),
            error: expression.error.clone(),
            task_count: expression.tasks.len(),
            created_at: expression.created_at,
            completed_at: expression.completed_at,
        }
    }
}

/// GET /api/v1/expressions/{id} body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionEnvelope {
    pub expression: ExpressionView,
}

/// GET /api/v1/result/{id} body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultResponse {
    pub result: f64,
}

/// Error body used by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
