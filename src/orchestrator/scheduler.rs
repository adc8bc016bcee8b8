/// Shared scheduler handle
///
/// Wraps [`SchedulerState`] in one exclusive lock. Compile, dispatch and complete
/// (and the read-only inspection calls) each take the lock for their whole
/// duration, so a completion and its cascade are never interleaved with another
/// operation. None of the calls wait for work to appear: polling and backoff are
/// the caller's job.

use crate::orchestrator::duration::DurationPolicy;
use crate::orchestrator::errors::{SchedulerError, SchedulerResult};
use crate::orchestrator::state::{QueueStats, SchedulerState};
use crate::orchestrator::types::{Expression, ExpressionId, ExpressionSummary, Task, TaskId};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Cloneable handle to the single scheduler state of the process
#[derive(Debug, Clone)]
pub struct Scheduler {
    state: Arc<Mutex<SchedulerState>>,
}

impl Scheduler {
    pub fn new(durations: DurationPolicy) -> Self {
        Self {
            state: Arc::new(Mutex::new(SchedulerState::new(durations))),
        }
    }

    /// Compile `source` into tasks and register it
    pub async fn compile(&self, source: &str) -> SchedulerResult<ExpressionId> {
        let mut state = self.state.lock().await;
        match state.compile(source) {
            Ok(id) => {
                let stats = state.stats();
                tracing::info!(
                    "📥 Accepted expression {} ({:?}); ready: {}, pending: {}",
                    id,
                    source,
                    stats.ready,
                    stats.pending
                );
                Ok(id)
            }
            Err(e) => {
                tracing::warn!("❌ Rejected expression {:?}: {}", source, e);
                Err(e)
            }
        }
    }

    /// Hand out the oldest ready task, if any
    pub async fn dispatch(&self) -> Option<Task> {
        let task = self.state.lock().await.dispatch();
        if let Some(task) = &task {
            tracing::debug!(
                "📤 Dispatched task {}: {:?} {} {:?}",
                task.id,
                task.arg1,
                task.operation,
                task.arg2
            );
        }
        task
    }

    /// Record a result reported by an agent
    pub async fn complete(&self, task_id: TaskId, result: f64) -> SchedulerResult<()> {
        let outcome = self.state.lock().await.complete(task_id, result);
        match &outcome {
            Ok(()) => tracing::debug!("✅ Task {} completed with {}", task_id, result),
            Err(e) => tracing::warn!("❌ Completion of task {} rejected: {}", task_id, e),
        }
        outcome
    }

    /// Record that an agent could not compute a task
    pub async fn fail_task(&self, task_id: TaskId, reason: &str) -> SchedulerResult<ExpressionId> {
        let outcome = self.state.lock().await.fail_task(task_id, reason);
        match &outcome {
            Ok(expression_id) => tracing::warn!(
                "💥 Task {} failed ({}), expression {} abandoned",
                task_id,
                reason,
                expression_id
            ),
            Err(e) => tracing::warn!("❌ Failure report for task {} rejected: {}", task_id, e),
        }
        outcome
    }

    /// Snapshot of one expression
    pub async fn expression(&self, expression_id: ExpressionId) -> SchedulerResult<Expression> {
        self.state
            .lock()
            .await
            .expression(expression_id)
            .cloned()
            .ok_or(SchedulerError::ExpressionNotFound(expression_id))
    }

    /// Status and result of every expression, in submission order
    pub async fn expressions(&self) -> Vec<ExpressionSummary> {
        self.state.lock().await.summaries()
    }

    pub async fn stats(&self) -> QueueStats {
        self.state.lock().await.stats()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DurationPolicy::default())
    }
}
