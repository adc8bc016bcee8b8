/// Authoritative scheduler state
///
/// A plain, synchronous state machine. It has exactly one owner (the
/// [`Scheduler`](crate::orchestrator::Scheduler)), which serializes every call
/// behind a single lock; nothing here is shared or locked on its own.
///
/// Task lifecycle: `pending (operands missing)` -> `pending (ready, queued)` ->
/// `completed`. Expression lifecycle: `pending` -> `completed` | `failed`.
/// The state is append-only for the life of the process.

use crate::calculation::{infix_to_postfix, tokenize, validate_expression};
use crate::orchestrator::builder::{BuildRoot, DagBuilder};
use crate::orchestrator::duration::DurationPolicy;
use crate::orchestrator::errors::{SchedulerError, SchedulerResult};
use crate::orchestrator::types::{
    Expression, ExpressionId, ExpressionStatus, ExpressionSummary, Task, TaskId, TaskStatus,
};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Location of a task inside the expression table
#[derive(Debug, Clone, Copy)]
struct TaskSlot {
    expression_id: ExpressionId,
    position: usize,
}

#[derive(Debug)]
pub struct SchedulerState {
    durations: DurationPolicy,
    /// Expressions keyed by ID; ordered so listings come out in submission order
    expressions: BTreeMap<ExpressionId, Expression>,
    task_index: HashMap<TaskId, TaskSlot>,
    /// Results of literals and completed tasks, used to back-fill operands
    results: HashMap<TaskId, f64>,
    ready: VecDeque<TaskId>,
    pending: Vec<TaskId>,
    next_task_id: TaskId,
    next_expression_id: ExpressionId,
}

/// Queue depths, mostly for diagnostics and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
    pub expressions: usize,
    pub ready: usize,
    pub pending: usize,
}

impl SchedulerState {
    pub fn new(durations: DurationPolicy) -> Self {
        Self {
            durations,
            expressions: BTreeMap::new(),
            task_index: HashMap::new(),
            results: HashMap::new(),
            ready: VecDeque::new(),
            pending: Vec::new(),
            next_task_id: 1,
            next_expression_id: 1,
        }
    }

    /// Compile an expression and register its tasks
    ///
    /// Tasks whose operands are all literals go straight to the ready queue in
    /// creation order; the rest wait in the pending set. On any error nothing is
    /// registered and no identifiers are consumed.
    pub fn compile(&mut self, source: &str) -> SchedulerResult<ExpressionId> {
        validate_expression(source)?;
        let tokens = tokenize(source);
        let postfix = infix_to_postfix(&tokens)?;
        let dag = DagBuilder::new(self.next_task_id, &self.durations).build(&postfix)?;

        let expression_id = self.next_expression_id;
        self.next_expression_id += 1;
        self.next_task_id = dag.next_id;
        self.results.extend(dag.literals.iter().copied());

        for (position, task) in dag.tasks.iter().enumerate() {
            self.task_index.insert(task.id, TaskSlot { expression_id, position });
            if task.is_ready {
                self.ready.push_back(task.id);
            } else {
                self.pending.push(task.id);
            }
        }

        let now = Utc::now();
        let (status, result, completed_at) = match dag.root {
            BuildRoot::Task(_) => (ExpressionStatus::Pending, None, None),
            BuildRoot::Literal(value) => (ExpressionStatus::Completed, Some(value), Some(now)),
        };

        tracing::debug!(
            "Registered expression {} with {} tasks ({} literals)",
            expression_id,
            dag.tasks.len(),
            dag.literals.len()
        );

        self.expressions.insert(
            expression_id,
            Expression {
                id: expression_id,
                source: source.to_string(),
                tasks: dag.tasks,
                status,
                result,
                error: None,
                created_at: now,
                completed_at,
            },
        );

        Ok(expression_id)
    }

    /// Pop the oldest ready task, or `None` when nothing is dispatchable
    ///
    /// A dispatched task leaves the queue for good; there is no redelivery.
    pub fn dispatch(&mut self) -> Option<Task> {
        let task_id = self.ready.pop_front()?;
        let task = self.task(task_id).cloned();
        if task.is_none() {
            tracing::error!("Ready queue referenced unknown task {}", task_id);
        }
        task
    }

    /// Record a task result and propagate it to dependents
    ///
    /// Unknown and already-completed IDs are rejected without touching state.
    /// Otherwise the result is committed first, the owning expression completes if
    /// this was its last outstanding task, and then every pending task is
    /// re-checked against the result map. Tasks whose operands are now known move
    /// to the tail of the ready queue.
    ///
    /// A dependent whose divisor turns out to be zero fails its expression and is
    /// withdrawn together with the expression's other queued work. The cascade still
    /// finishes for every other task before `DivisionByZero` is returned, so the
    /// error always describes fully committed state.
    ///
    /// A NaN or infinite result is never propagated: the task is closed without a
    /// value, its expression fails and `NonFiniteResult` is returned.
    pub fn complete(&mut self, task_id: TaskId, result: f64) -> SchedulerResult<()> {
        if !result.is_finite() {
            let expression_id = self.fail_task(task_id, "non-finite result")?;
            return Err(SchedulerError::NonFiniteResult {
                task_id,
                expression_id,
            });
        }

        let slot = self.open_task(task_id)?;
        let expression = self
            .expressions
            .get_mut(&slot.expression_id)
            .ok_or(SchedulerError::TaskNotFound(task_id))?;
        let task = expression
            .tasks
            .get_mut(slot.position)
            .ok_or(SchedulerError::TaskNotFound(task_id))?;

        task.status = TaskStatus::Completed;
        task.result = Some(result);
        self.results.insert(task_id, result);

        // Completing work that was never dispatched withdraws it from the queues.
        self.ready.retain(|id| *id != task_id);
        self.pending.retain(|id| *id != task_id);

        if expression.status == ExpressionStatus::Pending && expression.all_tasks_completed() {
            expression.status = ExpressionStatus::Completed;
            expression.result = expression.root().and_then(|root| root.result);
            expression.completed_at = Some(Utc::now());
            tracing::info!(
                "Expression {} completed with result {:?}",
                expression.id,
                expression.result
            );
        }

        let failed = self.promote_pending();

        match failed.first() {
            Some(&(task_id, expression_id)) => Err(SchedulerError::DivisionByZero {
                task_id,
                expression_id,
            }),
            None => Ok(()),
        }
    }

    /// Close a task that could not produce a value and fail its expression
    ///
    /// Used for agent-side compute failures and for non-finite results. The task
    /// counts as completed afterwards, so a second report is `TaskAlreadyCompleted`.
    /// Returns the owning expression.
    pub fn fail_task(&mut self, task_id: TaskId, reason: &str) -> SchedulerResult<ExpressionId> {
        let slot = self.open_task(task_id)?;
        if let Some(task) = self
            .expressions
            .get_mut(&slot.expression_id)
            .and_then(|expression| expression.tasks.get_mut(slot.position))
        {
            task.status = TaskStatus::Completed;
        }

        self.ready.retain(|id| *id != task_id);
        self.pending.retain(|id| *id != task_id);
        tracing::warn!("Task {} failed: {}", task_id, reason);
        self.fail_expression(slot.expression_id, reason);

        Ok(slot.expression_id)
    }

    /// Locate a task that exists and has not been completed yet
    fn open_task(&self, task_id: TaskId) -> SchedulerResult<TaskSlot> {
        let slot = *self
            .task_index
            .get(&task_id)
            .ok_or(SchedulerError::TaskNotFound(task_id))?;
        let task = self.task(task_id).ok_or(SchedulerError::TaskNotFound(task_id))?;
        if task.is_completed() {
            return Err(SchedulerError::TaskAlreadyCompleted(task_id));
        }
        Ok(slot)
    }

    /// Back-fill operands of pending tasks and promote the ones that became ready
    ///
    /// Returns the tasks that could not be promoted because of a zero divisor.
    fn promote_pending(&mut self) -> Vec<(TaskId, ExpressionId)> {
        let mut failed = Vec::new();
        let mut still_pending = Vec::with_capacity(self.pending.len());

        for task_id in std::mem::take(&mut self.pending) {
            let Some(slot) = self.task_index.get(&task_id).copied() else {
                continue;
            };
            let Some(task) = self
                .expressions
                .get_mut(&slot.expression_id)
                .and_then(|expression| expression.tasks.get_mut(slot.position))
            else {
                continue;
            };

            let [left, right] = task.parent_task_ids;
            if task.arg1.is_none() {
                task.arg1 = self.results.get(&left).copied();
            }
            if task.arg2.is_none() {
                task.arg2 = self.results.get(&right).copied();
            }

            if !task.has_operands() {
                still_pending.push(task_id);
                continue;
            }

            if task.divides_by_zero() {
                tracing::warn!(
                    "Task {} of expression {} divides by zero",
                    task_id,
                    slot.expression_id
                );
                failed.push((task_id, slot.expression_id));
                continue;
            }

            task.is_ready = true;
            tracing::debug!("Task {} is ready", task_id);
            self.ready.push_back(task_id);
        }

        self.pending = still_pending;

        for &(_, expression_id) in &failed {
            self.fail_expression(expression_id, "division by zero");
        }

        failed
    }

    /// Mark an expression failed and withdraw its undispatched tasks
    fn fail_expression(&mut self, expression_id: ExpressionId, reason: &str) {
        let Some(expression) = self.expressions.get_mut(&expression_id) else {
            return;
        };
        if expression.status != ExpressionStatus::Pending {
            return;
        }

        expression.status = ExpressionStatus::Failed;
        expression.error = Some(reason.to_string());
        expression.completed_at = Some(Utc::now());
        tracing::warn!("Expression {} failed: {}", expression_id, reason);

        let index = &self.task_index;
        let owned_by = |id: &TaskId| {
            index
                .get(id)
                .is_some_and(|slot| slot.expression_id == expression_id)
        };
        self.ready.retain(|id| !owned_by(id));
        self.pending.retain(|id| !owned_by(id));
    }

    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        let slot = self.task_index.get(&task_id)?;
        self.expressions
            .get(&slot.expression_id)?
            .tasks
            .get(slot.position)
    }

    pub fn expression(&self, expression_id: ExpressionId) -> Option<&Expression> {
        self.expressions.get(&expression_id)
    }

    /// Every known expression in submission order
    pub fn summaries(&self) -> Vec<ExpressionSummary> {
        self.expressions.values().map(Expression::summary).collect()
    }

    pub fn stats(&self) -> QueueStats {
        QueueStats {
            expressions: self.expressions.len(),
            ready: self.ready.len(),
            pending: self.pending.len(),
        }
    }
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self::new(DurationPolicy::default())
    }
}
