/// Single polling worker
///
/// One worker handles one task at a time. A task whose computation fails
/// (division by zero, overflow) is reported back as an error so the orchestrator
/// can fail its expression instead of waiting for it forever.

use crate::agent::compute::perform_operation;
use crate::api::models::{TaskAssignment, TaskEnvelope, TaskResultRequest};
use anyhow::{bail, Context, Result};
use reqwest::StatusCode;
use std::time::{Duration, Instant};

/// "No tasks" is logged at most this often per worker
const IDLE_LOG_INTERVAL: Duration = Duration::from_secs(60);

/// Outcome of one poll cycle
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// A task was computed and its result accepted
    Completed { task_id: u64, result: f64 },
    /// The ready queue was empty
    Idle,
    /// The task could not be computed and the failure was reported
    Failed { task_id: u64, reason: String },
}

pub struct Worker {
    id: usize,
    client: reqwest::Client,
    base_url: String,
    poll_interval: Duration,
}

impl Worker {
    pub fn new(id: usize, client: reqwest::Client, base_url: String, poll_interval: Duration) -> Self {
        Self {
            id,
            client,
            base_url,
            poll_interval,
        }
    }

    fn task_url(&self) -> String {
        format!("{}/internal/task", self.base_url)
    }

    /// Poll forever, backing off whenever there is nothing to do
    pub async fn run(self) {
        tracing::info!("Worker {} started and waiting for tasks", self.id);
        let mut last_idle_log: Option<Instant> = None;

        loop {
            match self.step().await {
                Ok(Step::Completed { .. }) | Ok(Step::Failed { .. }) => continue,
                Ok(Step::Idle) => {
                    if last_idle_log.map_or(true, |at| at.elapsed() >= IDLE_LOG_INTERVAL) {
                        tracing::info!("Worker {}: no tasks available, waiting", self.id);
                        last_idle_log = Some(Instant::now());
                    }
                }
                Err(e) => {
                    tracing::warn!("Worker {}: {:#}", self.id, e);
                }
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Run one fetch -> compute -> report cycle
    pub async fn step(&self) -> Result<Step> {
        let Some(task) = self.fetch_task().await? else {
            return Ok(Step::Idle);
        };

        tracing::info!(
            "Worker {} received task {}: {} {} {} ({}ms)",
            self.id,
            task.id,
            task.arg1,
            task.operation,
            task.arg2,
            task.operation_time
        );

        tokio::time::sleep(Duration::from_millis(task.operation_time)).await;

        let result = match perform_operation(task.arg1, task.arg2, task.operation) {
            Ok(result) => result,
            Err(e) => {
                let reason = e.to_string();
                tracing::error!("Worker {} failed to compute task {}: {}", self.id, task.id, reason);
                self.report(TaskResultRequest::failure(task.id, reason.clone())).await?;
                return Ok(Step::Failed {
                    task_id: task.id,
                    reason,
                });
            }
        };

        self.report(TaskResultRequest::success(task.id, result)).await?;
        tracing::info!("Worker {} sent result {} for task {}", self.id, result, task.id);

        Ok(Step::Completed {
            task_id: task.id,
            result,
        })
    }

    async fn fetch_task(&self) -> Result<Option<TaskAssignment>> {
        let url = self.task_url();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("failed to fetch task from {}", url))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status != StatusCode::OK {
            bail!("unexpected status {} from {}", status, url);
        }

        let envelope: TaskEnvelope = response
            .json()
            .await
            .context("failed to decode task")?;
        Ok(Some(envelope.task))
    }

    async fn report(&self, report: TaskResultRequest) -> Result<()> {
        let url = self.task_url();
        let response = self
            .client
            .post(&url)
            .json(&report)
            .send()
            .await
            .with_context(|| format!("failed to send result for task {}", report.id))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("result for task {} rejected with {}: {}", report.id, status, body);
        }
        Ok(())
    }
}
