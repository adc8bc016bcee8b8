/// Agent: the worker process
/// 
/// Runs a pool of workers that poll the orchestrator for ready tasks, sleep for
/// the task's simulated duration, compute the operation and report the result.

// Arithmetic performed by workers
pub mod compute;

// Single polling worker
pub mod worker;

use crate::config::AgentConfig;
use anyhow::{Context, Result};
use std::time::Duration;
use tokio::task::JoinSet;

pub use compute::{perform_operation, ComputeError};
pub use worker::{Step, Worker};

/// Timeout for every request to the orchestrator
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Start `computing_power` workers and run them until Ctrl-C
pub async fn run_agent(config: AgentConfig) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("failed to build HTTP client")?;

    tracing::info!(
        "🚀 Agent started with computing power {} against {}",
        config.computing_power,
        config.orchestrator_url
    );

    let mut workers = JoinSet::new();
    for id in 1..=config.computing_power {
        let worker = Worker::new(
            id,
            client.clone(),
            config.orchestrator_url.clone(),
            Duration::from_millis(config.poll_interval_ms),
        );
        workers.spawn(worker.run());
    }

    crate::server::shutdown_signal().await;

    tracing::info!("Stopping {} workers", workers.len());
    workers.shutdown().await;
    Ok(())
}
