/// distcalc orchestrator
/// 
/// Main entry point for the orchestrator. Loads configuration from the
/// environment (and an optional `.env` file) and starts the HTTP server with
/// the expression scheduler.

use distcalc::{
    config::{load_dotenv, Config},
    server::{init_tracing, start_server},
};

/// Application entry point
/// 
/// The server provides:
/// - Expression submission and inspection at /api/v1/*
/// - Task polling and result reporting for agents at /internal/task
/// - Health check at /healthz
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    load_dotenv();

    // Load configuration (defaults to 0.0.0.0:8080 and 1000ms per operation)
    let config = Config::from_env();
    
    start_server(config).await
}
