/// Server setup and initialization
///
/// Wires together configuration, the scheduler and the HTTP routes.
/// Provides the main application factory function for creating the Axum app.

use crate::{
    api::{create_expression_routes, create_task_routes, AppState},
    config::Config,
    orchestrator::{DurationPolicy, Scheduler},
};
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
///
/// Level comes from `RUST_LOG` and defaults to `info`. Safe to call more than
/// once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .try_init();
}

/// Build the router around an existing scheduler
pub fn build_router(scheduler: Scheduler) -> Router {
    let app_state = AppState { scheduler };

    Router::new()
        // Health check endpoint
        .route("/healthz", get(health_check))

        // Expression submission and inspection
        .merge(create_expression_routes())

        // Agent polling and result reporting
        .merge(create_task_routes())
        .with_state(app_state)
}

/// Create the main Axum application with all routes
pub fn create_app(config: &Config) -> Router {
    tracing::info!(
        "⏱️ Operation times (ms): + {}, - {}, * {}, / {}",
        config.operation_times.addition_ms,
        config.operation_times.subtraction_ms,
        config.operation_times.multiplication_ms,
        config.operation_times.division_ms
    );

    tracing::info!("🚀 Initializing scheduler");
    let scheduler = Scheduler::new(DurationPolicy::new(config.operation_times));

    tracing::info!("📡 Creating HTTP router with all endpoints");
    build_router(scheduler)
}

/// Start the HTTP server with the given configuration
///
/// Creates the application and serves it until Ctrl-C.
pub async fn start_server(config: Config) -> Result<()> {
    init_tracing();

    tracing::info!("Starting distcalc orchestrator...");

    let app = create_app(&config);

    // Bind to the configured address
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind orchestrator listener on {}", bind_addr))?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("orchestrator server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl-C
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("❌ Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Health check endpoint handler
async fn health_check() -> &'static str {
    "ok"
}
