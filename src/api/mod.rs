/// HTTP API Layer
/// 
/// This module provides the REST endpoints around the scheduler. It handles:
/// - Expression submission and inspection for clients
/// - Task polling and result reporting for agents
/// - Mapping scheduler errors to HTTP status codes

// Request/response bodies shared with the agent
pub mod models;

// Scheduler error -> HTTP response mapping
pub mod error;

// Client-facing expression endpoints
pub mod expressions;

// Agent-facing task endpoints
pub mod tasks;

use crate::orchestrator::Scheduler;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// The process-wide scheduler handle
    pub scheduler: Scheduler,
}

// Re-export router builders
pub use expressions::create_expression_routes;
pub use tasks::create_task_routes;
