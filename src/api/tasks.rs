/// Agent-facing task endpoints
///
/// Agents poll GET /internal/task for work and report results with
/// POST /internal/task. An empty ready queue is answered with 404 right away.

use crate::api::{
    error::ApiError,
    models::{TaskAssignment, TaskEnvelope, TaskResultRequest},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

/// Create task routes
pub fn create_task_routes() -> Router<AppState> {
    Router::new().route("/internal/task", get(get_task).post(post_task_result))
}

/// Hand the oldest ready task to an agent
///
/// GET /internal/task
/// Returns: { "task": { "id", "arg1", "arg2", "operation", "operation_time" } } or 404
async fn get_task(State(state): State<AppState>) -> Result<Json<TaskEnvelope>, ApiError> {
    let Some(task) = state.scheduler.dispatch().await else {
        return Err(ApiError::NotFound("no task available".to_string()));
    };

    let assignment = TaskAssignment::from_task(&task).ok_or_else(|| {
        ApiError::Internal(format!("dispatched task {} is missing operands", task.id))
    })?;

    tracing::info!(
        "📤 Task {} handed out: {} {} {}",
        assignment.id,
        assignment.arg1,
        assignment.operation,
        assignment.arg2
    );

    Ok(Json(TaskEnvelope { task: assignment }))
}

/// Accept a result or a compute failure from an agent
///
/// POST /internal/task
/// Body: { "id": 4, "result": 12.0 } or { "id": 4, "error": "overflow" }
async fn post_task_result(
    State(state): State<AppState>,
    payload: Result<Json<TaskResultRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("❌ Invalid task result body: {}", rejection.body_text());
        ApiError::Unprocessable("invalid request body".to_string())
    })?;

    if request.id == 0 {
        return Err(ApiError::BadRequest("task id is required".to_string()));
    }

    match (request.result, request.error) {
        (Some(result), None) => {
            state.scheduler.complete(request.id, result).await?;
            tracing::info!("📥 Task {} reported result {}", request.id, result);
        }
        (None, Some(reason)) => {
            state.scheduler.fail_task(request.id, &reason).await?;
            tracing::info!("📥 Task {} reported failure: {}", request.id, reason);
        }
        _ => {
            return Err(ApiError::Unprocessable(
                "exactly one of result or error is required".to_string(),
            ));
        }
    }

    Ok(StatusCode::OK)
}
