/// Client-facing expression endpoints
///
/// Submission compiles the expression synchronously and returns its ID; the
/// value itself is computed later by agents and read back through inspection.

use crate::api::{
    error::ApiError,
    models::{
        CalculateRequest, CalculateResponse, ExpressionEnvelope, ExpressionList, ExpressionView,
        ResultResponse,
    },
    AppState,
};
use crate::orchestrator::{ExpressionId, ExpressionStatus};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};

/// Create expression routes
pub fn create_expression_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/calculate", post(calculate))
        .route("/api/v1/expressions", get(list_expressions))
        .route("/api/v1/expressions/{id}", get(get_expression))
        .route("/api/v1/result/{id}", get(get_result))
}

/// Submit an expression
///
/// POST /api/v1/calculate
/// Body: { "expression": "2+2*2" }
/// Returns: 201 { "id": 1 }
async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CalculateResponse>), ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("❌ Invalid calculate request body: {}", rejection.body_text());
        ApiError::Unprocessable("invalid request body".to_string())
    })?;

    let id = state.scheduler.compile(&request.expression).await?;

    Ok((StatusCode::CREATED, Json(CalculateResponse { id })))
}

/// List all expressions
///
/// GET /api/v1/expressions
/// Returns: { "expressions": [{ "id": 1, "status": "completed", "result": 6.0 }] }
async fn list_expressions(State(state): State<AppState>) -> Json<ExpressionList> {
    let expressions = state.scheduler.expressions().await;
    tracing::debug!("📋 Listing {} expressions", expressions.len());
    Json(ExpressionList { expressions })
}

/// Get one expression by ID
///
/// GET /api/v1/expressions/{id}
async fn get_expression(
    State(state): State<AppState>,
    Path(id): Path<ExpressionId>,
) -> Result<Json<ExpressionEnvelope>, ApiError> {
    let expression = state.scheduler.expression(id).await?;
    Ok(Json(ExpressionEnvelope {
        expression: ExpressionView::from(&expression),
    }))
}

/// Get the final value of an expression
///
/// GET /api/v1/result/{id}
/// Returns 404 until the expression has completed.
async fn get_result(
    State(state): State<AppState>,
    Path(id): Path<ExpressionId>,
) -> Result<Json<ResultResponse>, ApiError> {
    let expression = state.scheduler.expression(id).await?;

    match (expression.status, expression.result) {
        (ExpressionStatus::Completed, Some(result)) => Ok(Json(ResultResponse { result })),
        (ExpressionStatus::Failed, _) => Err(ApiError::Unprocessable(
            expression.error.unwrap_or_else(|| "expression failed".to_string()),
        )),
        _ => Err(ApiError::NotFound(format!("result of expression {} is not ready", id))),
    }
}
