/// Scheduler error -> HTTP response mapping
///
/// Status codes are chosen by matching on error variants, never on messages.

use crate::api::models::ErrorResponse;
use crate::orchestrator::SchedulerError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

#[derive(Debug)]
pub enum ApiError {
    Scheduler(SchedulerError),
    BadRequest(String),
    NotFound(String),
    Unprocessable(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Scheduler(err) => match err {
                SchedulerError::Compile(_) => StatusCode::UNPROCESSABLE_ENTITY,
                SchedulerError::DivisionByZero { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                SchedulerError::NonFiniteResult { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                SchedulerError::TaskNotFound(_) => StatusCode::NOT_FOUND,
                SchedulerError::ExpressionNotFound(_) => StatusCode::NOT_FOUND,
                SchedulerError::TaskAlreadyCompleted(_) => StatusCode::CONFLICT,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Scheduler(err) => err.to_string(),
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unprocessable(msg)
            | ApiError::Internal(msg) => msg.clone(),
        }
    }
}

impl From<SchedulerError> for ApiError {
    fn from(err: SchedulerError) -> Self {
        ApiError::Scheduler(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("❌ {}", self.message());
        }
        (status, Json(ErrorResponse { error: self.message() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::CalcError;

    #[test]
    fn maps_variants_to_status_codes() {
        let cases = [
            (SchedulerError::Compile(CalcError::EmptyExpression), StatusCode::UNPROCESSABLE_ENTITY),
            (SchedulerError::TaskNotFound(3), StatusCode::NOT_FOUND),
            (SchedulerError::ExpressionNotFound(3), StatusCode::NOT_FOUND),
            (SchedulerError::TaskAlreadyCompleted(3), StatusCode::CONFLICT),
            (
                SchedulerError::DivisionByZero { task_id: 4, expression_id: 1 },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                SchedulerError::NonFiniteResult { task_id: 4, expression_id: 1 },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }
}
