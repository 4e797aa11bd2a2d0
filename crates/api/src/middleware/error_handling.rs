//! # Error Handling Middleware
//!
//! Maps `ScheduleError` onto HTTP status codes and JSON error bodies so every
//! handler reports failures the same way.
//!
//! | error        | status |
//! |--------------|--------|
//! | `Validation` | 400    |
//! | `NotFound`   | 404    |
//! | `Conflict`   | 409, body also carries `conflicting_slot` |
//! | `Database`, `Internal` | 500, details only in the logs |

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use docsched_core::errors::{ScheduleError, StoreError};
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use docsched_api::middleware::error_handling::AppError;
/// use docsched_core::errors::ScheduleError;
///
/// async fn handler(doctor_id: i32) -> Result<Json<i32>, AppError> {
///     if doctor_id <= 0 {
///         return Err(AppError(ScheduleError::Validation("doctor_id must be positive".into())));
///     }
///     Ok(Json(doctor_id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ScheduleError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ScheduleError::NotFound(_) => StatusCode::NOT_FOUND,
            ScheduleError::Validation(_) => StatusCode::BAD_REQUEST,
            ScheduleError::Conflict { .. } => StatusCode::CONFLICT,
            ScheduleError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ScheduleError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self.0 {
            ScheduleError::Conflict { conflicting, .. } => json!({
                "error": self.0.to_string(),
                "conflicting_slot": conflicting,
            }),
            ScheduleError::Database(_) | ScheduleError::Internal(_) => {
                error!("Request failed: {:?}", self.0);
                json!({ "error": "Internal server error" })
            }
            _ => json!({ "error": self.0.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError(err.into())
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ScheduleError::Database(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(ScheduleError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(ScheduleError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(ScheduleError::Validation(rejection.body_text()))
    }
}

/// Maps a ScheduleError to an HTTP response
pub fn map_error(err: ScheduleError) -> Response {
    AppError(err).into_response()
}

/// Turns failures raised by the tower middleware stack (timeouts) into responses.
pub async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out" })),
        )
            .into_response()
    } else {
        map_error(ScheduleError::Internal(err))
    }
}
