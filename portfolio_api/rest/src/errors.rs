use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::{ApiError, ApiSubmissionError};

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Logs `err` and responds with a 500 carrying the given public message.
pub fn internal_server_error(err: impl Into<anyhow::Error>, message: &str) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// `{"status": "error", "message": ...}`
pub fn error(code: StatusCode, message: impl Into<String>) -> Response {
    (
        code,
        Json(ApiError {
            status: "error",
            message: message.into(),
        }),
    )
        .into_response()
}

/// `{"success": false, "error": ...}`, the error shape of the contact form.
pub fn submission_error(code: StatusCode, error: impl Into<String>) -> Response {
    (
        code,
        Json(ApiSubmissionError {
            success: false,
            error: error.into(),
        }),
    )
        .into_response()
}
