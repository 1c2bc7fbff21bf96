use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures surfaced to API callers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller error, rejected before any side effect
    #[error("{message}")]
    BadRequest {
        message: String,
        warnings: Option<Vec<String>>,
    },

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            warnings: None,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, warnings) = match self {
            ApiError::BadRequest { message, warnings } => (StatusCode::BAD_REQUEST, message, warnings),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message, None),
        };

        let body = ErrorBody {
            success: false,
            error,
            warnings,
        };

        (status, Json(body)).into_response()
    }
}
