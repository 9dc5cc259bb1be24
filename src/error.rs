use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::error::Error;
use tracing::error;

/// A failure that knows which HTTP status it should be reported with.
///
/// Every handler returns `Result<_, ApiError>`, so the `IntoResponse` impl below
/// is the one place where failures are turned into responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("request rejected with {0}: {1}")]
    Rejected(StatusCode, String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

impl ApiError {
    /// Wrap an unexpected error. The details are logged, never sent.
    pub fn internal<E>(err: E) -> Self
    where
        E: Error,
    {
        ApiError::Internal(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected(status, _) => *status,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => ErrorBody {
                message: "Validation failed".to_string(),
                errors,
            },
            ApiError::Internal(detail) => {
                error!(error = %detail, "Request failed with an internal error");
                ErrorBody {
                    message: "Internal server error".to_string(),
                    errors: Vec::new(),
                }
            }
            ApiError::BadRequest(message)
            | ApiError::Rejected(_, message)
            | ApiError::NotFound(message)
            | ApiError::Conflict(message) => ErrorBody {
                message,
                errors: Vec::new(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // A body we can't read as JSON is a bad body like any other
            JsonRejection::MissingJsonContentType(missing) => {
                ApiError::BadRequest(missing.body_text())
            }
            other => ApiError::Rejected(other.status(), other.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
