use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::errors::DomainError;

/// API error type with HTTP status code, stable code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL",
            "internal server error",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        }));

        (self.status, body).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message),
            DomainError::TeamExists(_) => {
                Self::new(StatusCode::BAD_REQUEST, "TEAM_EXISTS", message)
            }
            DomainError::PrExists(_) => Self::new(StatusCode::CONFLICT, "PR_EXISTS", message),
            DomainError::PrMerged(_) => Self::new(StatusCode::CONFLICT, "PR_MERGED", message),
            DomainError::NotAssigned { .. } => {
                Self::new(StatusCode::CONFLICT, "NOT_ASSIGNED", message)
            }
            DomainError::NoCandidate(_) => {
                Self::new(StatusCode::CONFLICT, "NO_CANDIDATE", message)
            }
            DomainError::Conflict(_) => Self::new(StatusCode::CONFLICT, "CONFLICT", message),
            DomainError::Validation(_) => Self::bad_request(message),
            DomainError::Storage { .. } | DomainError::Internal(_) => {
                tracing::error!(error = %message, "request failed");
                Self::internal_server_error()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}
