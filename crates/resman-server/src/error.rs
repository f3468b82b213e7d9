//! Error handling for the REST API server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::fmt;

use resman_core::error::ResmanError;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "CONNECTION_ERROR", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

// Convert from resman-core errors
impl From<ResmanError> for ApiError {
    fn from(err: ResmanError) -> Self {
        let details = json!({
            "code": err.code().as_str(),
            "suggestion": err.suggestion(),
        });

        let api_error = match err {
            ResmanError::Connection { message, .. } => ApiError::connection(message),
            ResmanError::SessionNotFound { alias } => {
                ApiError::not_found(format!("No session registered for alias '{}'", alias))
            }
            ResmanError::Validation { message, .. } => ApiError::validation(message),
            ResmanError::UnsupportedClient { client } => {
                ApiError::bad_request(format!("Unsupported client: {}", client))
            }
            ResmanError::Configuration(msg) => ApiError::bad_request(msg),
            ResmanError::InvalidOperation { operation } => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INVALID_OPERATION",
                format!("Invalid operation in revision history: {}", operation),
            ),
            ResmanError::Database { message, .. } => {
                ApiError::internal(format!("Database error: {}", message))
            }
            ResmanError::Serialization(e) => {
                ApiError::internal(format!("Serialization error: {}", e))
            }
            ResmanError::Io(e) => ApiError::internal(format!("IO error: {}", e)),
        };

        api_error.with_details(details)
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use resman_core::error::ErrorCode;

    #[test]
    fn test_status_mapping() {
        let err: ApiError = ResmanError::Connection {
            message: "Collection Does not Exist!".to_string(),
            code: ErrorCode::DbCollectionNotFound,
            source: None,
        }
        .into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "CONNECTION_ERROR");
        assert_eq!(err.details.unwrap()["code"], "DB_003");

        let err: ApiError = ResmanError::session_not_found("main").into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err: ApiError = ResmanError::missing_field("id").into();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

        let err: ApiError = ResmanError::invalid_operation("merge").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "INVALID_OPERATION");
    }
}
