//! API error handling
//!
//! Internal errors are logged in full and answered with a generic body so
//! that connector or speech details never reach the caller.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            Self::Internal(msg) => {
                error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// A turn that fails after the activity was accepted is a server fault
impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_bad_request_message() {
        let err = ApiError::BadRequest("invalid activity".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid activity");
    }

    #[test]
    fn bad_request_status() {
        let response = ApiError::BadRequest("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_status() {
        let response = ApiError::Internal("token endpoint said 401".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn from_application_error() {
        let err: ApiError = ApplicationError::ReplyDelivery("HTTP 403".to_string()).into();
        assert!(matches!(err, ApiError::Internal(_)));

        let err: ApiError = ApplicationError::Configuration("no subscription key".to_string()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn error_response_serialization() {
        let body = ErrorResponse {
            error: "An internal error occurred".to_string(),
            code: "internal_error".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "internal_error");
    }
}
