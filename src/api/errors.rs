//! # API Errors
//!
//! Error taxonomy for the route layer. Every failure is rendered as the
//! uniform envelope `{"success": false, "error": <status>, "message": ...}`
//! with a matching HTTP status code.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Result type for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Route layer errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Malformed or missing input (400)
    #[error("{0}")]
    BadRequest(String),

    /// Missing resource or exhausted pagination (404)
    #[error("{0}")]
    NotFound(String),

    /// Unsupported method on a known path (405)
    #[error("The method is not allowed for the requested URL.")]
    MethodNotAllowed,

    /// Validated input rejected by the store or a business rule (422)
    #[error("{0}")]
    Unprocessable(String),

    /// Unexpected store failure (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Wrap a store failure as 422, the write-route downgrade
    pub fn unprocessable(err: impl fmt::Display) -> Self {
        Self::Unprocessable(err.to_string())
    }

    /// Wrap a store failure as 500
    pub fn internal(err: impl fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }

    pub fn no_data() -> Self {
        Self::not_found("No data found in the database.")
    }

    pub fn test_case_not_found() -> Self {
        Self::not_found("The requested test case was not found in the database.")
    }

    pub fn asset_not_found() -> Self {
        Self::not_found("The requested asset was not found in the database.")
    }

    /// 404 for an execution body referencing an unknown asset
    pub fn unknown_asset() -> Self {
        Self::not_found("The asset was not found in the database.")
    }

    /// 404 for an execution body referencing an unknown test case
    pub fn unknown_test_case() -> Self {
        Self::not_found("The test case was not found in the database.")
    }
}

/// Uniform error envelope
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl From<ApiError> for ErrorBody {
    fn from(err: ApiError) -> Self {
        Self {
            success: false,
            error: err.status_code().as_u16(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::no_data().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::unprocessable("x").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_envelope_fields() {
        let body = ErrorBody::from(ApiError::test_case_not_found());
        assert!(!body.success);
        assert_eq!(body.error, 404);
        assert_eq!(
            body.message,
            "The requested test case was not found in the database."
        );

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], 404);
    }
}
