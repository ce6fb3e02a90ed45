//! API error envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::meta::ResponseMeta;
use crate::domain::{DomainError, ErrorKind, Timestamp};

/// Error response body: `{error, meta}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
    pub meta: ResponseMeta,
}

/// Error detail structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorDetail {
    pub code: String,
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Value::is_null", default)]
    pub details: Value,
    pub timestamp: String,
}

/// API error with status code
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub details: Value,
    pub timestamp: Timestamp,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            details: Value::Null,
            timestamp: Timestamp::now(),
        }
    }

    /// Attach structured details
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorKind::ValidationError.as_str(),
            message,
        )
    }

    /// Render the body with the given metadata
    pub fn to_response_body(&self, meta: ResponseMeta) -> ApiErrorResponse {
        ApiErrorResponse {
            error: ApiErrorDetail {
                code: self.code.clone(),
                status_code: self.status.as_u16(),
                message: self.message.clone(),
                details: self.details.clone(),
                timestamp: self.timestamp.to_text(),
            },
            meta,
        }
    }
}

/// HTTP status for each domain error kind
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidIdentifierFormat
        | ErrorKind::InvalidTimestamp
        | ErrorKind::InvalidEmailLocal
        | ErrorKind::InvalidEmailDomain
        | ErrorKind::InvalidUsername
        | ErrorKind::InvalidDateRange
        | ErrorKind::ValidationError => StatusCode::BAD_REQUEST,
        ErrorKind::UserNotFound => StatusCode::NOT_FOUND,
        ErrorKind::EmailAlreadyExists => StatusCode::CONFLICT,
        ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = self.to_response_body(ResponseMeta::current());
        (self.status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let kind = err.kind();

        // Internal messages stay in the logs
        let message = match &err {
            DomainError::Internal { .. } => {
                tracing::error!(error = %err, "Internal error while handling request");
                "Internal server error".to_string()
            }
            _ => err.to_string(),
        };

        Self::new(status_for(kind), kind.as_str(), message).with_details(err.details())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("Invalid page");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(err.message, "Invalid page");
        assert!(err.details.is_null());
    }

    #[test]
    fn test_domain_error_status_mapping() {
        let cases = [
            (DomainError::invalid_identifier("x"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_timestamp("x"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_date_range("b", "a"), StatusCode::BAD_REQUEST),
            (DomainError::validation("x"), StatusCode::BAD_REQUEST),
            (DomainError::user_not_found("x"), StatusCode::NOT_FOUND),
            (DomainError::email_already_exists("a@b.co"), StatusCode::CONFLICT),
            (DomainError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (domain_err, status) in cases {
            let api_err: ApiError = domain_err.into();
            assert_eq!(api_err.status, status);
        }
    }

    #[test]
    fn test_domain_error_conversion_keeps_code_and_details() {
        let api_err: ApiError = DomainError::user_not_found("01ARZ3NDEKTSV4RRFFQ69G5FAV").into();

        assert_eq!(api_err.code, "USER_NOT_FOUND");
        assert_eq!(
            api_err.message,
            "User with id 01ARZ3NDEKTSV4RRFFQ69G5FAV not found"
        );
        assert_eq!(api_err.details["userId"], "01ARZ3NDEKTSV4RRFFQ69G5FAV");
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let api_err: ApiError = DomainError::internal("lock poisoned").into();

        assert_eq!(api_err.message, "Internal server error");
        assert_eq!(api_err.code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::from(DomainError::email_already_exists("a@b.co"));
        let body = serde_json::to_value(err.to_response_body(ResponseMeta::current())).unwrap();

        assert_eq!(body["error"]["code"], "EMAIL_ALREADY_EXISTS");
        assert_eq!(body["error"]["statusCode"], 409);
        assert_eq!(body["error"]["details"]["email"], "a@b.co");
        assert!(body["error"]["timestamp"].is_string());
        assert!(body["meta"]["version"].is_string());
    }
}
