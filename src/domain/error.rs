use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Machine-readable error kind, exposed to clients as `code`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidIdentifierFormat,
    InvalidTimestamp,
    InvalidEmailLocal,
    InvalidEmailDomain,
    InvalidUsername,
    UserNotFound,
    EmailAlreadyExists,
    InvalidDateRange,
    ValidationError,
    InternalError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidIdentifierFormat => "INVALID_IDENTIFIER_FORMAT",
            Self::InvalidTimestamp => "INVALID_TIMESTAMP",
            Self::InvalidEmailLocal => "INVALID_EMAIL_LOCAL",
            Self::InvalidEmailDomain => "INVALID_EMAIL_DOMAIN",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Core domain errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid identifier format: {value}")]
    InvalidIdentifierFormat { value: String },

    #[error("Invalid date string: {value}")]
    InvalidTimestamp { value: String },

    #[error("Invalid email local part: {email}")]
    InvalidEmailLocal { email: String },

    #[error("Invalid email domain part: {email}")]
    InvalidEmailDomain { email: String },

    #[error("{message}")]
    InvalidUsername { message: String, username: String },

    #[error("User with id {user_id} not found")]
    UserNotFound { user_id: String },

    #[error("Email {email} already exists")]
    EmailAlreadyExists { email: String },

    #[error("Start date {start} must be before or equal to end date {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn invalid_identifier(value: impl Into<String>) -> Self {
        Self::InvalidIdentifierFormat {
            value: value.into(),
        }
    }

    pub fn invalid_timestamp(value: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
        }
    }

    pub fn user_not_found(user_id: impl Into<String>) -> Self {
        Self::UserNotFound {
            user_id: user_id.into(),
        }
    }

    pub fn email_already_exists(email: impl Into<String>) -> Self {
        Self::EmailAlreadyExists {
            email: email.into(),
        }
    }

    pub fn invalid_date_range(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::InvalidDateRange {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Error kind used by the transport layer to pick a status code
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidIdentifierFormat { .. } => ErrorKind::InvalidIdentifierFormat,
            Self::InvalidTimestamp { .. } => ErrorKind::InvalidTimestamp,
            Self::InvalidEmailLocal { .. } => ErrorKind::InvalidEmailLocal,
            Self::InvalidEmailDomain { .. } => ErrorKind::InvalidEmailDomain,
            Self::InvalidUsername { .. } => ErrorKind::InvalidUsername,
            Self::UserNotFound { .. } => ErrorKind::UserNotFound,
            Self::EmailAlreadyExists { .. } => ErrorKind::EmailAlreadyExists,
            Self::InvalidDateRange { .. } => ErrorKind::InvalidDateRange,
            Self::Validation { .. } => ErrorKind::ValidationError,
            Self::Internal { .. } => ErrorKind::InternalError,
        }
    }

    /// Structured context for the error, `Value::Null` when there is none
    pub fn details(&self) -> Value {
        match self {
            Self::InvalidIdentifierFormat { value } | Self::InvalidTimestamp { value } => {
                json!({ "value": value })
            }
            Self::InvalidEmailLocal { email }
            | Self::InvalidEmailDomain { email }
            | Self::EmailAlreadyExists { email } => json!({ "email": email }),
            Self::InvalidUsername { username, .. } => json!({ "username": username }),
            Self::UserNotFound { user_id } => json!({ "userId": user_id }),
            Self::InvalidDateRange { start, end } => {
                json!({ "startDate": start, "endDate": end })
            }
            Self::Validation { .. } | Self::Internal { .. } => Value::Null,
        }
    }
}
