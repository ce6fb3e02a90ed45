//! User validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::domain::DomainError;

static EMAIL_LOCAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+$").unwrap());

static EMAIL_DOMAIN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 20;

/// Letter that may never appear in a username, in either case
pub const FORBIDDEN_USERNAME_LETTER: char = 'c';

/// Words that may not appear anywhere in a newly registered username
pub const RESERVED_USERNAMES: [&str; 6] = [
    "admin",
    "superadmin",
    "root",
    "system",
    "administrator",
    "moderator",
];

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Invalid email local part: {0}")]
    InvalidEmailLocal(String),

    #[error("Invalid email domain part: {0}")]
    InvalidEmailDomain(String),

    #[error("Username must be between 3 and 20 characters")]
    UsernameLength(String),

    #[error("Username cannot contain the letter \"c\"")]
    UsernameForbiddenLetter(String),

    #[error("Username contains reserved words")]
    ReservedUsername(String),
}

impl From<UserValidationError> for DomainError {
    fn from(err: UserValidationError) -> Self {
        let message = err.to_string();

        match err {
            UserValidationError::InvalidEmailLocal(email) => Self::InvalidEmailLocal { email },
            UserValidationError::InvalidEmailDomain(email) => Self::InvalidEmailDomain { email },
            UserValidationError::UsernameLength(username)
            | UserValidationError::UsernameForbiddenLetter(username) => {
                Self::InvalidUsername { message, username }
            }
            UserValidationError::ReservedUsername(_) => Self::Validation { message },
        }
    }
}

/// Validate an email address
///
/// The text is split on `@`; the first segment is the local part and the
/// second is the domain part. Errors carry the full address.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    let mut parts = email.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next();

    if !EMAIL_LOCAL_PATTERN.is_match(local) {
        return Err(UserValidationError::InvalidEmailLocal(email.to_string()));
    }

    match domain {
        Some(domain) if EMAIL_DOMAIN_PATTERN.is_match(domain) => Ok(()),
        _ => Err(UserValidationError::InvalidEmailDomain(email.to_string())),
    }
}

/// Validate a username
///
/// Rules:
/// - 3 to 20 characters
/// - Must not contain the letter "c" (case-insensitive)
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    let length = username.chars().count();

    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&length) {
        return Err(UserValidationError::UsernameLength(username.to_string()));
    }

    if username.to_lowercase().contains(FORBIDDEN_USERNAME_LETTER) {
        return Err(UserValidationError::UsernameForbiddenLetter(
            username.to_string(),
        ));
    }

    Ok(())
}

/// Reject usernames that equal or contain a reserved word (case-insensitive)
pub fn validate_not_reserved(username: &str) -> Result<(), UserValidationError> {
    let lowered = username.to_lowercase();

    if RESERVED_USERNAMES
        .iter()
        .any(|reserved| lowered.contains(reserved))
    {
        return Err(UserValidationError::ReservedUsername(username.to_string()));
    }

    Ok(())
}
