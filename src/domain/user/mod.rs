//! User domain
//!
//! This module provides the user entity, its validated value objects, and the
//! repository contract that storage backends implement.

mod entity;
mod repository;
mod validation;
mod values;

pub use entity::{with_timestamps, User, UserRole};
pub use repository::{created_within, UserRepository};
pub use validation::{
    validate_email, validate_not_reserved, validate_username, UserValidationError,
    RESERVED_USERNAMES,
};
pub use values::{Email, Username};

#[cfg(test)]
pub use repository::MockUserRepository;
