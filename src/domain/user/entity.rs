//! User entity and related types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::values::{Email, Username};
use crate::domain::identifier::{EntityId, IdGenerator};
use crate::domain::timestamp::Timestamp;
use crate::domain::DomainError;

/// Role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular account; every newly created user starts here
    #[default]
    User,
    Admin,
    Master,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Master => "master",
        }
    }

    /// Check if the role carries elevated permissions
    pub fn is_privileged(&self) -> bool {
        matches!(self, Self::Admin | Self::Master)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "master" => Ok(Self::Master),
            other => Err(DomainError::validation(format!("Unknown user role: {}", other))),
        }
    }
}

/// User entity.
///
/// Immutable: every lifecycle operation returns a new instance and leaves the
/// receiver untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: EntityId,
    created_at: Timestamp,
    updated_at: Timestamp,
    deleted_at: Option<Timestamp>,
    email: Email,
    role: UserRole,
    username: Username,
}

impl User {
    /// Create a brand-new user with role `user`
    pub fn create(ids: &IdGenerator, email: Email, username: Username) -> Self {
        let now = Timestamp::now();

        Self {
            id: ids.generate(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            email,
            role: UserRole::User,
            username,
        }
    }

    /// Rebuild a user from stored fields
    pub fn reconstruct(
        id: EntityId,
        created_at: Timestamp,
        updated_at: Timestamp,
        deleted_at: Option<Timestamp>,
        email: Email,
        role: UserRole,
        username: Username,
    ) -> Self {
        Self {
            id,
            created_at,
            updated_at,
            deleted_at,
            email,
            role,
            username,
        }
    }

    // Getters

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<Timestamp> {
        self.deleted_at
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Business identity: two instances are the same user when their ids match
    pub fn same_identity(&self, other: &User) -> bool {
        self.id == other.id
    }

    // Lifecycle

    /// Replace email and/or username; `updated_at` always moves to now
    pub fn update(&self, email: Option<Email>, username: Option<Username>) -> Self {
        Self {
            email: email.unwrap_or_else(|| self.email.clone()),
            username: username.unwrap_or_else(|| self.username.clone()),
            ..with_timestamps(self, Timestamp::now(), self.deleted_at)
        }
    }

    /// Mark as deleted; `deleted_at` and `updated_at` are set to the same instant.
    ///
    /// Callers must check `is_deleted()` first; this does not reject a second call.
    pub fn soft_delete(&self) -> Self {
        let now = Timestamp::now();
        with_timestamps(self, now, Some(now))
    }

    /// Clear `deleted_at`, keeping `updated_at`
    pub fn restore(&self) -> Self {
        with_timestamps(self, self.updated_at, None)
    }
}

/// Copy a user with new `updated_at` / `deleted_at`, keeping every other field
pub fn with_timestamps(user: &User, updated_at: Timestamp, deleted_at: Option<Timestamp>) -> User {
    User {
        updated_at,
        deleted_at,
        ..user.clone()
    }
}
