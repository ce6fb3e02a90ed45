//! User repository trait

use async_trait::async_trait;

use super::entity::User;
use super::values::Email;
use crate::domain::identifier::EntityId;
use crate::domain::pagination::Page;
use crate::domain::timestamp::Timestamp;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Storage contract for users.
///
/// Soft-deleted users are invisible to every read and are rejected by
/// `update` and `delete` with `UserNotFound`. `page`/`limit` are used as
/// given; clamping is the caller's job.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a user under its id
    async fn create(&self, user: User) -> Result<(), DomainError>;

    /// First live user whose email matches exactly (case-sensitive)
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    /// Live user with the given id
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<User>, DomainError>;

    /// One page of live users
    async fn find_all(&self, page: u32, limit: u32) -> Result<Page<User>, DomainError>;

    /// One page of live users whose `created_at` lies within the inclusive bounds.
    ///
    /// A missing bound leaves that side open; with neither bound this behaves
    /// like `find_all`. The caller must ensure `start <= end`.
    async fn find_by_date_range(
        &self,
        start: Option<Timestamp>,
        end: Option<Timestamp>,
        page: u32,
        limit: u32,
    ) -> Result<Page<User>, DomainError>;

    /// Replace a live user
    async fn update(&self, user: User) -> Result<(), DomainError>;

    /// Soft-delete a live user
    async fn delete(&self, id: &EntityId) -> Result<(), DomainError>;
}

/// Check whether a user's creation time falls inside optional inclusive bounds
pub fn created_within(user: &User, start: Option<Timestamp>, end: Option<Timestamp>) -> bool {
    let created_at = user.created_at();

    start.is_none_or(|start| created_at >= start) && end.is_none_or(|end| created_at <= end)
}
