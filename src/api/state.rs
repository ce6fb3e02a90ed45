//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::UserRepository;
use crate::domain::{DomainError, Page, User};
use crate::infrastructure::user::{
    CreateUserRequest, DateRangeQuery, ListUsersQuery, UpdateUserRequest, UserService,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    /// Version reported in response metadata
    pub version: String,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn get(&self, id: &str) -> Result<User, DomainError>;
    async fn list(&self, query: ListUsersQuery) -> Result<Page<User>, DomainError>;
    async fn list_by_date_range(&self, query: DateRangeQuery) -> Result<Page<User>, DomainError>;
    async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> UserServiceTrait for UserService<R> {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserService::create(self, request).await
    }

    async fn get(&self, id: &str) -> Result<User, DomainError> {
        UserService::get(self, id).await
    }

    async fn list(&self, query: ListUsersQuery) -> Result<Page<User>, DomainError> {
        UserService::list(self, query).await
    }

    async fn list_by_date_range(&self, query: DateRangeQuery) -> Result<Page<User>, DomainError> {
        UserService::list_by_date_range(self, query).await
    }

    async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError> {
        UserService::update(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        UserService::delete(self, id).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(user_service: Arc<dyn UserServiceTrait>, version: impl Into<String>) -> Self {
        Self {
            user_service,
            version: version.into(),
        }
    }
}
