//! User infrastructure module
//!
//! This module provides the in-memory user repository and the user service
//! that implements the user use-cases on top of any `UserRepository`.

mod repository;
mod service;

pub use repository::InMemoryUserRepository;
pub use service::{
    CreateUserRequest, DateRangeQuery, ListUsersQuery, UpdateUserRequest, UserService,
};
