//! HTTP request and response types

pub mod error;
pub mod json;
pub mod meta;
pub mod query;
pub mod user;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use meta::{ApiResponse, Created, RequestContext, ResponseMeta};
pub use query::Query;
pub use user::{
    CreateUserBody, DateRangeQueryParams, DeleteUserResponse, PaginatedUsersResponse,
    PaginationInfo, UpdateUserBody, UserResponse, UsersQueryParams,
};
