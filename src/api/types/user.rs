//! User request and response bodies

use serde::{Deserialize, Serialize};

use crate::domain::{Page, User};

/// Body of `POST /users`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserBody {
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Body of `PATCH /users/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserBody {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Query string of `GET /users`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersQueryParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Query string of `GET /users/by-date-range`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQueryParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            username: user.username().to_string(),
            created_at: user.created_at().to_text(),
            updated_at: user.updated_at().to_text(),
            deleted_at: user.deleted_at().map(|t| t.to_text()),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedUsersResponse {
    pub users: Vec<UserResponse>,
    pub pagination: PaginationInfo,
}

impl From<Page<User>> for PaginatedUsersResponse {
    fn from(page: Page<User>) -> Self {
        let page = page.map(UserResponse::from);

        Self {
            pagination: PaginationInfo {
                total: page.total,
                page: page.page,
                limit: page.limit,
                total_pages: page.total_pages,
            },
            users: page.items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserResponse {
    pub message: String,
    pub user_id: String,
}

impl DeleteUserResponse {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            message: "User successfully deleted".to_string(),
            user_id: user_id.into(),
        }
    }
}
