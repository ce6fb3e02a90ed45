//! User management endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, ApiResponse, CreateUserBody, Created, DateRangeQueryParams, DeleteUserResponse,
    Json, PaginatedUsersResponse, Query, UpdateUserBody, UserResponse, UsersQueryParams,
};
use crate::infrastructure::user::{
    CreateUserRequest, DateRangeQuery, ListUsersQuery, UpdateUserRequest,
};

/// Create the user management router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/by-date-range", get(list_users_by_date_range))
        .route(
            "/users/{user_id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<UsersQueryParams>,
) -> Result<ApiResponse<PaginatedUsersResponse>, ApiError> {
    debug!(page = ?params.page, limit = ?params.limit, "Listing users");

    let page = state
        .user_service
        .list(ListUsersQuery {
            page: params.page,
            limit: params.limit,
        })
        .await?;

    Ok(ApiResponse::new(page.into()))
}

/// GET /users/by-date-range
pub async fn list_users_by_date_range(
    State(state): State<AppState>,
    Query(params): Query<DateRangeQueryParams>,
) -> Result<ApiResponse<PaginatedUsersResponse>, ApiError> {
    debug!(
        start_date = ?params.start_date,
        end_date = ?params.end_date,
        "Listing users by date range"
    );

    let page = state
        .user_service
        .list_by_date_range(DateRangeQuery {
            start_date: params.start_date,
            end_date: params.end_date,
            page: params.page,
            limit: params.limit,
        })
        .await?;

    Ok(ApiResponse::new(page.into()))
}

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    debug!(user_id = %user_id, "Getting user");

    let user = state.user_service.get(&user_id).await?;

    Ok(ApiResponse::new(user.into()))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserBody>,
) -> Result<Created<UserResponse>, ApiError> {
    debug!(email = %body.email, "Creating user");

    let user = state
        .user_service
        .create(CreateUserRequest {
            email: body.email,
            username: body.username,
        })
        .await?;

    info!(user_id = %user.id(), "User registered via API");

    Ok(Created(user.into()))
}

/// PATCH /users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<UpdateUserBody>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    debug!(user_id = %user_id, "Updating user");

    let user = state
        .user_service
        .update(
            &user_id,
            UpdateUserRequest {
                email: body.email,
                username: body.username,
            },
        )
        .await?;

    Ok(ApiResponse::new(user.into()))
}

/// DELETE /users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<DeleteUserResponse>, ApiError> {
    debug!(user_id = %user_id, "Deleting user");

    state.user_service.delete(&user_id).await?;

    Ok(ApiResponse::new(DeleteUserResponse::new(user_id)))
}
