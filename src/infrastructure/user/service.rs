//! User service implementing the user use-cases

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::user::{validate_not_reserved, Email, User, UserRepository, Username};
use crate::domain::{validate_pagination, DomainError, EntityId, IdGenerator, Page, Timestamp};

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub username: Option<String>,
}

/// Request for updating a user; absent fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub username: Option<String>,
}

/// Raw pagination input, clamped before it reaches the repository
#[derive(Debug, Clone, Copy, Default)]
pub struct ListUsersQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Raw date-range input; empty bounds count as absent
#[derive(Debug, Clone, Default)]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// User service orchestrating validation, identity generation and storage
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    ids: Arc<IdGenerator>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, ids: Arc<IdGenerator>) -> Self {
        Self { repository, ids }
    }

    /// Register a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let username = request
            .username
            .filter(|u| !u.is_empty())
            .ok_or_else(|| DomainError::validation("Username is required"))?;

        validate_not_reserved(&username)?;

        let email = Email::new(request.email)?;

        if self.repository.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "Rejected user creation: email already in use");
            return Err(DomainError::email_already_exists(email.as_str()));
        }

        let username = Username::new(username)?;
        let user = User::create(&self.ids, email, username);

        self.repository.create(user.clone()).await?;
        info!(user_id = %user.id(), "User created");

        Ok(user)
    }

    /// Get a live user by ID
    pub async fn get(&self, id: &str) -> Result<User, DomainError> {
        let user_id = parse_user_id(id)?;

        self.repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    /// List live users
    pub async fn list(&self, query: ListUsersQuery) -> Result<Page<User>, DomainError> {
        let pagination = validate_pagination(query.page, query.limit);
        debug!(page = pagination.page, limit = pagination.limit, "Listing users");

        self.repository
            .find_all(pagination.page, pagination.limit)
            .await
    }

    /// List live users created within a date range
    pub async fn list_by_date_range(&self, query: DateRangeQuery) -> Result<Page<User>, DomainError> {
        let pagination = validate_pagination(query.page, query.limit);
        let start = parse_bound(query.start_date.as_deref())?;
        let end = parse_bound(query.end_date.as_deref())?;

        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(DomainError::invalid_date_range(
                    start.to_text(),
                    end.to_text(),
                ));
            }
        }

        debug!(
            start = ?start.map(|t| t.to_text()),
            end = ?end.map(|t| t.to_text()),
            page = pagination.page,
            limit = pagination.limit,
            "Listing users by creation date"
        );

        self.repository
            .find_by_date_range(start, end, pagination.page, pagination.limit)
            .await
    }

    /// Update a user's email and/or username
    pub async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError> {
        let existing = self.get(id).await?;

        let email = match request.email {
            Some(email) => {
                let email = Email::new(email)?;

                if let Some(owner) = self.repository.find_by_email(&email).await? {
                    if !owner.same_identity(&existing) {
                        warn!(user_id = %existing.id(), "Rejected user update: email already in use");
                        return Err(DomainError::email_already_exists(email.as_str()));
                    }
                }

                Some(email)
            }
            None => None,
        };

        let username = request.username.map(Username::new).transpose()?;

        let updated = existing.update(email, username);
        self.repository.update(updated.clone()).await?;
        info!(user_id = %updated.id(), "User updated");

        Ok(updated)
    }

    /// Soft-delete a user
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let existing = self.get(id).await?;

        self.repository.delete(existing.id()).await?;
        info!(user_id = %existing.id(), "User deleted");

        Ok(())
    }
}

/// Malformed ids cannot name a stored user, so they surface as not found
fn parse_user_id(id: &str) -> Result<EntityId, DomainError> {
    EntityId::parse(id).map_err(|_| DomainError::user_not_found(id))
}

fn parse_bound(text: Option<&str>) -> Result<Option<Timestamp>, DomainError> {
    text.filter(|t| !t.is_empty())
        .map(Timestamp::parse)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserRepository;
    use crate::domain::ErrorKind;
    use crate::infrastructure::user::repository::InMemoryUserRepository;
    use std::time::Duration;

    fn create_service() -> UserService<InMemoryUserRepository> {
        let repository = Arc::new(InMemoryUserRepository::new());
        UserService::new(repository, Arc::new(IdGenerator::new()))
    }

    fn make_request(email: &str, username: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            username: Some(username.to_string()),
        }
    }

    fn pause() {
        std::thread::sleep(Duration::from_millis(5));
    }

    #[tokio::test]
    async fn test_create_user() {
        let service = create_service();

        let user = service
            .create(make_request("test@example.com", "testuser"))
            .await
            .unwrap();

        assert_eq!(user.email().as_str(), "test@example.com");
        assert_eq!(user.username().as_str(), "testuser");

        let stored = service.get(user.id().as_str()).await.unwrap();
        assert_eq!(stored, user);
        assert_eq!(stored.created_at(), stored.updated_at());
        assert!(stored.deleted_at().is_none());
    }

    #[tokio::test]
    async fn test_create_requires_username() {
        let service = create_service();

        for username in [None, Some(String::new())] {
            let request = CreateUserRequest {
                email: "test@example.com".to_string(),
                username,
            };
            let err = service.create(request).await.unwrap_err();
            assert_eq!(err, DomainError::validation("Username is required"));
        }
    }

    #[tokio::test]
    async fn test_create_rejects_reserved_username() {
        let service = create_service();

        let err = service
            .create(make_request("test@example.com", "superadmin1"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert!(err.to_string().contains("reserved"));
    }

    #[tokio::test]
    async fn test_create_invalid_email() {
        let service = create_service();

        let err = service
            .create(make_request("@b.co", "testuser"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidEmailLocal);
    }

    #[tokio::test]
    async fn test_create_invalid_username() {
        let service = create_service();

        let err = service
            .create(make_request("test@example.com", "marco"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidUsername);
        assert_eq!(err.details()["username"], "marco");
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let service = create_service();

        service
            .create(make_request("test@example.com", "first"))
            .await
            .unwrap();

        let err = service
            .create(make_request("test@example.com", "other"))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::email_already_exists("test@example.com"));
    }

    #[tokio::test]
    async fn test_create_reuses_email_of_deleted_user() {
        let service = create_service();

        let first = service
            .create(make_request("test@example.com", "first"))
            .await
            .unwrap();
        service.delete(first.id().as_str()).await.unwrap();

        let second = service
            .create(make_request("test@example.com", "other"))
            .await
            .unwrap();

        assert!(!second.same_identity(&first));
    }

    #[tokio::test]
    async fn test_create_does_not_store_when_email_taken() {
        let mut repository = MockUserRepository::new();
        let ids = Arc::new(IdGenerator::new());
        let existing = User::create(
            &ids,
            Email::new("test@example.com").unwrap(),
            Username::new("existing").unwrap(),
        );

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_create().never();

        let service = UserService::new(Arc::new(repository), ids);
        let result = service
            .create(make_request("test@example.com", "testuser"))
            .await;

        assert!(matches!(result, Err(DomainError::EmailAlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_repository_errors_propagate() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_all()
            .returning(|_, _| Err(DomainError::internal("storage offline")));

        let service = UserService::new(Arc::new(repository), Arc::new(IdGenerator::new()));
        let err = service.list(ListUsersQuery::default()).await.unwrap_err();

        assert_eq!(err, DomainError::internal("storage offline"));
    }

    #[tokio::test]
    async fn test_list_clamps_pagination() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_all()
            .withf(|page, limit| *page == 1 && *limit == 100)
            .times(1)
            .returning(|page, limit| Ok(Page::from_items(Vec::new(), page, limit)));

        let service = UserService::new(Arc::new(repository), Arc::new(IdGenerator::new()));
        let page = service
            .list(ListUsersQuery {
                page: Some(-3),
                limit: Some(1000),
            })
            .await
            .unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 100);
    }

    #[tokio::test]
    async fn test_get_malformed_id_is_not_found() {
        let service = create_service();

        let err = service.get("not-a-ulid").await.unwrap_err();
        assert_eq!(err, DomainError::user_not_found("not-a-ulid"));
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let service = create_service();

        let err = service.get("01ARZ3NDEKTSV4RRFFQ69G5FAV").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UserNotFound);
    }

    #[tokio::test]
    async fn test_list_pages() {
        let service = create_service();

        for (email, username) in [
            ("a@example.com", "alpha"),
            ("b@example.com", "bravo"),
            ("d@example.com", "delta"),
        ] {
            service.create(make_request(email, username)).await.unwrap();
        }

        let page = service
            .list(ListUsersQuery {
                page: Some(2),
                limit: Some(2),
            })
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].username().as_str(), "delta");
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_list_by_date_range() {
        let service = create_service();

        let first = service
            .create(make_request("a@example.com", "alpha"))
            .await
            .unwrap();
        pause();
        let second = service
            .create(make_request("b@example.com", "bravo"))
            .await
            .unwrap();

        let from_second = service
            .list_by_date_range(DateRangeQuery {
                start_date: Some(second.created_at().to_text()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(from_second.total, 1);
        assert!(from_second.items[0].same_identity(&second));

        let until_first = service
            .list_by_date_range(DateRangeQuery {
                end_date: Some(first.created_at().to_text()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(until_first.total, 1);
        assert!(until_first.items[0].same_identity(&first));
    }

    #[tokio::test]
    async fn test_list_by_date_range_empty_bounds_are_ignored() {
        let service = create_service();
        service
            .create(make_request("a@example.com", "alpha"))
            .await
            .unwrap();

        let page = service
            .list_by_date_range(DateRangeQuery {
                start_date: Some(String::new()),
                end_date: Some(String::new()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_list_by_date_range_rejects_inverted_range() {
        let service = create_service();

        let err = service
            .list_by_date_range(DateRangeQuery {
                start_date: Some("2024-12-31T00:00:00.000Z".to_string()),
                end_date: Some("2024-01-01T00:00:00.000Z".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidDateRange);
    }

    #[tokio::test]
    async fn test_list_by_date_range_rejects_bad_date() {
        let service = create_service();

        let err = service
            .list_by_date_range(DateRangeQuery {
                start_date: Some("yesterday".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::invalid_timestamp("yesterday"));
    }

    #[tokio::test]
    async fn test_update_username() {
        let service = create_service();
        let user = service
            .create(make_request("test@example.com", "testuser"))
            .await
            .unwrap();
        pause();

        let updated = service
            .update(
                user.id().as_str(),
                UpdateUserRequest {
                    username: Some("new".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.username().as_str(), "new");
        assert_eq!(updated.email(), user.email());
        assert_eq!(updated.id(), user.id());
        assert_eq!(updated.created_at(), user.created_at());
        assert!(updated.updated_at() > user.updated_at());

        let stored = service.get(user.id().as_str()).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_update_to_own_email_is_allowed() {
        let service = create_service();
        let user = service
            .create(make_request("test@example.com", "testuser"))
            .await
            .unwrap();

        let updated = service
            .update(
                user.id().as_str(),
                UpdateUserRequest {
                    email: Some("test@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email(), user.email());
    }

    #[tokio::test]
    async fn test_update_to_taken_email() {
        let service = create_service();
        service
            .create(make_request("taken@example.com", "first"))
            .await
            .unwrap();
        let user = service
            .create(make_request("test@example.com", "other"))
            .await
            .unwrap();

        let err = service
            .update(
                user.id().as_str(),
                UpdateUserRequest {
                    email: Some("taken@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::email_already_exists("taken@example.com"));
    }

    #[tokio::test]
    async fn test_update_invalid_username_leaves_user_unchanged() {
        let service = create_service();
        let user = service
            .create(make_request("test@example.com", "testuser"))
            .await
            .unwrap();

        let err = service
            .update(
                user.id().as_str(),
                UpdateUserRequest {
                    username: Some("ab".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidUsername);
        assert_eq!(service.get(user.id().as_str()).await.unwrap(), user);
    }

    #[tokio::test]
    async fn test_update_deleted_user() {
        let service = create_service();
        let user = service
            .create(make_request("test@example.com", "testuser"))
            .await
            .unwrap();
        service.delete(user.id().as_str()).await.unwrap();

        let err = service
            .update(user.id().as_str(), UpdateUserRequest::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UserNotFound);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let service = create_service();
        let user = service
            .create(make_request("test@example.com", "testuser"))
            .await
            .unwrap();

        service.delete(user.id().as_str()).await.unwrap();

        let err = service.get(user.id().as_str()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UserNotFound);

        let err = service.delete(user.id().as_str()).await.unwrap_err();
        assert_eq!(err, DomainError::user_not_found(user.id().as_str()));
    }

    #[tokio::test]
    async fn test_delete_malformed_id() {
        let service = create_service();

        let err = service.delete("xyz").await.unwrap_err();
        assert_eq!(err, DomainError::user_not_found("xyz"));
    }
}
