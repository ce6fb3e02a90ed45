//! In-memory user repository implementation

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::user::{created_within, Email, User, UserRepository};
use crate::domain::{DomainError, EntityId, Page, Timestamp};

/// In-memory implementation of UserRepository
///
/// Records are keyed by id text in an ordered map, so iteration follows id
/// order, which for generated ids is creation order. Nothing survives a restart.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<String, User>>>,
    /// Artificial delay applied before every operation
    latency: Duration,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(BTreeMap::new())),
            latency: Duration::ZERO,
        }
    }

    /// Create a repository with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let users_map = users
            .into_iter()
            .map(|user| (user.id().as_str().to_string(), user))
            .collect();

        Self {
            users: Arc::new(RwLock::new(users_map)),
            latency: Duration::ZERO,
        }
    }

    /// Delay every operation by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    async fn live_users_matching(&self, filter: impl Fn(&User) -> bool) -> Vec<User> {
        let users = self.users.read().await;

        users
            .values()
            .filter(|u| !u.is_deleted() && filter(*u))
            .cloned()
            .collect()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<(), DomainError> {
        self.simulate_latency().await;
        let mut users = self.users.write().await;

        debug!(user_id = %user.id(), "Storing user");
        users.insert(user.id().as_str().to_string(), user);

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        self.simulate_latency().await;
        let users = self.users.read().await;

        Ok(users
            .values()
            .find(|u| !u.is_deleted() && u.email() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<User>, DomainError> {
        self.simulate_latency().await;
        let users = self.users.read().await;

        Ok(users.get(id.as_str()).filter(|u| !u.is_deleted()).cloned())
    }

    async fn find_all(&self, page: u32, limit: u32) -> Result<Page<User>, DomainError> {
        self.simulate_latency().await;
        let live = self.live_users_matching(|_| true).await;

        Ok(Page::from_items(live, page, limit))
    }

    async fn find_by_date_range(
        &self,
        start: Option<Timestamp>,
        end: Option<Timestamp>,
        page: u32,
        limit: u32,
    ) -> Result<Page<User>, DomainError> {
        self.simulate_latency().await;
        let matching = self
            .live_users_matching(|u| created_within(u, start, end))
            .await;

        Ok(Page::from_items(matching, page, limit))
    }

    async fn update(&self, user: User) -> Result<(), DomainError> {
        self.simulate_latency().await;
        let mut users = self.users.write().await;
        let id = user.id().as_str().to_string();

        let is_live = users.get(&id).is_some_and(|existing| !existing.is_deleted());

        if !is_live {
            return Err(DomainError::user_not_found(id));
        }

        users.insert(id, user);

        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), DomainError> {
        self.simulate_latency().await;
        let mut users = self.users.write().await;

        let deleted = match users.get(id.as_str()) {
            Some(existing) if !existing.is_deleted() => existing.soft_delete(),
            _ => return Err(DomainError::user_not_found(id.as_str())),
        };

        debug!(user_id = %id, "Soft-deleting user");
        users.insert(id.as_str().to_string(), deleted);

        Ok(())
    }
}
