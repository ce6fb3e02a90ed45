//! User records API
//!
//! Stores user accounts keyed by time-ordered identifiers, with:
//! - Validated email and username values
//! - Copy-on-write updates and soft deletion
//! - Paginated listing and creation-date range queries
//! - An in-memory repository behind an async repository trait

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::IdGenerator;
use infrastructure::user::{InMemoryUserRepository, UserService};
use tracing::info;

/// Create the application state with all services initialized
pub fn create_app_state(config: &AppConfig) -> AppState {
    info!(
        latency_ms = config.storage.simulated_latency_ms,
        "Using in-memory user storage"
    );

    let repository =
        Arc::new(InMemoryUserRepository::new().with_latency(config.storage.simulated_latency()));
    let user_service = UserService::new(repository, Arc::new(IdGenerator::new()));

    AppState::new(Arc::new(user_service), config.app.version.clone())
}
