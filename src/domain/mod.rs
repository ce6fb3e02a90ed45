//! Domain layer - Core business logic and entities

pub mod error;
pub mod identifier;
pub mod pagination;
pub mod timestamp;
pub mod user;

pub use error::{DomainError, ErrorKind};
pub use identifier::{EntityId, IdGenerator};
pub use pagination::{validate_pagination, Page, Pagination};
pub use timestamp::Timestamp;
pub use user::{Email, User, UserRepository, UserRole, Username};
