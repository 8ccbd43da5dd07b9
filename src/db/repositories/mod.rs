pub mod appeal_repository;
pub mod user_repository;

use async_trait::async_trait;

use crate::db::error::RepositoryError;
use crate::db::models::{Appeal, NewAppeal, NewUser, User};

pub use appeal_repository::PgAppealStore;
pub use user_repository::PgUserStore;

/// Persistent user accounts. Emails are unique across all users.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts the user; a taken email yields `UniqueViolation`.
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<User, RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<User, RepositoryError>;
    /// Removes the user; an absent id yields `NotFound`.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

/// Append-only store of client appeals.
#[async_trait]
pub trait AppealStore: Send + Sync {
    async fn create(&self, new_appeal: NewAppeal) -> Result<Appeal, RepositoryError>;
}
