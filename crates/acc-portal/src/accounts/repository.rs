use super::domain::{User, UserId};
use crate::shared::RepositoryError;

/// Storage abstraction for staff accounts. E-mail lookups are case-insensitive.
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the e-mail is already registered.
    fn insert(&self, user: User) -> Result<User, RepositoryError>;
    fn update(&self, user: User) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    /// Newest first.
    fn all(&self) -> Result<Vec<User>, RepositoryError>;
}
