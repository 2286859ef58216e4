use super::domain::EmailSubscription;
use crate::shared::RepositoryError;

pub trait SubscriptionRepository: Send + Sync {
    /// Fails with `Conflict` when the e-mail is already recorded.
    fn insert(&self, subscription: EmailSubscription) -> Result<EmailSubscription, RepositoryError>;
    fn update(&self, subscription: EmailSubscription) -> Result<(), RepositoryError>;
    fn find(&self, email: &str) -> Result<Option<EmailSubscription>, RepositoryError>;
    /// Newest first.
    fn all(&self) -> Result<Vec<EmailSubscription>, RepositoryError>;
}
