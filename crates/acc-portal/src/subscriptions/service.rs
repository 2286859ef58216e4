use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{
    normalize_email, EmailSubscription, SubscribeRequest, SubscriptionOutcome, DEFAULT_CATEGORIES,
};
use super::repository::SubscriptionRepository;
use crate::shared::{RepositoryError, ValidationErrors};

pub struct SubscriptionService {
    repository: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionService {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub fn subscribe(
        &self,
        request: SubscribeRequest,
    ) -> Result<SubscriptionOutcome, SubscriptionServiceError> {
        request.validate()?;
        let email = normalize_email(&request.email);
        let now = Utc::now();

        if let Some(mut existing) = self.repository.find(&email)? {
            if existing.is_active {
                return Err(SubscriptionServiceError::AlreadySubscribed);
            }
            existing.reactivate(now);
            self.repository.update(existing)?;
            info!("newsletter subscription reactivated");
            return Ok(SubscriptionOutcome::Reactivated);
        }

        let categories = request
            .categories
            .filter(|categories| !categories.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect());

        let subscription = EmailSubscription {
            email,
            name: request.name.map(|name| name.trim().to_string()),
            categories,
            is_active: true,
            confirmed_at: Some(now),
            unsubscribed_at: None,
            created_at: now,
        };
        self.repository
            .insert(subscription)
            .map_err(|err| match err {
                RepositoryError::Conflict(_) => SubscriptionServiceError::AlreadySubscribed,
                other => SubscriptionServiceError::Repository(other),
            })?;
        info!("newsletter subscription created");
        Ok(SubscriptionOutcome::Created)
    }

    pub fn unsubscribe(&self, email: &str) -> Result<(), SubscriptionServiceError> {
        let mut subscription = self
            .repository
            .find(&normalize_email(email))?
            .filter(|subscription| subscription.is_active)
            .ok_or(SubscriptionServiceError::NotFound)?;
        subscription.deactivate(Utc::now());
        self.repository.update(subscription)?;
        info!("newsletter subscription cancelled");
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<EmailSubscription>, SubscriptionServiceError> {
        Ok(self.repository.all()?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubscriptionServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("This email is already subscribed")]
    AlreadySubscribed,
    #[error("Subscription not found")]
    NotFound,
    #[error("subscription repository failure: {0}")]
    Repository(#[from] RepositoryError),
}
