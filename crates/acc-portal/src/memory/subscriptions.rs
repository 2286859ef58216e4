use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::shared::RepositoryError;
use crate::subscriptions::{EmailSubscription, SubscriptionRepository};

#[derive(Debug, Default, Clone)]
pub struct MemorySubscriptionRepository {
    records: Arc<Mutex<HashMap<String, EmailSubscription>>>,
}

impl SubscriptionRepository for MemorySubscriptionRepository {
    fn insert(
        &self,
        subscription: EmailSubscription,
    ) -> Result<EmailSubscription, RepositoryError> {
        let mut guard = self.records.lock().expect("subscription repository mutex poisoned");
        if guard.contains_key(&subscription.email) {
            return Err(RepositoryError::Conflict(subscription.email));
        }
        guard.insert(subscription.email.clone(), subscription.clone());
        Ok(subscription)
    }

    fn update(&self, subscription: EmailSubscription) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("subscription repository mutex poisoned");
        match guard.get_mut(&subscription.email) {
            Some(slot) => {
                *slot = subscription;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn find(&self, email: &str) -> Result<Option<EmailSubscription>, RepositoryError> {
        let guard = self.records.lock().expect("subscription repository mutex poisoned");
        Ok(guard.get(email).cloned())
    }

    fn all(&self) -> Result<Vec<EmailSubscription>, RepositoryError> {
        let guard = self.records.lock().expect("subscription repository mutex poisoned");
        let mut subscriptions: Vec<EmailSubscription> = guard.values().cloned().collect();
        subscriptions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(subscriptions)
    }
}
