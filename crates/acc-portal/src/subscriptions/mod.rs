//! Newsletter sign-ups. Subscriptions are confirmed on creation; nothing is mailed.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{EmailSubscription, SubscribeRequest, SubscriptionOutcome, UnsubscribeRequest};
pub use repository::SubscriptionRepository;
pub use router::{subscription_admin_router, subscription_public_router};
pub use service::{SubscriptionService, SubscriptionServiceError};
