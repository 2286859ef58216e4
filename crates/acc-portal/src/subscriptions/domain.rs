use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{ValidationErrors, Validator};

pub const DEFAULT_CATEGORIES: [&str; 2] = ["news", "updates"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSubscription {
    pub email: String,
    pub name: Option<String>,
    pub categories: Vec<String>,
    pub is_active: bool,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub unsubscribed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl EmailSubscription {
    pub fn reactivate(&mut self, now: DateTime<Utc>) {
        self.is_active = true;
        self.unsubscribed_at = None;
        self.confirmed_at = Some(now);
    }

    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.is_active = false;
        self.unsubscribed_at = Some(now);
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
    pub name: Option<String>,
    pub categories: Option<Vec<String>>,
}

impl SubscribeRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        validator.email("email", &self.email);
        validator.optional_max_chars("name", self.name.as_deref(), 100);
        validator.finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnsubscribeRequest {
    pub email: String,
}

/// Whether a sign-up created a record or revived an old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionOutcome {
    Created,
    Reactivated,
}

impl SubscriptionOutcome {
    pub fn message(self) -> &'static str {
        match self {
            SubscriptionOutcome::Created => {
                "You have been successfully subscribed to our newsletter"
            }
            SubscriptionOutcome::Reactivated => "Your subscription has been reactivated",
        }
    }
}

/// Lookup key: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
