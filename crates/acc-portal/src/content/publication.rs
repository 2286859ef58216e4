use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// Lifecycle stamps shared by every content kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub status: ContentStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Publication {
    pub fn new(status: ContentStatus, now: DateTime<Utc>) -> Self {
        let mut publication = Self {
            status: ContentStatus::Draft,
            published_at: None,
            created_at: now,
            updated_at: now,
        };
        publication.transition(status, now);
        publication
    }

    pub fn is_published(&self) -> bool {
        self.status == ContentStatus::Published
    }

    /// `published_at` is stamped on first publication and survives later archiving.
    pub fn transition(&mut self, status: ContentStatus, now: DateTime<Utc>) {
        if status == ContentStatus::Published && self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.status = status;
        self.updated_at = now;
    }
}

/// Body of the admin status endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusChange {
    pub status: ContentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn publication_stamp_is_kept_through_archive_and_republish() {
        let created = Utc::now();
        let mut publication = Publication::new(ContentStatus::Draft, created);
        assert!(publication.published_at.is_none());

        let published = created + Duration::minutes(5);
        publication.transition(ContentStatus::Published, published);
        assert_eq!(publication.published_at, Some(published));

        publication.transition(ContentStatus::Archived, published + Duration::days(30));
        assert_eq!(publication.published_at, Some(published));
        assert!(!publication.is_published());

        publication.transition(ContentStatus::Published, published + Duration::days(31));
        assert_eq!(publication.published_at, Some(published));
    }
}
