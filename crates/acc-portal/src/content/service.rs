use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::entry::{ContentEntry, ContentId};
use super::publication::{ContentStatus, Publication};
use super::repository::ContentRepository;
use crate::shared::identifiers::generate_slug_with_entropy;
use crate::shared::{generate_slug, PageRequest, Paginated, RepositoryError, ValidationErrors};

const SLUG_ATTEMPTS: usize = 5;
const RELATED_LIMIT: usize = 3;

/// Public detail view: the entry plus a few related published entries.
#[derive(Debug, Clone, Serialize)]
pub struct PublicEntry<T> {
    #[serde(flatten)]
    pub entry: T,
    pub related: Vec<T>,
}

/// Lifecycle and listing rules shared by every content kind.
pub struct ContentService<T: ContentEntry> {
    repository: Arc<dyn ContentRepository<T>>,
}

impl<T: ContentEntry> ContentService<T> {
    pub fn new(repository: Arc<dyn ContentRepository<T>>) -> Self {
        Self { repository }
    }

    /// Published entries, most recently published first.
    fn published(&self) -> Result<Vec<T>, ContentServiceError> {
        let mut published: Vec<T> = self
            .repository
            .all()?
            .into_iter()
            .filter(|entry| entry.publication().is_published())
            .collect();
        published.sort_by(|a, b| b.publication().published_at.cmp(&a.publication().published_at));
        Ok(published)
    }

    pub fn list_published(&self, filters: &T::Filters) -> Result<Paginated<T>, ContentServiceError> {
        let (page, limit) = T::page(filters);
        let page = PageRequest::resolve(page, limit, T::DEFAULT_LIMIT, T::MAX_LIMIT)?;
        let matching: Vec<T> = self
            .published()?
            .into_iter()
            .filter(|entry| entry.matches(filters))
            .collect();
        Ok(page.paginate(matching))
    }

    pub fn get_public(&self, slug: &str) -> Result<PublicEntry<T>, ContentServiceError> {
        let found = self
            .repository
            .find_by_slug(slug)?
            .filter(|entry| entry.publication().is_published())
            .ok_or(ContentServiceError::NotFound(T::NOUN))?;

        // Re-check publication on the counted copy; staff may archive between the two calls.
        let entry = match self.repository.record_view(found.id()) {
            Ok(entry) if entry.publication().is_published() => entry,
            Ok(_) | Err(RepositoryError::NotFound) => {
                return Err(ContentServiceError::NotFound(T::NOUN))
            }
            Err(err) => return Err(err.into()),
        };

        let related = self
            .published()?
            .into_iter()
            .filter(|other| other.id() != entry.id() && entry.is_related(other))
            .take(RELATED_LIMIT)
            .collect();
        Ok(PublicEntry { entry, related })
    }

    /// Every entry regardless of status, newest first.
    pub fn admin_list(&self) -> Result<Vec<T>, ContentServiceError> {
        Ok(self.repository.all()?)
    }

    pub fn admin_get(&self, id: &ContentId) -> Result<T, ContentServiceError> {
        self.fetch(id)
    }

    pub fn count_published(&self) -> Result<usize, ContentServiceError> {
        Ok(self
            .repository
            .all()?
            .iter()
            .filter(|entry| entry.publication().is_published())
            .count())
    }

    pub fn create(&self, draft: T::Draft) -> Result<T, ContentServiceError> {
        T::validate_draft(&draft)?;
        let title = T::draft_title(&draft).trim().to_string();
        let publication = Publication::new(T::draft_status(&draft), Utc::now());
        let mut entry = T::from_draft(ContentId::generate(), generate_slug(&title), draft, publication);

        for attempt in 1..=SLUG_ATTEMPTS {
            match self.repository.insert(entry.clone()) {
                Ok(stored) => {
                    info!(
                        kind = T::NOUN,
                        id = %stored.id(),
                        slug = stored.slug(),
                        status = ?stored.publication().status,
                        "content created"
                    );
                    return Ok(stored);
                }
                Err(RepositoryError::Conflict(reason)) if attempt < SLUG_ATTEMPTS => {
                    warn!(kind = T::NOUN, %reason, attempt, "content slug collided, retrying");
                    entry.set_slug(generate_slug_with_entropy(&title));
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(ContentServiceError::Repository(RepositoryError::Conflict(
            "content slug".to_string(),
        )))
    }

    /// Partial update; the slug is kept so published links stay stable.
    pub fn update(&self, id: &ContentId, patch: T::Patch) -> Result<T, ContentServiceError> {
        T::validate_patch(&patch)?;
        let mut entry = self.fetch(id)?;
        let status = T::patch_status(&patch);
        entry.apply_patch(patch);

        let now = Utc::now();
        match status {
            Some(status) => entry.publication_mut().transition(status, now),
            None => entry.publication_mut().updated_at = now,
        }

        let entry = self.repository.update(entry)?;
        info!(kind = T::NOUN, id = %entry.id(), "content updated");
        Ok(entry)
    }

    pub fn set_status(&self, id: &ContentId, status: ContentStatus) -> Result<T, ContentServiceError> {
        let mut entry = self.fetch(id)?;
        let previous = entry.publication().status;
        entry.publication_mut().transition(status, Utc::now());
        let entry = self.repository.update(entry)?;
        info!(kind = T::NOUN, id = %entry.id(), from = ?previous, to = ?status, "content status changed");
        Ok(entry)
    }

    pub fn delete(&self, id: &ContentId) -> Result<(), ContentServiceError> {
        let removed = self.repository.delete(id).map_err(|err| match err {
            RepositoryError::NotFound => ContentServiceError::NotFound(T::NOUN),
            other => ContentServiceError::Repository(other),
        })?;
        info!(kind = T::NOUN, id = %removed.id(), slug = removed.slug(), "content deleted");
        Ok(())
    }

    fn fetch(&self, id: &ContentId) -> Result<T, ContentServiceError> {
        self.repository
            .fetch(id)?
            .ok_or(ContentServiceError::NotFound(T::NOUN))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContentServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("content repository failure: {0}")]
    Repository(#[from] RepositoryError),
}
