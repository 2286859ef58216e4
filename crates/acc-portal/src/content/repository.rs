use super::entry::{ContentEntry, ContentId};
use crate::shared::RepositoryError;

/// Storage for one content kind.
pub trait ContentRepository<T: ContentEntry>: Send + Sync {
    /// Fails with `Conflict` when the slug is taken.
    fn insert(&self, entry: T) -> Result<T, RepositoryError>;
    /// Replaces the stored entry; public-read counters keep their stored values.
    fn update(&self, entry: T) -> Result<T, RepositoryError>;
    /// Applies `ContentEntry::record_public_view` in place and returns the stored entry.
    fn record_view(&self, id: &ContentId) -> Result<T, RepositoryError>;
    fn fetch(&self, id: &ContentId) -> Result<Option<T>, RepositoryError>;
    fn find_by_slug(&self, slug: &str) -> Result<Option<T>, RepositoryError>;
    fn delete(&self, id: &ContentId) -> Result<T, RepositoryError>;
    /// Newest first by creation time.
    fn all(&self) -> Result<Vec<T>, RepositoryError>;
}
