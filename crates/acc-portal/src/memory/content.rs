use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::content::{ContentEntry, ContentId, ContentRepository};
use crate::shared::RepositoryError;

/// One map per content kind; cases, news and resources each get their own instance.
#[derive(Debug)]
pub struct MemoryContentRepository<T> {
    records: Arc<Mutex<HashMap<ContentId, T>>>,
}

impl<T> Default for MemoryContentRepository<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<T> Clone for MemoryContentRepository<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: ContentEntry> ContentRepository<T> for MemoryContentRepository<T> {
    fn insert(&self, entry: T) -> Result<T, RepositoryError> {
        let mut guard = self.records.lock().expect("content repository mutex poisoned");
        if guard.values().any(|existing| existing.slug() == entry.slug()) {
            return Err(RepositoryError::Conflict(format!("slug {}", entry.slug())));
        }
        guard.insert(entry.id().clone(), entry.clone());
        Ok(entry)
    }

    fn update(&self, mut entry: T) -> Result<T, RepositoryError> {
        let mut guard = self.records.lock().expect("content repository mutex poisoned");
        let slot = guard.get_mut(entry.id()).ok_or(RepositoryError::NotFound)?;
        entry.keep_counters(slot);
        *slot = entry;
        Ok(slot.clone())
    }

    fn record_view(&self, id: &ContentId) -> Result<T, RepositoryError> {
        let mut guard = self.records.lock().expect("content repository mutex poisoned");
        let entry = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        entry.record_public_view();
        Ok(entry.clone())
    }

    fn fetch(&self, id: &ContentId) -> Result<Option<T>, RepositoryError> {
        let guard = self.records.lock().expect("content repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<T>, RepositoryError> {
        let guard = self.records.lock().expect("content repository mutex poisoned");
        Ok(guard.values().find(|entry| entry.slug() == slug).cloned())
    }

    fn delete(&self, id: &ContentId) -> Result<T, RepositoryError> {
        let mut guard = self.records.lock().expect("content repository mutex poisoned");
        guard.remove(id).ok_or(RepositoryError::NotFound)
    }

    fn all(&self) -> Result<Vec<T>, RepositoryError> {
        let guard = self.records.lock().expect("content repository mutex poisoned");
        let mut entries: Vec<T> = guard.values().cloned().collect();
        entries.sort_by(|a, b| b.publication().created_at.cmp(&a.publication().created_at));
        Ok(entries)
    }
}
