use serde_json::Value;

use super::domain::SettingsMap;
use crate::shared::RepositoryError;

/// Storage abstraction for site settings.
pub trait SettingsRepository: Send + Sync {
    fn all(&self) -> Result<SettingsMap, RepositoryError>;
    fn get(&self, key: &str) -> Result<Option<Value>, RepositoryError>;
    /// Upserts every entry as one unit; either all keys change or none do.
    fn upsert_many(&self, entries: Vec<(String, Value)>) -> Result<SettingsMap, RepositoryError>;
}
