use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::settings::{SettingsMap, SettingsRepository};
use crate::shared::RepositoryError;

#[derive(Debug, Default, Clone)]
pub struct MemorySettingsRepository {
    entries: Arc<Mutex<SettingsMap>>,
}

impl SettingsRepository for MemorySettingsRepository {
    fn all(&self) -> Result<SettingsMap, RepositoryError> {
        Ok(self
            .entries
            .lock()
            .expect("settings repository mutex poisoned")
            .clone())
    }

    fn get(&self, key: &str) -> Result<Option<Value>, RepositoryError> {
        Ok(self
            .entries
            .lock()
            .expect("settings repository mutex poisoned")
            .get(key)
            .cloned())
    }

    fn upsert_many(&self, entries: Vec<(String, Value)>) -> Result<SettingsMap, RepositoryError> {
        let mut guard = self
            .entries
            .lock()
            .expect("settings repository mutex poisoned");
        guard.extend(entries);
        Ok(guard.clone())
    }
}
