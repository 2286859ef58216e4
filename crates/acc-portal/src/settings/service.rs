use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use super::domain::{
    SettingsMap, SettingsPatch, DEFAULT_FEATURED_PROPERTIES, ENABLE_ANONYMOUS_REPORTS,
    FEATURED_PROPERTIES_COUNT, PUBLIC_KEYS,
};
use super::repository::SettingsRepository;
use crate::shared::{RepositoryError, ValidationErrors};

pub struct SettingsService {
    repository: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn SettingsRepository>) -> Self {
        Self { repository }
    }

    pub fn get_all(&self) -> Result<SettingsMap, SettingsServiceError> {
        Ok(self.repository.all()?)
    }

    pub fn public(&self) -> Result<SettingsMap, SettingsServiceError> {
        let mut settings = self.repository.all()?;
        settings.retain(|key, _| PUBLIC_KEYS.contains(&key.as_str()));
        Ok(settings)
    }

    pub fn update(&self, patch: SettingsPatch) -> Result<SettingsMap, SettingsServiceError> {
        patch.validate()?;
        let entries = patch.into_entries();
        let keys: Vec<String> = entries.iter().map(|(key, _)| key.clone()).collect();
        let settings = self.repository.upsert_many(entries)?;
        info!(?keys, "site settings updated");
        Ok(settings)
    }

    /// Raw upsert used by seeding; skips patch validation.
    pub fn store(&self, entries: Vec<(String, Value)>) -> Result<SettingsMap, SettingsServiceError> {
        Ok(self.repository.upsert_many(entries)?)
    }

    pub fn featured_properties_count(&self) -> Result<usize, SettingsServiceError> {
        let count = self
            .repository
            .get(FEATURED_PROPERTIES_COUNT)?
            .and_then(|value| value.as_u64())
            .map(|count| count as usize)
            .filter(|count| (1..=20).contains(count));
        Ok(count.unwrap_or(DEFAULT_FEATURED_PROPERTIES))
    }

    /// Anonymous reporting stays on unless explicitly disabled.
    pub fn anonymous_reports_enabled(&self) -> Result<bool, SettingsServiceError> {
        match self.repository.get(ENABLE_ANONYMOUS_REPORTS)? {
            Some(Value::Bool(enabled)) => Ok(enabled),
            Some(other) => {
                warn!(value = %other, "ignoring non-boolean enable_anonymous_reports setting");
                Ok(true)
            }
            None => Ok(true),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
