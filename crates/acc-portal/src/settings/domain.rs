use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::shared::{ValidationErrors, Validator};

/// Every stored setting, keyed by name.
pub type SettingsMap = BTreeMap<String, Value>;

pub const FEATURED_PROPERTIES_COUNT: &str = "featured_properties_count";
pub const ENABLE_ANONYMOUS_REPORTS: &str = "enable_anonymous_reports";
pub const MAINTENANCE_MODE: &str = "maintenance_mode";

pub const DEFAULT_FEATURED_PROPERTIES: usize = 3;

/// Keys safe to expose on the public `/api/settings` endpoint.
pub const PUBLIC_KEYS: &[&str] = &[
    "site_name",
    "site_description",
    "contact_email",
    "contact_phone",
    "contact_address",
    "office_address",
    "social_media",
    "social_facebook",
    "social_twitter",
    "social_linkedin",
    "social_youtube",
    "footer_text",
    FEATURED_PROPERTIES_COUNT,
    ENABLE_ANONYMOUS_REPORTS,
    MAINTENANCE_MODE,
];

/// Partial update; absent keys are left untouched, unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsPatch {
    pub site_name: Option<String>,
    pub site_description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_address: Option<String>,
    pub social_facebook: Option<String>,
    pub social_twitter: Option<String>,
    pub social_linkedin: Option<String>,
    pub social_youtube: Option<String>,
    pub featured_properties_count: Option<i64>,
    pub enable_anonymous_reports: Option<bool>,
    pub maintenance_mode: Option<bool>,
    pub footer_text: Option<String>,
}

impl SettingsPatch {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        if let Some(site_name) = &self.site_name {
            validator.min_chars("site_name", site_name, 1);
        }
        validator.optional_email("contact_email", self.contact_email.as_deref());
        validator.within(
            FEATURED_PROPERTIES_COUNT,
            self.featured_properties_count.map(|count| count as f64),
            1.0,
            20.0,
        );
        validator.finish()
    }

    /// Flatten into `(key, value)` pairs for the keys that were supplied.
    pub fn into_entries(self) -> Vec<(String, Value)> {
        let strings = [
            ("site_name", self.site_name),
            ("site_description", self.site_description),
            ("contact_email", self.contact_email),
            ("contact_phone", self.contact_phone),
            ("contact_address", self.contact_address),
            ("social_facebook", self.social_facebook),
            ("social_twitter", self.social_twitter),
            ("social_linkedin", self.social_linkedin),
            ("social_youtube", self.social_youtube),
            ("footer_text", self.footer_text),
        ];

        let mut entries: Vec<(String, Value)> = strings
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key.to_string(), Value::String(value))))
            .collect();

        if let Some(count) = self.featured_properties_count {
            entries.push((FEATURED_PROPERTIES_COUNT.to_string(), Value::from(count)));
        }
        if let Some(enabled) = self.enable_anonymous_reports {
            entries.push((ENABLE_ANONYMOUS_REPORTS.to_string(), Value::Bool(enabled)));
        }
        if let Some(enabled) = self.maintenance_mode {
            entries.push((MAINTENANCE_MODE.to_string(), Value::Bool(enabled)));
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn featured_count_is_bounded() {
        let patch = SettingsPatch {
            featured_properties_count: Some(25),
            ..SettingsPatch::default()
        };
        let errors = patch.validate().expect_err("out of range");
        assert!(errors.has_field(FEATURED_PROPERTIES_COUNT));
    }

    #[test]
    fn entries_only_include_supplied_keys() {
        let patch = SettingsPatch {
            site_name: Some("ACC Sierra Leone".to_string()),
            maintenance_mode: Some(true),
            ..SettingsPatch::default()
        };
        let entries = patch.into_entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.contains(&("maintenance_mode".to_string(), Value::Bool(true))));
    }
}
