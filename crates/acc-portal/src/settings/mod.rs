//! Key/value site settings with a validated patch surface.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{SettingsMap, SettingsPatch};
pub use repository::SettingsRepository;
pub use router::{settings_admin_router, settings_public_router};
pub use service::{SettingsService, SettingsServiceError};
