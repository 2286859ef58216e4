//! In-memory repository implementations backing the default deployment and tests.

mod content;
mod properties;
mod reports;
mod settings;
mod statistics;
mod subscriptions;
mod users;

pub use content::MemoryContentRepository;
pub use properties::{MemoryInterestRepository, MemoryPropertyRepository};
pub use reports::MemoryReportRepository;
pub use settings::MemorySettingsRepository;
pub use statistics::MemoryStatisticsRepository;
pub use subscriptions::MemorySubscriptionRepository;
pub use users::MemoryUserRepository;
