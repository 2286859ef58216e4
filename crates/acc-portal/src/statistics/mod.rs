//! Recovery statistics: admin maintenance, CSV bulk import and the public dashboard.

pub mod dashboard;
pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use dashboard::{
    DashboardStats, DashboardSummary, ProsecutionOutcome, RegionRecovery, SectorShare, TrendPoint,
};
pub use domain::{
    Breakdown, DashboardQuery, PeriodType, RecoveryStatistic, StatisticDraft, StatisticId,
    StatisticPatch,
};
pub use import::{ImportSummary, SkippedRow, StatisticsImportError};
pub use repository::StatisticsRepository;
pub use router::{statistics_admin_router, statistics_public_router};
pub use service::{StatisticsService, StatisticsServiceError};
