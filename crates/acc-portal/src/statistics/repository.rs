use super::domain::{PeriodType, RecoveryStatistic, StatisticId};
use crate::shared::RepositoryError;

/// Storage abstraction for recovery statistics.
pub trait StatisticsRepository: Send + Sync {
    /// Fails with `Conflict` when `(period, period_type)` already exists.
    fn insert(&self, statistic: RecoveryStatistic) -> Result<RecoveryStatistic, RepositoryError>;
    /// Fails with `Conflict` when the new period collides with another row.
    fn update(&self, statistic: RecoveryStatistic) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &StatisticId) -> Result<Option<RecoveryStatistic>, RepositoryError>;
    fn find_period(
        &self,
        period: &str,
        period_type: PeriodType,
    ) -> Result<Option<RecoveryStatistic>, RepositoryError>;
    fn delete(&self, id: &StatisticId) -> Result<RecoveryStatistic, RepositoryError>;
    /// Ordered by period, latest first.
    fn all(&self) -> Result<Vec<RecoveryStatistic>, RepositoryError>;
}
