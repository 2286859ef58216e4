use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::shared::RepositoryError;
use crate::statistics::{PeriodType, RecoveryStatistic, StatisticId, StatisticsRepository};

#[derive(Debug, Default, Clone)]
pub struct MemoryStatisticsRepository {
    records: Arc<Mutex<HashMap<StatisticId, RecoveryStatistic>>>,
}

impl StatisticsRepository for MemoryStatisticsRepository {
    fn insert(&self, statistic: RecoveryStatistic) -> Result<RecoveryStatistic, RepositoryError> {
        let mut guard = self.records.lock().expect("statistics repository mutex poisoned");
        if guard
            .values()
            .any(|existing| existing.same_period(&statistic.period, statistic.period_type))
        {
            return Err(RepositoryError::Conflict(format!(
                "{} {}",
                statistic.period_type, statistic.period
            )));
        }
        guard.insert(statistic.id.clone(), statistic.clone());
        Ok(statistic)
    }

    fn update(&self, statistic: RecoveryStatistic) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("statistics repository mutex poisoned");
        if guard.values().any(|existing| {
            existing.id != statistic.id
                && existing.same_period(&statistic.period, statistic.period_type)
        }) {
            return Err(RepositoryError::Conflict(format!(
                "{} {}",
                statistic.period_type, statistic.period
            )));
        }
        match guard.get_mut(&statistic.id) {
            Some(slot) => {
                *slot = statistic;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &StatisticId) -> Result<Option<RecoveryStatistic>, RepositoryError> {
        let guard = self.records.lock().expect("statistics repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_period(
        &self,
        period: &str,
        period_type: PeriodType,
    ) -> Result<Option<RecoveryStatistic>, RepositoryError> {
        let guard = self.records.lock().expect("statistics repository mutex poisoned");
        Ok(guard
            .values()
            .find(|statistic| statistic.same_period(period, period_type))
            .cloned())
    }

    fn delete(&self, id: &StatisticId) -> Result<RecoveryStatistic, RepositoryError> {
        let mut guard = self.records.lock().expect("statistics repository mutex poisoned");
        guard.remove(id).ok_or(RepositoryError::NotFound)
    }

    fn all(&self) -> Result<Vec<RecoveryStatistic>, RepositoryError> {
        let guard = self.records.lock().expect("statistics repository mutex poisoned");
        let mut statistics: Vec<RecoveryStatistic> = guard.values().cloned().collect();
        statistics.sort_by(|a, b| b.period.cmp(&a.period));
        Ok(statistics)
    }
}
