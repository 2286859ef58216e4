use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::dashboard::{self, DashboardStats};
use super::domain::{
    PeriodType, RecoveryStatistic, StatisticDraft, StatisticId, StatisticPatch,
};
use super::import::{self, ImportSummary, SkippedRow, StatisticsImportError};
use super::repository::StatisticsRepository;
use crate::shared::{RepositoryError, ValidationErrors};

pub struct StatisticsService {
    repository: Arc<dyn StatisticsRepository>,
}

impl StatisticsService {
    pub fn new(repository: Arc<dyn StatisticsRepository>) -> Self {
        Self { repository }
    }

    /// Every row, latest period first.
    pub fn list(&self) -> Result<Vec<RecoveryStatistic>, StatisticsServiceError> {
        Ok(self.repository.all()?)
    }

    pub fn dashboard(
        &self,
        period_type: Option<PeriodType>,
    ) -> Result<DashboardStats, StatisticsServiceError> {
        Ok(dashboard::compute(self.repository.all()?, period_type))
    }

    /// Latest yearly row, shown on the admin overview.
    pub fn latest_yearly(&self) -> Result<Option<RecoveryStatistic>, StatisticsServiceError> {
        Ok(self
            .repository
            .all()?
            .into_iter()
            .find(|row| row.period_type == PeriodType::Yearly))
    }

    pub fn create(
        &self,
        draft: StatisticDraft,
    ) -> Result<RecoveryStatistic, StatisticsServiceError> {
        draft.validate()?;
        if self
            .repository
            .find_period(draft.period.trim(), draft.period_type)?
            .is_some()
        {
            return Err(StatisticsServiceError::Duplicate);
        }

        let statistic = RecoveryStatistic::from_draft(draft, Utc::now());
        let stored = self.repository.insert(statistic).map_err(duplicate_on_conflict)?;
        info!(
            statistic_id = %stored.id,
            period = %stored.period,
            period_type = %stored.period_type,
            "recovery statistic created"
        );
        Ok(stored)
    }

    pub fn update(
        &self,
        id: &StatisticId,
        patch: StatisticPatch,
    ) -> Result<RecoveryStatistic, StatisticsServiceError> {
        patch.validate()?;
        let mut statistic = self
            .repository
            .fetch(id)?
            .ok_or(StatisticsServiceError::NotFound)?;
        patch.apply(&mut statistic, Utc::now());

        if let Some(existing) = self
            .repository
            .find_period(&statistic.period, statistic.period_type)?
        {
            if existing.id != statistic.id {
                return Err(StatisticsServiceError::Duplicate);
            }
        }

        self.repository
            .update(statistic.clone())
            .map_err(duplicate_on_conflict)?;
        info!(statistic_id = %statistic.id, period = %statistic.period, "recovery statistic updated");
        Ok(statistic)
    }

    pub fn delete(&self, id: &StatisticId) -> Result<(), StatisticsServiceError> {
        let removed = self.repository.delete(id).map_err(|err| match err {
            RepositoryError::NotFound => StatisticsServiceError::NotFound,
            other => StatisticsServiceError::Repository(other),
        })?;
        info!(statistic_id = %removed.id, period = %removed.period, "recovery statistic deleted");
        Ok(())
    }

    pub fn import_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<ImportSummary, StatisticsImportError> {
        let file = import::open(path)?;
        self.import_csv(file)
    }

    /// Loads every valid row. Invalid rows and already known periods are skipped and reported.
    pub fn import_csv<R: Read>(&self, reader: R) -> Result<ImportSummary, StatisticsImportError> {
        let mut summary = ImportSummary::default();

        for row in import::parse_rows(reader)? {
            let skip = |reason: String| SkippedRow {
                line: row.line,
                period: row.period.clone(),
                reason,
            };
            let draft = match row.draft {
                Ok(draft) => draft,
                Err(reason) => {
                    summary.skipped.push(skip(reason));
                    continue;
                }
            };

            match self.create(draft) {
                Ok(_) => summary.imported += 1,
                Err(StatisticsServiceError::Validation(errors)) => {
                    summary.skipped.push(skip(errors.first_message().to_string()));
                }
                Err(err @ (StatisticsServiceError::Duplicate | StatisticsServiceError::NotFound)) => {
                    summary.skipped.push(skip(err.to_string()));
                }
                Err(StatisticsServiceError::Repository(source)) => {
                    return Err(StatisticsImportError::Storage(source));
                }
            }
        }

        if !summary.skipped.is_empty() {
            warn!(skipped = summary.skipped.len(), "statistics import skipped rows");
        }
        info!(imported = summary.imported, "statistics import finished");
        Ok(summary)
    }
}

fn duplicate_on_conflict(err: RepositoryError) -> StatisticsServiceError {
    match err {
        RepositoryError::Conflict(_) => StatisticsServiceError::Duplicate,
        other => StatisticsServiceError::Repository(other),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StatisticsServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("Statistics for this period already exist")]
    Duplicate,
    #[error("Statistic not found")]
    NotFound,
    #[error("statistics repository failure: {0}")]
    Repository(#[from] RepositoryError),
}
