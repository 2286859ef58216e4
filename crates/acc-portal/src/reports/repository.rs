use super::domain::{CorruptionReport, ReportId};
use crate::shared::RepositoryError;

/// Storage abstraction for corruption reports.
pub trait ReportRepository: Send + Sync {
    /// Fails with `Conflict` when the reference number is already used.
    fn insert(&self, report: CorruptionReport) -> Result<CorruptionReport, RepositoryError>;
    fn update(&self, report: CorruptionReport) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ReportId) -> Result<Option<CorruptionReport>, RepositoryError>;
    fn find_by_reference(&self, reference: &str)
        -> Result<Option<CorruptionReport>, RepositoryError>;
    /// Newest first.
    fn all(&self) -> Result<Vec<CorruptionReport>, RepositoryError>;
}
