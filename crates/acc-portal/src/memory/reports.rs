use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::reports::{CorruptionReport, ReportId, ReportRepository};
use crate::shared::RepositoryError;

#[derive(Debug, Default, Clone)]
pub struct MemoryReportRepository {
    records: Arc<Mutex<HashMap<ReportId, CorruptionReport>>>,
}

impl ReportRepository for MemoryReportRepository {
    fn insert(&self, report: CorruptionReport) -> Result<CorruptionReport, RepositoryError> {
        let mut guard = self.records.lock().expect("report repository mutex poisoned");
        if guard
            .values()
            .any(|existing| existing.reference_number == report.reference_number)
        {
            return Err(RepositoryError::Conflict(report.reference_number));
        }
        guard.insert(report.id.clone(), report.clone());
        Ok(report)
    }

    fn update(&self, report: CorruptionReport) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("report repository mutex poisoned");
        match guard.get_mut(&report.id) {
            Some(slot) => {
                *slot = report;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ReportId) -> Result<Option<CorruptionReport>, RepositoryError> {
        let guard = self.records.lock().expect("report repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<CorruptionReport>, RepositoryError> {
        let guard = self.records.lock().expect("report repository mutex poisoned");
        Ok(guard
            .values()
            .find(|report| report.reference_number == reference)
            .cloned())
    }

    fn all(&self) -> Result<Vec<CorruptionReport>, RepositoryError> {
        let guard = self.records.lock().expect("report repository mutex poisoned");
        let mut reports: Vec<CorruptionReport> = guard.values().cloned().collect();
        reports.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(reports)
    }
}
