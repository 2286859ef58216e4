use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    CorruptionReport, ReportDetail, ReportFilters, ReportId, ReportPatch, ReportPriority,
    ReportReceipt, ReportStatus, ReportSubmission, ReportTracking,
};
use super::repository::ReportRepository;
use crate::accounts::UserRepository;
use crate::settings::{SettingsService, SettingsServiceError};
use crate::shared::{generate_reference_number, Paginated, RepositoryError, ValidationErrors};

const REPORT_CONFIRMATION: &str = "Your report has been submitted successfully";

pub struct ReportService {
    reports: Arc<dyn ReportRepository>,
    users: Arc<dyn UserRepository>,
    settings: Arc<SettingsService>,
}

impl ReportService {
    pub fn new(
        reports: Arc<dyn ReportRepository>,
        users: Arc<dyn UserRepository>,
        settings: Arc<SettingsService>,
    ) -> Self {
        Self {
            reports,
            users,
            settings,
        }
    }

    /// Validate and store a citizen report. Anonymous reports never keep reporter identity.
    pub fn submit(
        &self,
        submission: ReportSubmission,
        ip_address: &str,
    ) -> Result<ReportReceipt, ReportServiceError> {
        submission.validate()?;
        if submission.is_anonymous && !self.settings.anonymous_reports_enabled()? {
            warn!("anonymous report rejected: anonymous reporting disabled");
            return Err(ReportServiceError::AnonymousDisabled);
        }

        let now = Utc::now();
        let anonymous = submission.is_anonymous;
        let identity = |value: Option<String>| if anonymous { None } else { value };

        let report = CorruptionReport {
            id: ReportId::generate(),
            reference_number: generate_reference_number("CR"),
            reporter_name: identity(submission.reporter_name),
            reporter_email: identity(submission.reporter_email),
            reporter_phone: identity(submission.reporter_phone),
            is_anonymous: anonymous,
            incident_date: submission.incident_date,
            incident_location: submission.incident_location,
            region: submission.region,
            accused_name: submission.accused_name,
            accused_position: submission.accused_position,
            accused_organization: submission.accused_organization,
            category: submission.category,
            description: submission.description,
            estimated_amount: submission.estimated_amount,
            has_evidence: submission.has_evidence,
            evidence_description: submission.evidence_description,
            status: ReportStatus::Received,
            priority: ReportPriority::Medium,
            assigned_to_id: None,
            internal_notes: None,
            ip_address: ip_address.to_string(),
            submitted_at: now,
            updated_at: now,
        };

        let stored = self.reports.insert(report)?;
        info!(
            reference = %stored.reference_number,
            category = ?stored.category,
            anonymous = stored.is_anonymous,
            "corruption report received"
        );
        Ok(ReportReceipt {
            reference_number: stored.reference_number,
            message: REPORT_CONFIRMATION.to_string(),
        })
    }

    pub fn admin_list(
        &self,
        filters: &ReportFilters,
    ) -> Result<Paginated<CorruptionReport>, ReportServiceError> {
        let page = filters.page_request()?;
        let matching: Vec<CorruptionReport> = self
            .reports
            .all()?
            .into_iter()
            .filter(|report| filters.matches(report))
            .collect();
        Ok(page.paginate(matching))
    }

    pub fn get(&self, id: &ReportId) -> Result<ReportDetail, ReportServiceError> {
        let report = self.fetch(id)?;
        self.detail(report)
    }

    pub fn update(
        &self,
        id: &ReportId,
        patch: ReportPatch,
    ) -> Result<ReportDetail, ReportServiceError> {
        patch.validate()?;
        let mut report = self.fetch(id)?;

        if let Some(Some(assignee)) = &patch.assigned_to_id {
            if self.users.fetch(assignee)?.is_none() {
                return Err(ReportServiceError::AssigneeNotFound);
            }
        }

        if let Some(status) = patch.status {
            report.status = status;
        }
        if let Some(priority) = patch.priority {
            report.priority = priority;
        }
        if let Some(assignee) = patch.assigned_to_id {
            report.assigned_to_id = assignee;
        }
        if let Some(notes) = patch.internal_notes {
            report.internal_notes = notes;
        }
        report.updated_at = Utc::now();

        self.reports.update(report.clone())?;
        info!(
            reference = %report.reference_number,
            status = ?report.status,
            priority = ?report.priority,
            assigned = report.assigned_to_id.is_some(),
            "corruption report updated"
        );
        self.detail(report)
    }

    pub fn track(&self, reference_number: &str) -> Result<ReportTracking, ReportServiceError> {
        let reference = reference_number.trim().to_ascii_uppercase();
        self.reports
            .find_by_reference(&reference)?
            .as_ref()
            .map(ReportTracking::from)
            .ok_or(ReportServiceError::NotFound)
    }

    pub fn count_with_status(&self, status: ReportStatus) -> Result<usize, ReportServiceError> {
        Ok(self
            .reports
            .all()?
            .iter()
            .filter(|report| report.status == status)
            .count())
    }

    /// Latest reports still awaiting triage.
    pub fn recent_open(&self, limit: usize) -> Result<Vec<CorruptionReport>, ReportServiceError> {
        Ok(self
            .reports
            .all()?
            .into_iter()
            .filter(|report| report.status.is_open())
            .take(limit)
            .collect())
    }

    fn fetch(&self, id: &ReportId) -> Result<CorruptionReport, ReportServiceError> {
        self.reports
            .fetch(id)?
            .ok_or(ReportServiceError::NotFound)
    }

    fn detail(&self, report: CorruptionReport) -> Result<ReportDetail, ReportServiceError> {
        let assigned_to = match &report.assigned_to_id {
            Some(user_id) => self.users.fetch(user_id)?.map(|user| user.summary()),
            None => None,
        };
        Ok(ReportDetail {
            report,
            assigned_to,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("Anonymous reports are currently disabled")]
    AnonymousDisabled,
    #[error("Report not found")]
    NotFound,
    #[error("Assigned user not found")]
    AssigneeNotFound,
    #[error(transparent)]
    Settings(#[from] SettingsServiceError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
