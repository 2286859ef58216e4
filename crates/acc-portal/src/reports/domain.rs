use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::accounts::{UserId, UserSummary};
use crate::shared::identifiers::entity_id;
use crate::shared::{PageRequest, ValidationErrors, Validator};

entity_id!(
    /// Identifier wrapper for corruption reports.
    ReportId
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportCategory {
    Bribery,
    Embezzlement,
    Fraud,
    Nepotism,
    AbuseOfOffice,
    ProcurementFraud,
    Extortion,
    MoneyLaundering,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    #[default]
    Received,
    UnderReview,
    Investigating,
    ClosedSubstantiated,
    ClosedUnsubstantiated,
    Referred,
}

impl ReportStatus {
    /// Reports still waiting on a first triage decision.
    pub fn is_open(&self) -> bool {
        matches!(self, ReportStatus::Received | ReportStatus::UnderReview)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

fn default_anonymous() -> bool {
    true
}

/// Public intake payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportSubmission {
    pub reporter_name: Option<String>,
    pub reporter_email: Option<String>,
    pub reporter_phone: Option<String>,
    #[serde(default = "default_anonymous")]
    pub is_anonymous: bool,
    pub incident_date: Option<NaiveDate>,
    pub incident_location: Option<String>,
    pub region: Option<String>,
    pub accused_name: Option<String>,
    pub accused_position: Option<String>,
    pub accused_organization: Option<String>,
    pub category: Option<ReportCategory>,
    pub description: String,
    pub estimated_amount: Option<f64>,
    #[serde(default)]
    pub has_evidence: bool,
    pub evidence_description: Option<String>,
}

impl ReportSubmission {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        validator.optional_chars_between("reporter_name", self.reporter_name.as_deref(), 2, 100);
        validator.optional_email("reporter_email", self.reporter_email.as_deref());
        validator.optional_chars_between("reporter_phone", self.reporter_phone.as_deref(), 8, 20);
        validator.optional_max_chars("incident_location", self.incident_location.as_deref(), 500);
        validator.optional_max_chars("accused_name", self.accused_name.as_deref(), 200);
        validator.optional_max_chars("accused_position", self.accused_position.as_deref(), 200);
        validator.optional_max_chars(
            "accused_organization",
            self.accused_organization.as_deref(),
            200,
        );

        let description_len = self.description.trim().chars().count();
        if description_len < 50 {
            validator.fail(
                "description",
                "Please provide at least 50 characters describing the incident",
            );
        } else {
            validator.max_chars("description", &self.description, 5000);
        }

        validator.non_negative("estimated_amount", self.estimated_amount);
        validator.optional_max_chars(
            "evidence_description",
            self.evidence_description.as_deref(),
            2000,
        );

        if !self.is_anonymous && !has_text(&self.reporter_email) && !has_text(&self.reporter_phone) {
            validator.fail(
                "reporter_email",
                "Please provide at least an email or phone number for non-anonymous reports",
            );
        }

        validator.finish()
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|value| !value.trim().is_empty())
}

/// Stored report. Reporter identity is always `None` for anonymous reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorruptionReport {
    pub id: ReportId,
    pub reference_number: String,
    pub reporter_name: Option<String>,
    pub reporter_email: Option<String>,
    pub reporter_phone: Option<String>,
    pub is_anonymous: bool,
    pub incident_date: Option<NaiveDate>,
    pub incident_location: Option<String>,
    pub region: Option<String>,
    pub accused_name: Option<String>,
    pub accused_position: Option<String>,
    pub accused_organization: Option<String>,
    pub category: Option<ReportCategory>,
    pub description: String,
    pub estimated_amount: Option<f64>,
    pub has_evidence: bool,
    pub evidence_description: Option<String>,
    pub status: ReportStatus,
    pub priority: ReportPriority,
    pub assigned_to_id: Option<UserId>,
    pub internal_notes: Option<String>,
    pub ip_address: String,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CorruptionReport {
    fn search_haystack(&self) -> [Option<&str>; 3] {
        [
            Some(self.reference_number.as_str()),
            Some(self.description.as_str()),
            self.accused_name.as_deref(),
        ]
    }
}

/// Staff view including the assignee.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDetail {
    #[serde(flatten)]
    pub report: CorruptionReport,
    pub assigned_to: Option<UserSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportReceipt {
    pub reference_number: String,
    pub message: String,
}

/// What a reporter may learn when tracking a reference number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTracking {
    pub reference_number: String,
    pub status: ReportStatus,
    pub submitted_at: DateTime<Utc>,
}

impl From<&CorruptionReport> for ReportTracking {
    fn from(report: &CorruptionReport) -> Self {
        Self {
            reference_number: report.reference_number.clone(),
            status: report.status,
            submitted_at: report.submitted_at,
        }
    }
}

/// Staff triage update. `assigned_to_id: null` unassigns; an absent field leaves it alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportPatch {
    pub status: Option<ReportStatus>,
    pub priority: Option<ReportPriority>,
    #[serde(default, deserialize_with = "nullable")]
    pub assigned_to_id: Option<Option<UserId>>,
    #[serde(default, deserialize_with = "nullable")]
    pub internal_notes: Option<Option<String>>,
}

impl ReportPatch {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        if let Some(Some(notes)) = &self.internal_notes {
            validator.max_chars("internal_notes", notes, 5000);
        }
        validator.finish()
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportFilters {
    pub status: Option<ReportStatus>,
    pub priority: Option<ReportPriority>,
    pub category: Option<ReportCategory>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ReportFilters {
    pub fn page_request(&self) -> Result<PageRequest, ValidationErrors> {
        PageRequest::resolve(self.page, self.limit, 20, 100)
    }

    pub fn matches(&self, report: &CorruptionReport) -> bool {
        if self.status.is_some_and(|status| status != report.status) {
            return false;
        }
        if self.priority.is_some_and(|priority| priority != report.priority) {
            return false;
        }
        if self.category.is_some() && self.category != report.category {
            return false;
        }
        match self.search.as_deref().map(str::trim).filter(|term| !term.is_empty()) {
            Some(term) => {
                let needle = term.to_lowercase();
                report
                    .search_haystack()
                    .into_iter()
                    .flatten()
                    .any(|text| text.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}
