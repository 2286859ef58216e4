//! Citizen corruption reports: intake, public tracking and staff triage.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CorruptionReport, ReportCategory, ReportDetail, ReportFilters, ReportId, ReportPatch,
    ReportPriority, ReportReceipt, ReportStatus, ReportSubmission, ReportTracking,
};
pub use repository::ReportRepository;
pub use router::{report_admin_router, report_public_router};
pub use service::{ReportService, ReportServiceError};
