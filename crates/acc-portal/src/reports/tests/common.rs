use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use chrono::{NaiveDate, Utc};

use crate::accounts::{Role, User, UserId, UserRepository};
use crate::memory::{MemoryReportRepository, MemorySettingsRepository, MemoryUserRepository};
use crate::rate_limit::FixedWindowLimiter;
use crate::reports::{
    report_admin_router, report_public_router, ReportCategory, ReportService, ReportSubmission,
};
use crate::settings::SettingsService;
use crate::testing::with_sessions;

pub(super) const INVESTIGATOR_ID: &str = "investigator-1";

pub(super) struct Harness {
    pub(super) service: Arc<ReportService>,
    pub(super) settings: Arc<SettingsService>,
    pub(super) reports: MemoryReportRepository,
}

pub(super) fn harness() -> Harness {
    let users = MemoryUserRepository::default();
    users
        .insert(User {
            id: UserId::from(INVESTIGATOR_ID),
            name: "Musa Koroma".to_string(),
            email: "m.koroma@acc.gov.sl".to_string(),
            password_hash: "$2b$04$placeholder".to_string(),
            role: Role::Editor,
            is_active: true,
            last_login_at: None,
            created_at: Utc::now(),
        })
        .expect("investigator stored");

    let settings = Arc::new(SettingsService::new(Arc::new(
        MemorySettingsRepository::default(),
    )));
    let reports = MemoryReportRepository::default();
    let service = Arc::new(ReportService::new(
        Arc::new(reports.clone()),
        Arc::new(users),
        settings.clone(),
    ));
    Harness {
        service,
        settings,
        reports,
    }
}

pub(super) fn submission() -> ReportSubmission {
    ReportSubmission {
        reporter_name: Some("Concerned Citizen".to_string()),
        reporter_email: Some("citizen@example.sl".to_string()),
        reporter_phone: Some("+23276000111".to_string()),
        is_anonymous: true,
        incident_date: NaiveDate::from_ymd_opt(2024, 3, 14),
        incident_location: Some("Bo Government Hospital".to_string()),
        region: Some("Bo".to_string()),
        accused_name: Some("Procurement Officer".to_string()),
        accused_position: Some("Head of Procurement".to_string()),
        accused_organization: Some("Ministry of Health".to_string()),
        category: Some(ReportCategory::ProcurementFraud),
        description: "Medical supplies were invoiced at triple the market price and the \
                      difference was paid into a private account."
            .to_string(),
        estimated_amount: Some(150_000_000.0),
        has_evidence: true,
        evidence_description: Some("Copies of invoices".to_string()),
    }
}

pub(super) fn router(service: Arc<ReportService>, max_requests: u32) -> Router {
    let limiter = Arc::new(FixedWindowLimiter::new(max_requests, Duration::from_secs(60)));
    with_sessions(report_public_router(service.clone(), limiter).merge(report_admin_router(service)))
}
