//! Admin landing page: headline counts and the latest activity.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use crate::accounts::{AccountService, AccountServiceError, StaffSession};
use crate::content::{CaseService, ContentServiceError, NewsService};
use crate::properties::{Property, PropertyService, PropertyServiceError};
use crate::reports::{CorruptionReport, ReportService, ReportServiceError, ReportStatus};
use crate::shared::http::ok;
use crate::shared::ApiError;
use crate::statistics::{RecoveryStatistic, StatisticsService, StatisticsServiceError};

const RECENT_ITEMS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewCounts {
    pub published_properties: usize,
    pub pending_interests: usize,
    pub new_reports: usize,
    pub published_cases: usize,
    pub published_news: usize,
    pub active_users: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub counts: OverviewCounts,
    pub recent_properties: Vec<Property>,
    pub recent_reports: Vec<CorruptionReport>,
    pub latest_statistic: Option<RecoveryStatistic>,
}

/// Read-only view across the feature services.
pub struct OverviewService {
    properties: Arc<PropertyService>,
    reports: Arc<ReportService>,
    cases: Arc<CaseService>,
    news: Arc<NewsService>,
    statistics: Arc<StatisticsService>,
    accounts: Arc<AccountService>,
}

impl OverviewService {
    pub fn new(
        properties: Arc<PropertyService>,
        reports: Arc<ReportService>,
        cases: Arc<CaseService>,
        news: Arc<NewsService>,
        statistics: Arc<StatisticsService>,
        accounts: Arc<AccountService>,
    ) -> Self {
        Self {
            properties,
            reports,
            cases,
            news,
            statistics,
            accounts,
        }
    }

    pub fn overview(&self) -> Result<Overview, OverviewError> {
        let counts = OverviewCounts {
            published_properties: self.properties.count_published()?,
            pending_interests: self.properties.count_pending_interests()?,
            new_reports: self.reports.count_with_status(ReportStatus::Received)?,
            published_cases: self.cases.count_published()?,
            published_news: self.news.count_published()?,
            active_users: self.accounts.count_active()?,
        };

        Ok(Overview {
            counts,
            recent_properties: self.properties.recent(RECENT_ITEMS)?,
            recent_reports: self.reports.recent_open(RECENT_ITEMS)?,
            latest_statistic: self.statistics.latest_yearly()?,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OverviewError {
    #[error(transparent)]
    Properties(#[from] PropertyServiceError),
    #[error(transparent)]
    Reports(#[from] ReportServiceError),
    #[error(transparent)]
    Content(#[from] ContentServiceError),
    #[error(transparent)]
    Statistics(#[from] StatisticsServiceError),
    #[error(transparent)]
    Accounts(#[from] AccountServiceError),
}

impl From<OverviewError> for ApiError {
    fn from(error: OverviewError) -> Self {
        match error {
            OverviewError::Properties(source) => source.into(),
            OverviewError::Reports(source) => source.into(),
            OverviewError::Content(source) => source.into(),
            OverviewError::Statistics(source) => source.into(),
            OverviewError::Accounts(source) => source.into(),
        }
    }
}

pub fn overview_router(service: Arc<OverviewService>) -> Router {
    Router::new()
        .route("/api/admin/overview", get(overview_handler))
        .with_state(service)
}

async fn overview_handler(
    State(service): State<Arc<OverviewService>>,
    _session: StaffSession,
) -> Result<Response, ApiError> {
    Ok(ok(service.overview()?))
}
