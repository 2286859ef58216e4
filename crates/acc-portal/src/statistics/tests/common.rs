use std::sync::Arc;

use axum::Router;

use crate::memory::MemoryStatisticsRepository;
use crate::statistics::{
    statistics_admin_router, statistics_public_router, Breakdown, PeriodType, StatisticDraft,
    StatisticsService,
};
use crate::testing::with_sessions;

pub(super) fn service() -> Arc<StatisticsService> {
    Arc::new(StatisticsService::new(Arc::new(
        MemoryStatisticsRepository::default(),
    )))
}

pub(super) fn yearly(period: &str, total: f64) -> StatisticDraft {
    StatisticDraft {
        period: period.to_string(),
        period_type: PeriodType::Yearly,
        total_recovered: total,
        cash_recovered: Some(total * 0.6),
        assets_recovered: Some(total * 0.4),
        funds_to_treasury: Some(total * 0.8),
        cases_opened: Some(156),
        cases_closed: Some(89),
        prosecutions: Some(67),
        convictions: Some(52),
        acquittals: Some(8),
        properties_seized: Some(23),
        properties_auctioned: Some(15),
        sector_breakdown: Some(Breakdown::from([
            ("Health".to_string(), total * 0.25),
            ("Mining".to_string(), total * 0.75),
        ])),
        region_breakdown: Some(Breakdown::from([("Bo".to_string(), total)])),
    }
}

pub(super) fn router(service: Arc<StatisticsService>) -> Router {
    with_sessions(statistics_public_router(service.clone()).merge(statistics_admin_router(service)))
}
