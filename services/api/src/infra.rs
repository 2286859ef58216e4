use acc_portal::statistics::PeriodType;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_period_type(raw: &str) -> Result<PeriodType, String> {
    PeriodType::parse(raw)
        .ok_or_else(|| format!("unknown period type '{raw}' (expected yearly, quarterly or monthly)"))
}
