//! Aggregation behind the public dashboard. Pure functions over stored rows.

use serde::Serialize;

use super::domain::{Breakdown, PeriodType, RecoveryStatistic};
use crate::shared::calculate_percentage;

/// Number of most recent periods the dashboard looks at.
pub const DASHBOARD_WINDOW: usize = 10;

const CASE_ESTIMATE_DIVISOR: f64 = 1e8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub summary: DashboardSummary,
    pub trend_data: Vec<TrendPoint>,
    pub sector_breakdown: Vec<SectorShare>,
    pub region_breakdown: Vec<RegionRecovery>,
    pub prosecution_outcomes: Vec<ProsecutionOutcome>,
}

/// Totals over the yearly rows in the window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_recovered: f64,
    pub funds_to_treasury: f64,
    pub properties_seized: i64,
    pub properties_sold: i64,
    pub conviction_rate: u32,
    pub cases_resolved: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub period: String,
    pub recovered: f64,
    pub treasury: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorShare {
    pub name: String,
    pub value: f64,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRecovery {
    pub region: String,
    pub recovered: f64,
    /// Rough case count estimate: one case per 100 million recovered.
    pub cases: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProsecutionOutcome {
    pub period: String,
    pub prosecutions: i64,
    pub convictions: i64,
    pub acquittals: i64,
}

/// Most recent rows first, capped at [`DASHBOARD_WINDOW`].
pub fn recent_window(mut rows: Vec<RecoveryStatistic>) -> Vec<RecoveryStatistic> {
    rows.sort_by(|a, b| b.period.cmp(&a.period));
    rows.truncate(DASHBOARD_WINDOW);
    rows
}

/// Builds the dashboard from every stored row.
///
/// The summary and breakdowns always use the yearly rows among the most recent
/// periods. `period_type` narrows only the trend and prosecution series.
pub fn compute(rows: Vec<RecoveryStatistic>, period_type: Option<PeriodType>) -> DashboardStats {
    let series_rows = match period_type {
        Some(kind) => recent_window(
            rows.iter()
                .filter(|row| row.period_type == kind)
                .cloned()
                .collect(),
        ),
        None => recent_window(rows.clone()),
    };
    let window = recent_window(rows);
    let yearly: Vec<&RecoveryStatistic> = window
        .iter()
        .filter(|row| row.period_type == PeriodType::Yearly)
        .collect();

    let latest_yearly = yearly.first().copied();

    let mut ascending = series_rows;
    ascending.reverse();

    DashboardStats {
        summary: summarize(&yearly),
        trend_data: ascending
            .iter()
            .map(|row| TrendPoint {
                period: row.period.clone(),
                recovered: row.total_recovered,
                treasury: row.funds_to_treasury.unwrap_or(0.0),
            })
            .collect(),
        sector_breakdown: latest_yearly
            .and_then(|row| row.sector_breakdown.as_ref())
            .map(sector_shares)
            .unwrap_or_default(),
        region_breakdown: latest_yearly
            .and_then(|row| row.region_breakdown.as_ref())
            .map(region_recoveries)
            .unwrap_or_default(),
        prosecution_outcomes: ascending
            .iter()
            .map(|row| ProsecutionOutcome {
                period: row.period.clone(),
                prosecutions: row.prosecutions.unwrap_or(0),
                convictions: row.convictions.unwrap_or(0),
                acquittals: row.acquittals.unwrap_or(0),
            })
            .collect(),
    }
}

fn summarize(yearly: &[&RecoveryStatistic]) -> DashboardSummary {
    let mut summary = DashboardSummary::default();
    let mut convictions = 0_i64;
    let mut prosecutions = 0_i64;

    for row in yearly {
        summary.total_recovered += row.total_recovered;
        summary.funds_to_treasury += row.funds_to_treasury.unwrap_or(0.0);
        summary.properties_seized += row.properties_seized.unwrap_or(0);
        summary.properties_sold += row.properties_auctioned.unwrap_or(0);
        summary.cases_resolved += row.cases_closed.unwrap_or(0);
        convictions += row.convictions.unwrap_or(0);
        prosecutions += row.prosecutions.unwrap_or(0);
    }

    summary.conviction_rate = if prosecutions > 0 {
        calculate_percentage(convictions as f64, prosecutions as f64)
    } else {
        0
    };
    summary
}

fn sector_shares(breakdown: &Breakdown) -> Vec<SectorShare> {
    let total: f64 = breakdown.values().sum();
    breakdown
        .iter()
        .map(|(name, value)| SectorShare {
            name: name.clone(),
            value: *value,
            percentage: calculate_percentage(*value, total),
        })
        .collect()
}

fn region_recoveries(breakdown: &Breakdown) -> Vec<RegionRecovery> {
    breakdown
        .iter()
        .map(|(region, recovered)| RegionRecovery {
            region: region.clone(),
            recovered: *recovered,
            cases: (recovered / CASE_ESTIMATE_DIVISOR).floor().max(0.0) as u64,
        })
        .collect()
}
