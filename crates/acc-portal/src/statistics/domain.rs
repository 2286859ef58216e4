use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::identifiers::entity_id;
use crate::shared::{ValidationErrors, Validator};

entity_id!(StatisticId);

/// Named amounts, e.g. recoveries per sector or per region.
pub type Breakdown = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Monthly,
    Quarterly,
    Yearly,
}

impl PeriodType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PeriodType::Monthly => "monthly",
            PeriodType::Quarterly => "quarterly",
            PeriodType::Yearly => "yearly",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryStatistic {
    pub id: StatisticId,
    pub period: String,
    pub period_type: PeriodType,
    pub total_recovered: f64,
    pub cash_recovered: Option<f64>,
    pub assets_recovered: Option<f64>,
    pub funds_to_treasury: Option<f64>,
    pub cases_opened: Option<i64>,
    pub cases_closed: Option<i64>,
    pub prosecutions: Option<i64>,
    pub convictions: Option<i64>,
    pub acquittals: Option<i64>,
    pub properties_seized: Option<i64>,
    pub properties_auctioned: Option<i64>,
    pub sector_breakdown: Option<Breakdown>,
    pub region_breakdown: Option<Breakdown>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecoveryStatistic {
    pub fn from_draft(draft: StatisticDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: StatisticId::generate(),
            period: draft.period.trim().to_string(),
            period_type: draft.period_type,
            total_recovered: draft.total_recovered,
            cash_recovered: draft.cash_recovered,
            assets_recovered: draft.assets_recovered,
            funds_to_treasury: draft.funds_to_treasury,
            cases_opened: draft.cases_opened,
            cases_closed: draft.cases_closed,
            prosecutions: draft.prosecutions,
            convictions: draft.convictions,
            acquittals: draft.acquittals,
            properties_seized: draft.properties_seized,
            properties_auctioned: draft.properties_auctioned,
            sector_breakdown: draft.sector_breakdown,
            region_breakdown: draft.region_breakdown,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn same_period(&self, period: &str, period_type: PeriodType) -> bool {
        self.period == period && self.period_type == period_type
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticDraft {
    pub period: String,
    pub period_type: PeriodType,
    pub total_recovered: f64,
    #[serde(default)]
    pub cash_recovered: Option<f64>,
    #[serde(default)]
    pub assets_recovered: Option<f64>,
    #[serde(default)]
    pub funds_to_treasury: Option<f64>,
    #[serde(default)]
    pub cases_opened: Option<i64>,
    #[serde(default)]
    pub cases_closed: Option<i64>,
    #[serde(default)]
    pub prosecutions: Option<i64>,
    #[serde(default)]
    pub convictions: Option<i64>,
    #[serde(default)]
    pub acquittals: Option<i64>,
    #[serde(default)]
    pub properties_seized: Option<i64>,
    #[serde(default)]
    pub properties_auctioned: Option<i64>,
    #[serde(default)]
    pub sector_breakdown: Option<Breakdown>,
    #[serde(default)]
    pub region_breakdown: Option<Breakdown>,
}

impl StatisticDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        validator.chars_between("period", self.period.trim(), 4, 10);
        validator.non_negative("total_recovered", Some(self.total_recovered));
        check_amounts(
            &mut validator,
            &[
                ("cash_recovered", self.cash_recovered),
                ("assets_recovered", self.assets_recovered),
                ("funds_to_treasury", self.funds_to_treasury),
            ],
        );
        check_counts(
            &mut validator,
            &[
                ("cases_opened", self.cases_opened),
                ("cases_closed", self.cases_closed),
                ("prosecutions", self.prosecutions),
                ("convictions", self.convictions),
                ("acquittals", self.acquittals),
                ("properties_seized", self.properties_seized),
                ("properties_auctioned", self.properties_auctioned),
            ],
        );
        check_breakdown(&mut validator, "sector_breakdown", self.sector_breakdown.as_ref());
        check_breakdown(&mut validator, "region_breakdown", self.region_breakdown.as_ref());
        validator.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatisticPatch {
    pub period: Option<String>,
    pub period_type: Option<PeriodType>,
    pub total_recovered: Option<f64>,
    pub cash_recovered: Option<f64>,
    pub assets_recovered: Option<f64>,
    pub funds_to_treasury: Option<f64>,
    pub cases_opened: Option<i64>,
    pub cases_closed: Option<i64>,
    pub prosecutions: Option<i64>,
    pub convictions: Option<i64>,
    pub acquittals: Option<i64>,
    pub properties_seized: Option<i64>,
    pub properties_auctioned: Option<i64>,
    pub sector_breakdown: Option<Breakdown>,
    pub region_breakdown: Option<Breakdown>,
}

impl StatisticPatch {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        if let Some(period) = &self.period {
            validator.chars_between("period", period.trim(), 4, 10);
        }
        check_amounts(
            &mut validator,
            &[
                ("total_recovered", self.total_recovered),
                ("cash_recovered", self.cash_recovered),
                ("assets_recovered", self.assets_recovered),
                ("funds_to_treasury", self.funds_to_treasury),
            ],
        );
        check_counts(
            &mut validator,
            &[
                ("cases_opened", self.cases_opened),
                ("cases_closed", self.cases_closed),
                ("prosecutions", self.prosecutions),
                ("convictions", self.convictions),
                ("acquittals", self.acquittals),
                ("properties_seized", self.properties_seized),
                ("properties_auctioned", self.properties_auctioned),
            ],
        );
        check_breakdown(&mut validator, "sector_breakdown", self.sector_breakdown.as_ref());
        check_breakdown(&mut validator, "region_breakdown", self.region_breakdown.as_ref());
        validator.finish()
    }

    pub fn apply(self, statistic: &mut RecoveryStatistic, now: DateTime<Utc>) {
        if let Some(period) = self.period {
            statistic.period = period.trim().to_string();
        }
        if let Some(period_type) = self.period_type {
            statistic.period_type = period_type;
        }
        if let Some(total) = self.total_recovered {
            statistic.total_recovered = total;
        }
        replace_if_some(&mut statistic.cash_recovered, self.cash_recovered);
        replace_if_some(&mut statistic.assets_recovered, self.assets_recovered);
        replace_if_some(&mut statistic.funds_to_treasury, self.funds_to_treasury);
        replace_if_some(&mut statistic.cases_opened, self.cases_opened);
        replace_if_some(&mut statistic.cases_closed, self.cases_closed);
        replace_if_some(&mut statistic.prosecutions, self.prosecutions);
        replace_if_some(&mut statistic.convictions, self.convictions);
        replace_if_some(&mut statistic.acquittals, self.acquittals);
        replace_if_some(&mut statistic.properties_seized, self.properties_seized);
        replace_if_some(&mut statistic.properties_auctioned, self.properties_auctioned);
        replace_if_some(&mut statistic.sector_breakdown, self.sector_breakdown);
        replace_if_some(&mut statistic.region_breakdown, self.region_breakdown);
        statistic.updated_at = now;
    }
}

/// Query string of the public dashboard endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DashboardQuery {
    pub period_type: Option<PeriodType>,
}

fn replace_if_some<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

fn check_amounts(validator: &mut Validator, amounts: &[(&str, Option<f64>)]) {
    for (field, value) in amounts {
        validator.non_negative(field, *value);
    }
}

fn check_counts(validator: &mut Validator, counts: &[(&str, Option<i64>)]) {
    for (field, value) in counts {
        if value.is_some_and(|count| count < 0) {
            validator.fail(field, "Count must be zero or more");
        }
    }
}

fn check_breakdown(validator: &mut Validator, field: &str, breakdown: Option<&Breakdown>) {
    let Some(breakdown) = breakdown else {
        return;
    };
    if breakdown
        .iter()
        .any(|(name, amount)| name.trim().is_empty() || !amount.is_finite() || *amount < 0.0)
    {
        validator.fail(field, "Breakdown entries need a name and a non-negative amount");
    }
}
