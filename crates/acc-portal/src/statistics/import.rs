//! CSV bulk load for recovery statistics.
//!
//! Columns match the JSON field names. Breakdowns are written as
//! `Health=1200;Mining=800`. Empty cells are treated as missing values.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{Breakdown, PeriodType, StatisticDraft};
use crate::shared::RepositoryError;

#[derive(Debug)]
pub enum StatisticsImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Storage(RepositoryError),
}

impl std::fmt::Display for StatisticsImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatisticsImportError::Io(err) => write!(f, "failed to read statistics file: {}", err),
            StatisticsImportError::Csv(err) => write!(f, "invalid statistics CSV data: {}", err),
            StatisticsImportError::Storage(err) => {
                write!(f, "could not store imported statistics: {}", err)
            }
        }
    }
}

impl std::error::Error for StatisticsImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StatisticsImportError::Io(err) => Some(err),
            StatisticsImportError::Csv(err) => Some(err),
            StatisticsImportError::Storage(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StatisticsImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for StatisticsImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<RepositoryError> for StatisticsImportError {
    fn from(err: RepositoryError) -> Self {
        Self::Storage(err)
    }
}

/// Outcome of one import run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    /// 1-based line in the file, header included.
    pub line: u64,
    pub period: String,
    pub reason: String,
}

/// A parsed row, or the reason it cannot become a draft.
#[derive(Debug)]
pub(crate) struct ParsedRow {
    pub(crate) line: u64,
    pub(crate) period: String,
    pub(crate) draft: Result<StatisticDraft, String>,
}

pub(crate) fn open<P: AsRef<Path>>(path: P) -> Result<std::fs::File, StatisticsImportError> {
    Ok(std::fs::File::open(path)?)
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ParsedRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    // Blank lines are skipped by the reader, so lines come from each record's position.
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |position| position.line());
        let row: StatisticRow = record.deserialize(Some(&headers))?;
        let period = row.period.clone();
        rows.push(ParsedRow {
            line,
            period,
            draft: row.into_draft(),
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct StatisticRow {
    period: String,
    period_type: String,
    total_recovered: f64,
    #[serde(default)]
    cash_recovered: Option<f64>,
    #[serde(default)]
    assets_recovered: Option<f64>,
    #[serde(default)]
    funds_to_treasury: Option<f64>,
    #[serde(default)]
    cases_opened: Option<i64>,
    #[serde(default)]
    cases_closed: Option<i64>,
    #[serde(default)]
    prosecutions: Option<i64>,
    #[serde(default)]
    convictions: Option<i64>,
    #[serde(default)]
    acquittals: Option<i64>,
    #[serde(default)]
    properties_seized: Option<i64>,
    #[serde(default)]
    properties_auctioned: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sector_breakdown: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    region_breakdown: Option<String>,
}

impl StatisticRow {
    fn into_draft(self) -> Result<StatisticDraft, String> {
        let period_type = PeriodType::parse(&self.period_type)
            .ok_or_else(|| format!("unknown period type '{}'", self.period_type))?;
        let sector_breakdown = self
            .sector_breakdown
            .as_deref()
            .map(parse_breakdown)
            .transpose()?;
        let region_breakdown = self
            .region_breakdown
            .as_deref()
            .map(parse_breakdown)
            .transpose()?;

        Ok(StatisticDraft {
            period: self.period,
            period_type,
            total_recovered: self.total_recovered,
            cash_recovered: self.cash_recovered,
            assets_recovered: self.assets_recovered,
            funds_to_treasury: self.funds_to_treasury,
            cases_opened: self.cases_opened,
            cases_closed: self.cases_closed,
            prosecutions: self.prosecutions,
            convictions: self.convictions,
            acquittals: self.acquittals,
            properties_seized: self.properties_seized,
            properties_auctioned: self.properties_auctioned,
            sector_breakdown,
            region_breakdown,
        })
    }
}

/// `Name=amount;Other=amount`, whitespace around either side ignored.
pub(crate) fn parse_breakdown(raw: &str) -> Result<Breakdown, String> {
    let mut breakdown = Breakdown::new();
    for entry in raw.split(';').map(str::trim).filter(|entry| !entry.is_empty()) {
        let (name, amount) = entry
            .split_once('=')
            .ok_or_else(|| format!("breakdown entry '{entry}' is missing '='"))?;
        let amount: f64 = amount
            .trim()
            .parse()
            .map_err(|_| format!("breakdown amount '{}' is not a number", amount.trim()))?;
        breakdown.insert(name.trim().to_string(), amount);
    }
    Ok(breakdown)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
