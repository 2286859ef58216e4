use crate::infra::parse_period_type;
use acc_portal::error::AppError;
use acc_portal::memory::MemoryStatisticsRepository;
use acc_portal::seed::sample_statistics;
use acc_portal::statistics::{DashboardStats, ImportSummary, PeriodType, StatisticsService};
use clap::Args;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DashboardArgs {
    /// Recovery statistics CSV export (same columns as the admin import endpoint).
    /// Defaults to the built-in sample figures.
    #[arg(long)]
    pub(crate) statistics_csv: Option<PathBuf>,
    /// Restrict the trend and prosecution series to one period type
    #[arg(long, value_parser = parse_period_type)]
    pub(crate) period_type: Option<PeriodType>,
    /// Print a readable summary instead of JSON
    #[arg(long)]
    pub(crate) text: bool,
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let DashboardArgs {
        statistics_csv,
        period_type,
        text,
    } = args;

    let (summary, stats) = match &statistics_csv {
        Some(path) => load_dashboard(std::fs::File::open(path)?, period_type)?,
        None => sample_dashboard(period_type)?,
    };

    if text {
        render_dashboard(statistics_csv.as_deref(), &summary, &stats);
    } else {
        serde_json::to_writer_pretty(std::io::stdout().lock(), &stats)
            .map_err(std::io::Error::from)?;
        println!();
    }
    Ok(())
}

fn sample_dashboard(
    period_type: Option<PeriodType>,
) -> Result<(ImportSummary, DashboardStats), AppError> {
    let service = StatisticsService::new(Arc::new(MemoryStatisticsRepository::default()));
    let mut summary = ImportSummary::default();
    for draft in sample_statistics() {
        service.create(draft)?;
        summary.imported += 1;
    }
    let stats = service.dashboard(period_type)?;
    Ok((summary, stats))
}

pub(crate) fn load_dashboard<R: Read>(
    reader: R,
    period_type: Option<PeriodType>,
) -> Result<(ImportSummary, DashboardStats), AppError> {
    let service = StatisticsService::new(Arc::new(MemoryStatisticsRepository::default()));
    let summary = service.import_csv(reader)?;
    let stats = service.dashboard(period_type)?;
    Ok((summary, stats))
}

fn leones(amount: f64) -> String {
    format!("Le {:.0}", amount)
}

pub(crate) fn render_dashboard(
    source: Option<&Path>,
    summary: &ImportSummary,
    stats: &DashboardStats,
) {
    println!("Asset recovery dashboard");
    match source {
        Some(path) => println!(
            "Source: {} ({} rows imported, {} skipped)",
            path.display(),
            summary.imported,
            summary.skipped.len()
        ),
        None => println!("Source: built-in sample figures ({} rows)", summary.imported),
    }
    for skipped in &summary.skipped {
        println!(
            "  line {} ({}): {}",
            skipped.line, skipped.period, skipped.reason
        );
    }

    let headline = &stats.summary;
    println!("\nSummary (yearly periods)");
    println!("- Total recovered: {}", leones(headline.total_recovered));
    println!("- Funds to treasury: {}", leones(headline.funds_to_treasury));
    println!(
        "- Properties seized / sold: {} / {}",
        headline.properties_seized, headline.properties_sold
    );
    println!("- Cases resolved: {}", headline.cases_resolved);
    println!("- Conviction rate: {}%", headline.conviction_rate);

    if stats.trend_data.is_empty() {
        println!("\nRecovery trend: no periods");
    } else {
        println!("\nRecovery trend");
        for point in &stats.trend_data {
            println!(
                "- {}: recovered {}, treasury {}",
                point.period,
                leones(point.recovered),
                leones(point.treasury)
            );
        }
    }

    if !stats.sector_breakdown.is_empty() {
        println!("\nBy sector");
        for sector in &stats.sector_breakdown {
            println!(
                "- {}: {} ({}%)",
                sector.name,
                leones(sector.value),
                sector.percentage
            );
        }
    }

    if !stats.region_breakdown.is_empty() {
        println!("\nBy region");
        for region in &stats.region_breakdown {
            println!(
                "- {}: {} (~{} cases)",
                region.region,
                leones(region.recovered),
                region.cases
            );
        }
    }

    if !stats.prosecution_outcomes.is_empty() {
        println!("\nProsecution outcomes");
        for outcome in &stats.prosecution_outcomes {
            println!(
                "- {}: {} prosecutions, {} convictions, {} acquittals",
                outcome.period, outcome.prosecutions, outcome.convictions, outcome.acquittals
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const EXPORT: &str = "period,period_type,total_recovered,funds_to_treasury,prosecutions,convictions,acquittals,sector_breakdown\n\
2023,yearly,45000000000,40000000000,89,78,11,Health=8000000000;Education=7000000000\n\
2024-Q1,quarterly,12000000000,10000000000,25,22,3,\n\
2023,yearly,1,1,1,1,0,\n";

    #[test]
    fn load_dashboard_reports_duplicates_and_summarises_yearly_rows() {
        let (summary, stats) =
            load_dashboard(Cursor::new(EXPORT), None).expect("dashboard loads");

        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].line, 4);
        assert_eq!(stats.summary.total_recovered, 45_000_000_000.0);
        assert_eq!(stats.summary.conviction_rate, 88);
        assert_eq!(stats.sector_breakdown.len(), 2);
    }

    #[test]
    fn sample_figures_load_without_a_file() {
        let (summary, stats) = sample_dashboard(None).expect("samples load");
        assert_eq!(summary.imported, 2);
        assert_eq!(stats.trend_data.len(), 2);
        assert_eq!(stats.trend_data[0].period, "2023");
        assert_eq!(stats.region_breakdown.len(), 6);
    }

    #[test]
    fn period_type_narrows_the_trend_series() {
        let (_, stats) = load_dashboard(Cursor::new(EXPORT), Some(PeriodType::Quarterly))
            .expect("dashboard loads");

        assert_eq!(stats.trend_data.len(), 1);
        assert_eq!(stats.trend_data[0].period, "2024-Q1");
        assert_eq!(stats.summary.total_recovered, 45_000_000_000.0);
    }
}
