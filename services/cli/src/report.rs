use crate::infra::{parse_date, parse_threshold_arg, parse_weight, OutputFormat};
use chrono::{Local, NaiveDate};
use clap::Args;
use kpi_scorecard::config::AppConfig;
use kpi_scorecard::error::AppError;
use kpi_scorecard::import::RecordImporter;
use kpi_scorecard::scorecard::report::views::ScorecardReportSummary;
use kpi_scorecard::scorecard::{Dashboard, WeightMap};
use kpi_scorecard::telemetry;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// KPI export with Manager, Employee and Week columns plus one column per KPI
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Only score employees reporting to this manager
    #[arg(long)]
    pub(crate) manager: Option<String>,
    /// Delivery threshold (overrides APP_THRESHOLD)
    #[arg(long, value_parser = parse_threshold_arg)]
    pub(crate) threshold: Option<f64>,
    /// KPI weight as NAME=WEIGHT; repeat to override several KPIs
    #[arg(long = "weight", value_parser = parse_weight)]
    pub(crate) weights: Vec<(String, f64)>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
    /// Evaluation date printed with the report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct ManagersArgs {
    /// KPI export to inspect
    #[arg(long)]
    pub(crate) input: PathBuf,
}

#[derive(Debug, Serialize)]
struct ReportOutput {
    as_of: NaiveDate,
    source: String,
    #[serde(flatten)]
    summary: ScorecardReportSummary,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        input,
        manager,
        threshold,
        weights,
        format,
        as_of,
    } = args;

    let mut config = AppConfig::load()?;
    if let Some(threshold) = threshold {
        config.scoring.threshold = threshold;
    }
    for (kpi, weight) in weights {
        config.scoring.weights.insert(kpi, weight);
    }

    config.telemetry.ansi = format == OutputFormat::Text && io::stderr().is_terminal();
    telemetry::init(&config.telemetry)?;

    let records = RecordImporter::from_path(&input)?;
    info!(
        environment = ?config.environment,
        records = records.len(),
        path = %input.display(),
        "loaded KPI export"
    );

    let dashboard = Dashboard::new(records);
    if let Some(manager) = manager.as_deref() {
        if !dashboard.owners().contains(&manager) {
            warn!(manager, "no records found for manager");
        }
    }

    let report = dashboard.evaluate(
        manager.as_deref(),
        &config.scoring.weights,
        config.scoring.threshold,
    )?;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let summary = report.summary();

    match format {
        OutputFormat::Text => render_text(&mut io::stdout().lock(), &summary, as_of)?,
        OutputFormat::Json => {
            let output = ReportOutput {
                as_of,
                source: input.display().to_string(),
                summary,
            };
            let json = serde_json::to_string_pretty(&output).map_err(io::Error::from)?;
            println!("{json}");
        }
    }

    Ok(())
}

pub(crate) fn run_managers(args: ManagersArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    config.telemetry.ansi = io::stderr().is_terminal();
    telemetry::init(&config.telemetry)?;

    let dashboard = Dashboard::new(RecordImporter::from_path(&args.input)?);
    let owners = dashboard.owners();
    if owners.is_empty() {
        println!("No managers found in {}", args.input.display());
        return Ok(());
    }

    for owner in owners {
        println!("{}: {}", owner, dashboard.subjects_for(owner).join(", "));
    }
    Ok(())
}

fn render_text<W: Write>(
    out: &mut W,
    summary: &ScorecardReportSummary,
    as_of: NaiveDate,
) -> io::Result<()> {
    writeln!(out, "Performance indicator scorecard")?;
    writeln!(
        out,
        "Manager: {} (evaluated {})",
        summary.owner.as_deref().unwrap_or("all managers"),
        as_of
    )?;
    writeln!(
        out,
        "Threshold: {:.2} | Weights: {}",
        summary.threshold,
        format_weights(&summary.weighting.weights)
    )?;
    if summary.weighting.normalized {
        writeln!(
            out,
            "Note: configured weights summed to {:.2} and were normalized",
            summary.weighting.raw_sum
        )?;
    }

    if summary.weekly_performance.is_empty() {
        writeln!(out, "\nWeekly performance: no records")?;
        return Ok(());
    }

    writeln!(out, "\nWeekly performance")?;
    for row in &summary.weekly_performance {
        writeln!(
            out,
            "- {} | {} | score {:.2} | {}",
            row.subject, row.period, row.score, row.status_label
        )?;
    }

    writeln!(out, "\nEmployee summary")?;
    for employee in &summary.employee_summary {
        writeln!(
            out,
            "- {}: {} week(s) below target, {}",
            employee.subject, employee.weeks_below_target, employee.classification_label
        )?;
    }

    writeln!(out, "\nClassification tally")?;
    for entry in &summary.classification_tally {
        writeln!(out, "- {}: {}", entry.classification_label, entry.subjects)?;
    }

    Ok(())
}

fn format_weights(weights: &WeightMap) -> String {
    weights
        .iter()
        .map(|(kpi, weight)| format!("{kpi} {weight:.2}"))
        .collect::<Vec<_>>()
        .join(", ")
}
