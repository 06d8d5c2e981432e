use chrono::NaiveDate;
use clap::ValueEnum;
use kpi_scorecard::config::parse_threshold;
use kpi_scorecard::scorecard::weights::parse_pair;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_weight(raw: &str) -> Result<(String, f64), String> {
    parse_pair(raw).map_err(|err| err.to_string())
}

pub(crate) fn parse_threshold_arg(raw: &str) -> Result<f64, String> {
    parse_threshold(raw).map_err(|_| format!("threshold must be a finite number, got '{raw}'"))
}
