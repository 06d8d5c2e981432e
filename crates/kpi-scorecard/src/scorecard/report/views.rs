use super::super::domain::{Classification, DeliveryStatus};
use super::super::weights::WeightMap;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct ScoredRecordView {
    pub owner: String,
    pub subject: String,
    pub period: String,
    pub kpi_scores: BTreeMap<String, f64>,
    pub score: f64,
    pub status: DeliveryStatus,
    pub status_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeSummaryView {
    pub subject: String,
    pub weeks_below_target: usize,
    pub classification: Classification,
    pub classification_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationTally {
    pub classification: Classification,
    pub classification_label: &'static str,
    pub subjects: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeightingView {
    pub weights: WeightMap,
    pub raw_sum: f64,
    pub normalized: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScorecardReportSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub threshold: f64,
    pub weighting: WeightingView,
    pub weekly_performance: Vec<ScoredRecordView>,
    pub employee_summary: Vec<EmployeeSummaryView>,
    pub classification_tally: Vec<ClassificationTally>,
}
