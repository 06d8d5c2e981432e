use super::super::domain::{Classification, EmployeeSummary, ScoredRecord};
use super::super::engine::Scorecard;
use super::super::weights::Normalization;
use super::views::{
    ClassificationTally, EmployeeSummaryView, ScorecardReportSummary, ScoredRecordView,
    WeightingView,
};

/// A scorecard together with the configuration that produced it.
#[derive(Debug, Clone)]
pub struct ScorecardReport {
    pub owner: Option<String>,
    pub threshold: f64,
    pub weighting: Normalization,
    pub scorecard: Scorecard,
}

impl ScorecardReport {
    pub fn summary(&self) -> ScorecardReportSummary {
        let weekly_performance = self
            .scorecard
            .scored
            .iter()
            .map(ScoredRecord::to_view)
            .collect();

        let employee_summary = self
            .scorecard
            .summaries
            .iter()
            .map(EmployeeSummary::to_view)
            .collect();

        ScorecardReportSummary {
            owner: self.owner.clone(),
            threshold: self.threshold,
            weighting: WeightingView {
                weights: self.weighting.weights.clone(),
                raw_sum: self.weighting.raw_sum,
                normalized: self.weighting.normalized,
            },
            weekly_performance,
            employee_summary,
            classification_tally: self.classification_tally(),
        }
    }

    /// Subjects per classification, best to worst. Classifications nobody
    /// landed in are reported with a zero count.
    pub fn classification_tally(&self) -> Vec<ClassificationTally> {
        Classification::ordered()
            .into_iter()
            .map(|classification| ClassificationTally {
                classification,
                classification_label: classification.label(),
                subjects: self
                    .scorecard
                    .summaries
                    .iter()
                    .filter(|summary| summary.classification == classification)
                    .count(),
            })
            .collect()
    }

    pub fn subjects_with(&self, classification: Classification) -> Vec<&str> {
        self.scorecard
            .summaries
            .iter()
            .filter(|summary| summary.classification == classification)
            .map(|summary| summary.subject.as_str())
            .collect()
    }
}

impl ScoredRecord {
    pub fn to_view(&self) -> ScoredRecordView {
        ScoredRecordView {
            owner: self.record.owner.clone(),
            subject: self.record.subject.clone(),
            period: self.record.period.clone(),
            kpi_scores: self.record.kpi_scores.clone(),
            score: self.score,
            status: self.status,
            status_label: self.status.label(),
        }
    }
}

impl EmployeeSummary {
    pub fn to_view(&self) -> EmployeeSummaryView {
        EmployeeSummaryView {
            subject: self.subject.clone(),
            weeks_below_target: self.below_count,
            classification: self.classification,
            classification_label: self.classification.label(),
        }
    }
}
