use super::domain::{Record, ScoringError};
use super::engine::summarize;
use super::report::ScorecardReport;
use super::weights::WeightMap;
use tracing::{debug, warn};

/// Loaded records plus the owner-selection glue that sits in front of the
/// score engine.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    records: Vec<Record>,
}

impl Dashboard {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Distinct owners in the order they first appear.
    pub fn owners(&self) -> Vec<&str> {
        let mut owners: Vec<&str> = Vec::new();
        for record in &self.records {
            if !owners.contains(&record.owner.as_str()) {
                owners.push(&record.owner);
            }
        }
        owners
    }

    /// Distinct subjects reporting to `owner`, in first-appearance order.
    pub fn subjects_for(&self, owner: &str) -> Vec<&str> {
        let mut subjects: Vec<&str> = Vec::new();
        for record in self.records.iter().filter(|r| r.owner == owner) {
            if !subjects.contains(&record.subject.as_str()) {
                subjects.push(&record.subject);
            }
        }
        subjects
    }

    pub fn records_for(&self, owner: Option<&str>) -> Vec<Record> {
        match owner {
            Some(owner) => self
                .records
                .iter()
                .filter(|record| record.owner == owner)
                .cloned()
                .collect(),
            None => self.records.clone(),
        }
    }

    /// Normalizes `weights`, narrows the records to `owner` when one is
    /// selected and scores what remains. An owner without records yields an
    /// empty report.
    pub fn evaluate(
        &self,
        owner: Option<&str>,
        weights: &WeightMap,
        threshold: f64,
    ) -> Result<ScorecardReport, ScoringError> {
        if !threshold.is_finite() {
            return Err(ScoringError::invalid(format!(
                "threshold must be a finite number, got {threshold}"
            )));
        }

        let weighting = weights.normalize()?;
        if weighting.normalized {
            warn!(
                raw_sum = weighting.raw_sum,
                factor = weighting.factor,
                "weights do not sum to 1; normalizing"
            );
        }

        let records = self.records_for(owner);
        if records.is_empty() {
            debug!(owner = owner.unwrap_or("<all>"), "no records selected");
        }

        let scorecard = summarize(&records, &weighting.weights, threshold)?;
        debug!(
            records = scorecard.scored.len(),
            subjects = scorecard.summaries.len(),
            "scorecard computed"
        );

        Ok(ScorecardReport {
            owner: owner.map(str::to_string),
            threshold,
            weighting,
            scorecard,
        })
    }
}
