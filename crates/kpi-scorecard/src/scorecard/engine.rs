use super::domain::{
    Classification, DeliveryStatus, EmployeeSummary, Record, ScoredRecord, ScoringError,
};
use super::weights::WeightMap;
use serde::Serialize;
use std::collections::HashMap;

/// Delivery cutoff used when the caller does not configure one.
pub const DEFAULT_THRESHOLD: f64 = 70.0;

/// Periods below threshold at which a subject is a recurring deviation.
pub const RECURRING_DEVIATION_MIN_PERIODS: usize = 5;

/// Periods below threshold at which a subject is an occasional deviation.
pub const OCCASIONAL_DEVIATION_MIN_PERIODS: usize = 1;

/// Output of [`summarize`]: every record scored in input order, plus one
/// summary per subject in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scorecard {
    pub scored: Vec<ScoredRecord>,
    pub summaries: Vec<EmployeeSummary>,
}

/// Weighted sum of the record's KPI scores over the KPIs named in `weights`.
///
/// KPIs the record carries but `weights` does not name contribute nothing. A
/// weighted KPI missing from the record is an error, as is a total that is
/// not finite (an infinite KPI value, even under a zero weight).
pub fn score(record: &Record, weights: &WeightMap) -> Result<f64, ScoringError> {
    let mut total = 0.0;
    for (kpi, weight) in weights.iter() {
        let value = record
            .kpi_score(kpi)
            .ok_or_else(|| ScoringError::MissingKpi {
                kpi: kpi.to_string(),
                subject: record.subject.clone(),
                period: record.period.clone(),
            })?;
        total += value * weight;
    }

    if !total.is_finite() {
        return Err(ScoringError::NonFiniteScore {
            subject: record.subject.clone(),
            period: record.period.clone(),
        });
    }
    Ok(total)
}

pub fn status(score: f64, threshold: f64) -> DeliveryStatus {
    if score >= threshold {
        DeliveryStatus::Delivered
    } else {
        DeliveryStatus::NotDelivered
    }
}

/// Complement of [`status`]: a period is below threshold exactly when it is
/// not delivered.
pub fn is_below_threshold(score: f64, threshold: f64) -> bool {
    status(score, threshold) == DeliveryStatus::NotDelivered
}

/// Counts the periods below `threshold` and maps the count onto a
/// classification. The cutoffs are absolute period counts regardless of how
/// many periods were supplied; an empty slice is `OnTrack`.
pub fn classify(scored: &[ScoredRecord], threshold: f64) -> (usize, Classification) {
    let below_count = scored
        .iter()
        .filter(|row| is_below_threshold(row.score, threshold))
        .count();

    (below_count, classification_for(below_count))
}

pub fn classification_for(below_count: usize) -> Classification {
    if below_count >= RECURRING_DEVIATION_MIN_PERIODS {
        Classification::RecurringDeviation
    } else if below_count >= OCCASIONAL_DEVIATION_MIN_PERIODS {
        Classification::OccasionalDeviation
    } else {
        Classification::OnTrack
    }
}

/// Scores every record and classifies each subject.
///
/// Fails on the first record that cannot be scored; no partial scorecard is
/// returned.
pub fn summarize(
    records: &[Record],
    weights: &WeightMap,
    threshold: f64,
) -> Result<Scorecard, ScoringError> {
    let mut scored = Vec::with_capacity(records.len());
    for record in records {
        let value = score(record, weights)?;
        scored.push(ScoredRecord {
            record: record.clone(),
            score: value,
            status: status(value, threshold),
        });
    }

    let mut subject_order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<ScoredRecord>> = HashMap::new();
    for row in &scored {
        let subject = row.record.subject.as_str();
        groups
            .entry(subject)
            .or_insert_with(|| {
                subject_order.push(subject);
                Vec::new()
            })
            .push(row.clone());
    }

    let summaries = subject_order
        .into_iter()
        .map(|subject| {
            let rows = groups.get(subject).map(Vec::as_slice).unwrap_or_default();
            let (below_count, classification) = classify(rows, threshold);
            EmployeeSummary {
                subject: subject.to_string(),
                below_count,
                classification,
            }
        })
        .collect();

    Ok(Scorecard { scored, summaries })
}
