use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One weekly observation for a subject, as captured by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub owner: String,
    pub subject: String,
    pub period: String,
    pub kpi_scores: BTreeMap<String, f64>,
}

impl Record {
    pub fn new(
        owner: impl Into<String>,
        subject: impl Into<String>,
        period: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            subject: subject.into(),
            period: period.into(),
            kpi_scores: BTreeMap::new(),
        }
    }

    pub fn with_score(mut self, kpi: impl Into<String>, score: f64) -> Self {
        self.kpi_scores.insert(kpi.into(), score);
        self
    }

    pub fn kpi_score(&self, kpi: &str) -> Option<f64> {
        self.kpi_scores.get(kpi).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Delivered,
    NotDelivered,
}

impl DeliveryStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Delivered => "Delivered",
            Self::NotDelivered => "Not Delivered",
        }
    }
}

/// A record carrying its weighted score and delivery flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    pub record: Record,
    pub score: f64,
    pub status: DeliveryStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    OnTrack,
    OccasionalDeviation,
    RecurringDeviation,
}

impl Classification {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::OnTrack,
            Self::OccasionalDeviation,
            Self::RecurringDeviation,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::OccasionalDeviation => "Occasional Deviation",
            Self::RecurringDeviation => "Recurring Deviation",
        }
    }
}

/// Per-subject aggregate over every scored period that subject appeared in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeSummary {
    pub subject: String,
    pub below_count: usize,
    pub classification: Classification,
}

/// Failures raised by the normalizer and the score engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("invalid weight configuration: {reason}")]
    InvalidConfiguration { reason: String },
    #[error("record for {subject} ({period}) has no score for weighted KPI '{kpi}'")]
    MissingKpi {
        kpi: String,
        subject: String,
        period: String,
    },
    #[error("record for {subject} ({period}) has a weighted score that is not a finite number")]
    NonFiniteScore { subject: String, period: String },
}

impl ScoringError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
