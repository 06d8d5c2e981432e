mod dashboard;
pub mod domain;
pub mod engine;
pub mod report;
pub mod weights;

pub use dashboard::Dashboard;
pub use domain::{
    Classification, DeliveryStatus, EmployeeSummary, Record, ScoredRecord, ScoringError,
};
pub use engine::{classify, score, status, summarize, Scorecard, DEFAULT_THRESHOLD};
pub use report::ScorecardReport;
pub use weights::{Normalization, WeightMap};
