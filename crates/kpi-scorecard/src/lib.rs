//! Weighted KPI scoring and deviation classification for team performance
//! reviews.
//!
//! Records flow through [`scorecard::WeightMap::normalize`] and
//! [`scorecard::summarize`]; [`scorecard::Dashboard`] adds owner selection
//! in front of the engine and [`import::RecordImporter`] loads records from
//! CSV exports.

pub mod config;
pub mod error;
pub mod import;
pub mod scorecard;
pub mod telemetry;
