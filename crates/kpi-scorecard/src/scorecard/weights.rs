use super::domain::ScoringError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sums within this distance of 1.0 are treated as already normalized.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

const DEFAULT_KPI_WEIGHTS: [(&str, f64); 3] = [
    ("Sales Conversion", 0.5),
    ("CSAT", 0.3),
    ("Attendance", 0.2),
];

/// Per-KPI weights keyed by KPI name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightMap(BTreeMap<String, f64>);

impl WeightMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The weights the team dashboard ships with.
    pub fn default_kpis() -> Self {
        DEFAULT_KPI_WEIGHTS
            .iter()
            .map(|(name, weight)| (name.to_string(), *weight))
            .collect()
    }

    /// Parses a comma separated list of `Name=weight` pairs.
    pub fn parse_pairs(raw: &str) -> Result<Self, ScoringError> {
        let mut weights = Self::new();
        for segment in raw.split(',').filter(|s| !s.trim().is_empty()) {
            let (name, weight) = parse_pair(segment)?;
            weights.insert(name, weight);
        }
        Ok(weights)
    }

    pub fn insert(&mut self, kpi: impl Into<String>, weight: f64) -> Option<f64> {
        self.0.insert(kpi.into(), weight)
    }

    pub fn get(&self, kpi: &str) -> Option<f64> {
        self.0.get(kpi).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, weight)| (name.as_str(), *weight))
    }

    pub fn kpis(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    /// Rescales the weights so they sum to 1.0.
    ///
    /// A map whose sum is already within [`WEIGHT_SUM_TOLERANCE`] of 1.0 comes
    /// back with its values untouched and `normalized == false`. Empty maps,
    /// negative or non-finite weights, and sums that are non-positive or
    /// overflow to infinity are rejected.
    pub fn normalize(&self) -> Result<Normalization, ScoringError> {
        if self.is_empty() {
            return Err(ScoringError::invalid("no KPI weights configured"));
        }

        for (kpi, weight) in self.iter() {
            if !weight.is_finite() {
                return Err(ScoringError::invalid(format!(
                    "weight for '{kpi}' is not a finite number"
                )));
            }
            if weight < 0.0 {
                return Err(ScoringError::invalid(format!(
                    "weight for '{kpi}' is negative ({weight})"
                )));
            }
        }

        let raw_sum = self.sum();
        if !raw_sum.is_finite() {
            return Err(ScoringError::invalid(format!(
                "weights sum to {raw_sum}; scale them down before scoring"
            )));
        }
        if raw_sum <= 0.0 {
            return Err(ScoringError::invalid(format!(
                "weights sum to {raw_sum}; at least one KPI needs a positive weight"
            )));
        }

        if (raw_sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE {
            return Ok(Normalization {
                weights: self.clone(),
                raw_sum,
                factor: 1.0,
                normalized: false,
            });
        }

        let factor = 1.0 / raw_sum;
        let weights = self
            .0
            .iter()
            .map(|(name, weight)| (name.clone(), weight / raw_sum))
            .collect();

        Ok(Normalization {
            weights,
            raw_sum,
            factor,
            normalized: true,
        })
    }
}

impl FromIterator<(String, f64)> for WeightMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Outcome of [`WeightMap::normalize`]; callers use `normalized` to decide
/// whether to warn that the configured weights were rescaled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Normalization {
    pub weights: WeightMap,
    pub raw_sum: f64,
    pub factor: f64,
    pub normalized: bool,
}

/// Parses a single `Name=weight` pair.
pub fn parse_pair(raw: &str) -> Result<(String, f64), ScoringError> {
    let (name, value) = raw.split_once('=').ok_or_else(|| {
        ScoringError::invalid(format!("expected NAME=WEIGHT, got '{}'", raw.trim()))
    })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ScoringError::invalid(format!(
            "missing KPI name in '{}'",
            raw.trim()
        )));
    }

    let weight = value.trim().parse::<f64>().map_err(|_| {
        ScoringError::invalid(format!(
            "weight for '{name}' is not a number: '{}'",
            value.trim()
        ))
    })?;

    Ok((name.to_string(), weight))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(pairs: &[(&str, f64)]) -> WeightMap {
        pairs
            .iter()
            .map(|(name, weight)| (name.to_string(), *weight))
            .collect()
    }

    #[test]
    fn normalized_map_is_returned_unchanged() {
        let map = WeightMap::default_kpis();
        let outcome = map.normalize().expect("default weights are valid");
        assert!(!outcome.normalized);
        assert_eq!(outcome.factor, 1.0);
        assert_eq!(outcome.weights, map);
    }

    #[test]
    fn rescales_when_sum_differs_from_one() {
        let map = weights(&[("A", 0.5), ("B", 0.5), ("C", 1.0)]);
        let outcome = map.normalize().expect("positive sum normalizes");
        assert!(outcome.normalized);
        assert_eq!(outcome.raw_sum, 2.0);
        assert_eq!(outcome.factor, 0.5);
        assert_eq!(outcome.weights.get("A"), Some(0.25));
        assert_eq!(outcome.weights.get("C"), Some(0.5));
        assert!((outcome.weights.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE);
    }

    #[test]
    fn slider_rounding_does_not_trigger_normalization() {
        // slider steps leave rounding noise in the sum
        let map = weights(&[("A", 0.1), ("B", 0.2), ("C", 0.7)]);
        let outcome = map.normalize().expect("valid weights");
        assert!(!outcome.normalized);
    }

    #[test]
    fn zero_sum_is_invalid_configuration() {
        let map = weights(&[("A", 0.0), ("B", 0.0)]);
        let err = map.normalize().expect_err("zero sum rejected");
        assert!(matches!(err, ScoringError::InvalidConfiguration { .. }));
    }

    #[test]
    fn empty_negative_and_nan_weights_are_rejected() {
        assert!(WeightMap::new().normalize().is_err());
        assert!(weights(&[("A", 1.5), ("B", -0.5)]).normalize().is_err());
        assert!(weights(&[("A", f64::NAN)]).normalize().is_err());
        assert!(weights(&[("A", f64::INFINITY)]).normalize().is_err());
    }

    #[test]
    fn overflowing_sum_is_invalid_configuration() {
        let map = weights(&[("A", 1e308), ("B", 1e308)]);
        let err = map.normalize().expect_err("infinite sum rejected");
        assert!(matches!(err, ScoringError::InvalidConfiguration { .. }));
    }

    #[test]
    fn parse_pairs_accepts_spaced_kpi_names() {
        let map = WeightMap::parse_pairs("Sales Conversion=0.5, CSAT = 0.3,Attendance=0.2,")
            .expect("pairs parse");
        assert_eq!(map, WeightMap::default_kpis());
    }

    #[test]
    fn parse_pair_reports_malformed_input() {
        assert!(parse_pair("CSAT").is_err());
        assert!(parse_pair("=0.3").is_err());
        let err = parse_pair("CSAT=high").expect_err("non-numeric weight");
        assert_eq!(
            err.to_string(),
            "invalid weight configuration: weight for 'CSAT' is not a number: 'high'"
        );
    }
}
