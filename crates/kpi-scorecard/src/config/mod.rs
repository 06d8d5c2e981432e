use crate::scorecard::engine::DEFAULT_THRESHOLD;
use crate::scorecard::{ScoringError, WeightMap};
use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Log level used when `APP_LOG_LEVEL` is unset. Production runs keep
    /// stderr to warnings; test runs keep it quiet.
    pub const fn default_log_level(self) -> &'static str {
        match self {
            Self::Development => "info",
            Self::Test => "error",
            Self::Production => "warn",
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub scoring: ScoringConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let threshold = match env::var("APP_THRESHOLD") {
            Ok(raw) => parse_threshold(&raw)?,
            Err(_) => DEFAULT_THRESHOLD,
        };

        let weights = match env::var("APP_KPI_WEIGHTS") {
            Ok(raw) => {
                WeightMap::parse_pairs(&raw).map_err(|source| ConfigError::InvalidWeights {
                    value: raw.clone(),
                    source,
                })?
            }
            Err(_) => WeightMap::default_kpis(),
        };

        let log_level = env::var("APP_LOG_LEVEL")
            .unwrap_or_else(|_| environment.default_log_level().to_string());

        Ok(Self {
            environment,
            scoring: ScoringConfig { threshold, weights },
            telemetry: TelemetryConfig {
                log_level,
                ansi: false,
            },
        })
    }
}

/// Raw scoring inputs; weights are normalized at evaluation time.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub threshold: f64,
    pub weights: WeightMap,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            weights: WeightMap::default_kpis(),
        }
    }
}

/// Tracing controls. `ansi` is off unless the caller knows stderr is a
/// terminal.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

pub fn parse_threshold(raw: &str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ConfigError::InvalidThreshold(raw.to_string()))
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidThreshold(String),
    InvalidWeights { value: String, source: ScoringError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidThreshold(value) => {
                write!(f, "APP_THRESHOLD must be a finite number, got '{}'", value)
            }
            ConfigError::InvalidWeights { value, .. } => {
                write!(f, "APP_KPI_WEIGHTS must be NAME=WEIGHT pairs, got '{}'", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidThreshold(_) => None,
            ConfigError::InvalidWeights { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_THRESHOLD");
        env::remove_var("APP_KPI_WEIGHTS");
        env::remove_var("APP_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.scoring.threshold, 70.0);
        assert_eq!(config.scoring.weights, WeightMap::default_kpis());
        assert_eq!(config.telemetry.log_level, "info");
        assert!(!config.telemetry.ansi);
    }

    #[test]
    fn log_level_defaults_per_environment() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        let cases = [
            ("production", "warn"),
            ("ci", "error"),
            ("dev", "info"),
        ];
        for (app_env, expected) in cases {
            reset_env();
            env::set_var("APP_ENV", app_env);
            let config = AppConfig::load().expect("config loads");
            assert_eq!(config.telemetry.log_level, expected, "APP_ENV={app_env}");
        }

        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("APP_LOG_LEVEL", "debug");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.telemetry.log_level, "debug");
        reset_env();
    }

    #[test]
    fn reads_threshold_and_weights_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "prod");
        env::set_var("APP_THRESHOLD", "65.5");
        env::set_var("APP_KPI_WEIGHTS", "CSAT=0.6,Attendance=0.4");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.scoring.threshold, 65.5);
        assert_eq!(config.scoring.weights.get("CSAT"), Some(0.6));
        assert_eq!(config.scoring.weights.len(), 2);
        reset_env();
    }

    #[test]
    fn rejects_malformed_threshold_and_weights() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_THRESHOLD", "seventy");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidThreshold(_))
        ));

        reset_env();
        env::set_var("APP_KPI_WEIGHTS", "CSAT");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidWeights { .. })
        ));
        reset_env();
    }
}
