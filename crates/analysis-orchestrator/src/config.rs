use analysis_core::{AnalysisError, Strategy, DEFAULT_TREND_TOLERANCE};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use technical_analysis::IndicatorParams;

/// Largest accepted indicator window, in bars.
pub const MAX_WINDOW: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub strategy: Strategy,                  // growth
    pub indicators: IndicatorParams,         // 14 / 30 / 9 / 20
    pub trend_tolerance: f64,                // 1e-9, relative
    pub parallel: bool,                      // run both engines with rayon::join
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Growth,
            indicators: IndicatorParams::default(),
            trend_tolerance: DEFAULT_TREND_TOLERANCE,
            parallel: true,
        }
    }
}

impl AnalysisConfig {
    pub fn from_env() -> Result<Self, AnalysisError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AnalysisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let params = defaults.indicators;

        let config = Self {
            strategy: parse_or(&lookup, "ANALYSIS_STRATEGY", defaults.strategy)?,
            indicators: IndicatorParams {
                rsi_period: parse_or(&lookup, "RSI_PERIOD", params.rsi_period)?,
                trix_period: parse_or(&lookup, "TRIX_PERIOD", params.trix_period)?,
                trix_signal_period: parse_or(
                    &lookup,
                    "TRIX_SIGNAL_PERIOD",
                    params.trix_signal_period,
                )?,
                volume_window: parse_or(&lookup, "VOLUME_AVG_WINDOW", params.volume_window)?,
            },
            trend_tolerance: parse_or(&lookup, "TREND_TOLERANCE", defaults.trend_tolerance)?,
            parallel: parse_or(&lookup, "PARALLEL_ENGINES", defaults.parallel)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        let windows = [
            ("RSI_PERIOD", self.indicators.rsi_period),
            ("TRIX_PERIOD", self.indicators.trix_period),
            ("TRIX_SIGNAL_PERIOD", self.indicators.trix_signal_period),
            ("VOLUME_AVG_WINDOW", self.indicators.volume_window),
        ];
        if let Some((key, w)) = windows.iter().find(|(_, w)| *w == 0 || *w > MAX_WINDOW) {
            return Err(AnalysisError::Config(format!(
                "{key} must be between 1 and {MAX_WINDOW}, got {w}"
            )));
        }
        if !self.trend_tolerance.is_finite() || self.trend_tolerance < 0.0 {
            return Err(AnalysisError::Config(format!(
                "TREND_TOLERANCE must be a non-negative number, got {}",
                self.trend_tolerance
            )));
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AnalysisError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AnalysisError::Config(format!("{key}={raw}: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AnalysisConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.indicators.rsi_period, 14);
        assert_eq!(config.indicators.trix_period, 30);
        assert!(config.parallel);
    }

    #[test]
    fn test_overrides() {
        let config = AnalysisConfig::from_lookup(lookup(&[
            ("ANALYSIS_STRATEGY", "Value"),
            ("RSI_PERIOD", "7"),
            ("VOLUME_AVG_WINDOW", " 10 "),
            ("PARALLEL_ENGINES", "false"),
        ]))
        .unwrap();
        assert_eq!(config.strategy, Strategy::Value);
        assert_eq!(config.indicators.rsi_period, 7);
        assert_eq!(config.indicators.volume_window, 10);
        assert!(!config.parallel);
    }

    #[test]
    fn test_window_upper_bound_is_inclusive() {
        let config = AnalysisConfig::from_lookup(lookup(&[("TRIX_PERIOD", "1000")])).unwrap();
        assert_eq!(config.indicators.trix_period, MAX_WINDOW);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        for pairs in [
            [("RSI_PERIOD", "fourteen")],
            [("TRIX_PERIOD", "0")],
            [("RSI_PERIOD", "1001")],
            [("VOLUME_AVG_WINDOW", "18446744073709551615")],
            [("ANALYSIS_STRATEGY", "momentum")],
            [("TREND_TOLERANCE", "-1")],
            [("PARALLEL_ENGINES", "maybe")],
        ] {
            let err = AnalysisConfig::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(matches!(err, AnalysisError::Config(_)), "{pairs:?}");
        }
    }
}
