//! Cast configuration.
//!
//! Threshold values are fixed per session so the gesture state machine
//! behaves consistently for the whole collection window.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for entropy collection and seed derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastConfig {
    /// User-acceleration magnitude above which the device counts as shaken.
    pub shake_threshold: f64,
    /// Gravity-inclusive magnitude below which the device counts as falling.
    pub freefall_threshold: f64,
    /// Gravity-inclusive magnitude above which a fall counts as landed.
    pub impact_threshold: f64,
    /// Multiplier applied to the chaos sum before the modulo reduction.
    pub chaos_scale: f64,
    /// Upper bound of the uniform perturbation added to each weighted
    /// sample. Zero disables perturbation and keeps collection
    /// deterministic for a given reading stream.
    pub jitter_amplitude: f64,
}

impl Default for CastConfig {
    fn default() -> Self {
        Self {
            shake_threshold: 15.0,
            freefall_threshold: 2.0,
            impact_threshold: 20.0,
            chaos_scale: 100_000.0,
            jitter_amplitude: 0.0,
        }
    }
}

impl CastConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shake_threshold <= 0.0
            || self.freefall_threshold <= 0.0
            || self.impact_threshold <= 0.0
        {
            return Err(ConfigError::InvalidThreshold);
        }
        if self.freefall_threshold >= self.impact_threshold {
            return Err(ConfigError::InvalidThresholdOrder);
        }
        if self.chaos_scale <= 0.0 {
            return Err(ConfigError::InvalidScale);
        }
        if self.jitter_amplitude < 0.0 {
            return Err(ConfigError::InvalidJitter);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("thresholds must be positive")]
    InvalidThreshold,
    #[error("freefall threshold must be below the impact threshold")]
    InvalidThresholdOrder,
    #[error("chaos scale must be positive")]
    InvalidScale,
    #[error("jitter amplitude must not be negative")]
    InvalidJitter,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub cast: CastConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Demo binary configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Number of simulated shake readings before the drop.
    pub shake_readings: u32,
    /// Stop manually instead of simulating the drop gesture.
    pub manual_stop: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            shake_readings: 12,
            manual_stop: false,
        }
    }
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.cast.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = CastConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_threshold_invalid() {
        let config = CastConfig {
            shake_threshold: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold)
        ));
    }

    #[test]
    fn test_freefall_above_impact_invalid() {
        let config = CastConfig {
            freefall_threshold: 25.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThresholdOrder)
        ));
    }

    #[test]
    fn test_partial_toml_applies_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [cast]
            shake_threshold = 12.0
            freefall_threshold = 2.0
            impact_threshold = 20.0
            chaos_scale = 100000.0
            jitter_amplitude = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.cast.shake_threshold, 12.0);
        assert_eq!(config.demo.shake_readings, 12);
    }
}
