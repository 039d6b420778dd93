//! Configuration loading.
//!
//! Strategy parameters can be loaded from a TOML file so they can be tuned
//! without recompiling. Every section is optional.
//!
//! ```toml
//! [trust]
//! theta = 0.45
//! alpha_pos = 0.05
//! alpha_neg = 0.5
//! delta = 0.6
//!
//! [gate]
//! threshold = 0.45
//!
//! [strategy]
//! kind = "tit_for_tat"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::UtmError;
use crate::estimator::TrustParams;
use crate::play::PayoffMatrix;
use crate::policy::{Policy, TitForTat, WinStayLoseShift};
use crate::strategy::{presets::preset_constants, GatedStrategy, HybridStrategy};

/// Complete strategy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtmConfig {
    /// Estimator hyper-parameters
    #[serde(default)]
    pub trust: TrustConfig,
    /// Override and promotion thresholds
    #[serde(default)]
    pub gate: GateConfig,
    /// Which inner policy to gate
    #[serde(default)]
    pub strategy: StrategyConfig,
    /// Executor payoffs
    #[serde(default)]
    pub payoffs: PayoffMatrix,
}

/// Estimator section. Unset fields take the preset values, whether or not
/// the section itself is present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustConfig {
    pub theta: f64,
    pub alpha_pos: f64,
    pub alpha_neg: f64,
    pub delta: f64,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            theta: preset_constants::THETA,
            alpha_pos: preset_constants::ALPHA_POS,
            alpha_neg: preset_constants::ALPHA_NEG,
            delta: preset_constants::TFT_DELTA,
        }
    }
}

impl From<TrustConfig> for TrustParams {
    fn from(c: TrustConfig) -> Self {
        TrustParams::new(c.theta, c.alpha_pos, c.alpha_neg, c.delta)
    }
}

impl Default for UtmConfig {
    fn default() -> Self {
        Self {
            trust: TrustConfig::default(),
            gate: GateConfig::default(),
            strategy: StrategyConfig::default(),
            payoffs: PayoffMatrix::default(),
        }
    }
}

/// Gate thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Trust below this forces Defect (τ)
    pub threshold: f64,
    /// Promotion threshold, used by the hybrid only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promote_at: Option<f64>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            threshold: preset_constants::THRESHOLD,
            promote_at: None,
        }
    }
}

/// Inner policy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StrategyConfig {
    pub kind: StrategyKind,
}

/// The gated strategies the config can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    TitForTat,
    WinStayLoseShift,
    /// Tit-for-Tat promoted to Win-Stay-Lose-Shift
    Hybrid,
}

impl UtmConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Estimator parameters described by the `[trust]` section.
    pub fn params(&self) -> TrustParams {
        self.trust.into()
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks every value against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params().validate()?;
        if !self.gate.threshold.is_finite() {
            return Err(ConfigError::Invalid(UtmError::invalid(
                "gate.threshold must be finite",
            )));
        }
        if let Some(p) = self.gate.promote_at {
            if !p.is_finite() {
                return Err(ConfigError::Invalid(UtmError::invalid(
                    "gate.promote_at must be finite",
                )));
            }
        }
        Ok(())
    }

    /// Builds a fresh, unshared strategy instance from this configuration.
    ///
    /// The hybrid uses `gate.promote_at`, or the preset value when unset.
    pub fn build_strategy(&self) -> Result<Box<dyn Policy>, UtmError> {
        let params = self.params();
        let threshold = self.gate.threshold;
        let strategy: Box<dyn Policy> = match self.strategy.kind {
            StrategyKind::TitForTat => {
                Box::new(GatedStrategy::new(params, threshold, TitForTat)?)
            }
            StrategyKind::WinStayLoseShift => Box::new(
                GatedStrategy::new(params, threshold, WinStayLoseShift)?.with_name("UTM-WSLS"),
            ),
            StrategyKind::Hybrid => {
                let promote_at = self.gate.promote_at.unwrap_or(preset_constants::PROMOTE_AT);
                Box::new(
                    HybridStrategy::new(
                        params,
                        threshold,
                        promote_at,
                        TitForTat,
                        WinStayLoseShift,
                    )?
                    .with_name("UTM-TFT->WSLS"),
                )
            }
        };
        Ok(strategy)
    }
}

/// Returns the default configuration rendered as TOML.
pub fn default_config_toml() -> Result<String, ConfigError> {
    UtmConfig::default().to_toml()
}

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] UtmError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = UtmConfig::default();
        assert_eq!(config.trust.theta, 0.45);
        assert_eq!(config.trust.delta, 0.6);
        assert_eq!(config.gate.threshold, 0.45);
        assert_eq!(config.strategy.kind, StrategyKind::TitForTat);
    }

    #[test]
    fn test_empty_string_gives_defaults() {
        let config = UtmConfig::from_str("").unwrap();
        assert_eq!(config, UtmConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let toml = r#"
            [trust]
            delta = 0.55

            [gate]
            promote_at = 0.6

            [strategy]
            kind = "hybrid"
        "#;
        let config = UtmConfig::from_str(toml).unwrap();
        assert_eq!(config.trust.delta, 0.55);
        // Unset fields in a present section keep the preset values
        assert_eq!(config.trust.theta, 0.45);
        assert_eq!(config.trust.alpha_pos, 0.05);
        assert_eq!(config.trust.alpha_neg, 0.5);
        assert_eq!(config.gate.promote_at, Some(0.6));
        assert_eq!(config.strategy.kind, StrategyKind::Hybrid);
    }

    #[test]
    fn test_roundtrip_toml() {
        let toml = default_config_toml().unwrap();
        let parsed = UtmConfig::from_str(&toml).unwrap();
        assert_eq!(parsed, UtmConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = UtmConfig::from_str("[trust]\nalpha_neg = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = UtmConfig::from_str("[strategy]\nkind = \"grim\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_build_strategy_names() {
        let mut config = UtmConfig::default();
        assert_eq!(config.build_strategy().unwrap().name(), "UTM-TitForTat");
        config.strategy.kind = StrategyKind::WinStayLoseShift;
        assert_eq!(config.build_strategy().unwrap().name(), "UTM-WSLS");
        config.strategy.kind = StrategyKind::Hybrid;
        assert_eq!(config.build_strategy().unwrap().name(), "UTM-TFT->WSLS");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gate]\nthreshold = 0.3").unwrap();
        let config = UtmConfig::from_file(file.path()).unwrap();
        assert_eq!(config.gate.threshold, 0.3);
    }

    #[test]
    fn test_partial_trust_section_keeps_baseline() {
        let bare = UtmConfig::from_str("").unwrap();
        let partial = UtmConfig::from_str("[trust]\ndelta = 0.6\n").unwrap();
        assert_eq!(partial.params().theta, bare.params().theta);
        assert_eq!(partial, bare);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = UtmConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let mut config = UtmConfig::default();
        config.gate.threshold = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(config.build_strategy().is_err());
    }
}
