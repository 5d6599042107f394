//! Pricing configuration
//!
//! Tunables for the discount pipeline. Defaults reproduce the stock checkout behaviour: loyalty
//! points may cover at most 20% of the running total, zero-amount winners are reported, and any
//! number of candidates may be supplied per category.

use std::{fs, path::Path};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::campaigns::types::percent_from_points;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Points cap outside 0..=100
    #[error("points cap must be between 0 and 100 percent, got {0}")]
    PointsCapOutOfRange(Decimal),

    /// A per-category cap of zero would reject every campaign
    #[error("max campaigns per category must be at least 1")]
    ZeroCampaignCap,
}

/// What to do with a category winner whose discount is exactly zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ZeroAmountLines {
    /// Report the winner with a zero amount.
    #[default]
    Include,

    /// Leave the category out of the breakdown.
    Suppress,
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    /// Share of the running total that loyalty points may cover, in percent points.
    pub points_cap: Decimal,

    /// Zero-amount winner policy.
    pub zero_amount_lines: ZeroAmountLines,

    /// Upper bound on candidates per category accepted at the request boundary.
    pub max_campaigns_per_category: Option<usize>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            points_cap: Decimal::from(20),
            zero_amount_lines: ZeroAmountLines::Include,
            max_campaigns_per_category: None,
        }
    }
}

impl PricingConfig {
    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a value is out of range.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: PricingConfig = serde_norway::from_str(yaml)?;

        config.validate()
    }

    /// Load and validate a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or holds out of range values.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Check value ranges, returning the config unchanged when valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the points cap is outside 0..=100 or the per-category cap is zero.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.points_cap < Decimal::ZERO || self.points_cap > Decimal::ONE_HUNDRED {
            return Err(ConfigError::PointsCapOutOfRange(self.points_cap));
        }

        if self.max_campaigns_per_category == Some(0) {
            return Err(ConfigError::ZeroCampaignCap);
        }

        Ok(self)
    }

    /// Points cap as a fractional percentage.
    pub fn points_cap_percentage(&self) -> Percentage {
        percent_from_points(self.points_cap)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn default_caps_points_at_twenty_percent() {
        let config = PricingConfig::default();

        assert_eq!(
            config.points_cap_percentage() * Decimal::from(600),
            Decimal::from(120)
        );
        assert_eq!(config.zero_amount_lines, ZeroAmountLines::Include);
        assert_eq!(config.max_campaigns_per_category, None);
    }

    #[test]
    fn partial_yaml_keeps_defaults() -> TestResult {
        let config = PricingConfig::from_yaml_str("zero_amount_lines: suppress\n")?;

        assert_eq!(config.zero_amount_lines, ZeroAmountLines::Suppress);
        assert_eq!(config.points_cap, Decimal::from(20));

        Ok(())
    }

    #[test]
    fn out_of_range_points_cap_is_rejected() {
        let result = PricingConfig::from_yaml_str("points_cap: 150\n");

        assert!(matches!(result, Err(ConfigError::PointsCapOutOfRange(_))));
    }

    #[test]
    fn zero_campaign_cap_is_rejected() {
        let result = PricingConfig::from_yaml_str("max_campaigns_per_category: 0\n");

        assert!(matches!(result, Err(ConfigError::ZeroCampaignCap)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = PricingConfig::from_yaml_str("points_kap: 10\n");

        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn from_path_reads_file() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "points_cap: 10\nmax_campaigns_per_category: 1")?;

        let config = PricingConfig::from_path(file.path())?;

        assert_eq!(config.points_cap, Decimal::from(10));
        assert_eq!(config.max_campaigns_per_category, Some(1));

        Ok(())
    }
}
