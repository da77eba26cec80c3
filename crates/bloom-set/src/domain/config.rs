//! Bloom set configuration and validation
//!
//! # Example
//!
//! ```
//! use bloom_set::BloomSetConfigBuilder;
//!
//! let config = BloomSetConfigBuilder::new()
//!     .expected_insertions(10_000)
//!     .false_positive_rate(0.001)
//!     .build()
//!     .expect("Valid config");
//! assert_eq!(config.expected_insertions, 10_000);
//! ```

use serde::{Deserialize, Serialize};

use super::parameters::validate_inputs;
use crate::error::FilterError;

/// Sizing inputs for a Bloom set
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BloomSetConfig {
    /// Expected number of insertions (n > 0)
    pub expected_insertions: usize,
    /// Target false positive rate, strictly between 0 and 1
    pub false_positive_rate: f64,
}

impl Default for BloomSetConfig {
    fn default() -> Self {
        Self {
            expected_insertions: 1_000,
            false_positive_rate: 0.01,
        }
    }
}

impl BloomSetConfig {
    /// Create a new configuration with validation
    pub fn new(expected_insertions: usize, false_positive_rate: f64) -> Result<Self, FilterError> {
        let config = Self {
            expected_insertions,
            false_positive_rate,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check `n > 0` and `0 < fpr < 1`
    pub fn validate(&self) -> Result<(), FilterError> {
        validate_inputs(self.expected_insertions, self.false_positive_rate)
    }

    /// Builder-style method to set expected insertions
    pub fn with_expected_insertions(mut self, n: usize) -> Self {
        self.expected_insertions = n;
        self
    }

    /// Builder-style method to set the target false positive rate
    pub fn with_false_positive_rate(mut self, fpr: f64) -> Self {
        self.false_positive_rate = fpr;
        self
    }
}

/// Fluent builder for [`BloomSetConfig`]
#[derive(Default)]
pub struct BloomSetConfigBuilder {
    expected_insertions: Option<usize>,
    false_positive_rate: Option<f64>,
}

impl BloomSetConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expected_insertions(mut self, n: usize) -> Self {
        self.expected_insertions = Some(n);
        self
    }

    pub fn false_positive_rate(mut self, fpr: f64) -> Self {
        self.false_positive_rate = Some(fpr);
        self
    }

    /// Build the config, validating all parameters
    pub fn build(self) -> Result<BloomSetConfig, FilterError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation; construction of a set still validates
    pub fn build_unchecked(self) -> BloomSetConfig {
        let defaults = BloomSetConfig::default();

        BloomSetConfig {
            expected_insertions: self
                .expected_insertions
                .unwrap_or(defaults.expected_insertions),
            false_positive_rate: self
                .false_positive_rate
                .unwrap_or(defaults.false_positive_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(BloomSetConfig::default().validate().is_ok());
    }

    #[test]
    fn test_new_rejects_invalid_inputs() {
        assert!(matches!(
            BloomSetConfig::new(0, 0.1),
            Err(FilterError::InvalidCapacity { .. })
        ));
        assert!(matches!(
            BloomSetConfig::new(10, 1.0),
            Err(FilterError::InvalidFPR { .. })
        ));
        assert!(BloomSetConfig::new(10, 0.5).is_ok());
    }

    #[test]
    fn test_with_methods() {
        let config = BloomSetConfig::default()
            .with_expected_insertions(42)
            .with_false_positive_rate(0.2);

        assert_eq!(config.expected_insertions, 42);
        assert_eq!(config.false_positive_rate, 0.2);
    }

    #[test]
    fn test_builder_uses_defaults() {
        let config = BloomSetConfigBuilder::new()
            .false_positive_rate(0.05)
            .build()
            .expect("Should use defaults for other fields");

        assert_eq!(
            config.expected_insertions,
            BloomSetConfig::default().expected_insertions
        );
        assert_eq!(config.false_positive_rate, 0.05);
    }

    #[test]
    fn test_builder_rejects_invalid_fpr() {
        let result = BloomSetConfigBuilder::new().false_positive_rate(0.0).build();
        assert!(matches!(result, Err(FilterError::InvalidFPR { .. })));
    }

    #[test]
    fn test_build_unchecked_skips_validation() {
        let config = BloomSetConfigBuilder::new()
            .expected_insertions(0)
            .build_unchecked();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serde() {
        let config = BloomSetConfig::new(500, 0.001).unwrap();
        let json = serde_json::to_string(&config).unwrap();

        assert_eq!(json, r#"{"expected_insertions":500,"false_positive_rate":0.001}"#);
        let parsed: BloomSetConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
