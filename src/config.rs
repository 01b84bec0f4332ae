//! Configuration for a histogram run

use crate::extract::ValueRange;
use robust_core::{Error, Result};
use robust_histogram::EmptyBinPolicy;

/// Options that control extraction, binning and reporting
#[derive(Debug, Clone, PartialEq)]
pub struct HistConfig {
    /// One-based column to read from each line
    pub column: usize,
    /// Inclusive lower bound; smaller values are dropped
    pub minimum: Option<f64>,
    /// Inclusive upper bound; larger values are dropped
    pub maximum: Option<f64>,
    /// Print bin statistics to the diagnostic stream
    pub verbose: bool,
    /// Whether zero-count rows are written
    pub empty_bins: EmptyBinPolicy,
}

impl Default for HistConfig {
    fn default() -> Self {
        Self {
            column: 1,
            minimum: None,
            maximum: None,
            verbose: false,
            empty_bins: EmptyBinPolicy::Skip,
        }
    }
}

impl HistConfig {
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_empty_bins(mut self, policy: EmptyBinPolicy) -> Self {
        self.empty_bins = policy;
        self
    }

    /// The inclusive filter range described by `minimum` and `maximum`
    pub fn range(&self) -> ValueRange {
        ValueRange::new(self.minimum, self.maximum)
    }

    /// Reject configurations that could never produce a histogram
    pub fn validate(&self) -> Result<()> {
        if self.column == 0 {
            return Err(Error::InvalidParameter(
                "column is one-based and must be at least 1".to_string(),
            ));
        }
        for (name, bound) in [("minimum", self.minimum), ("maximum", self.maximum)] {
            if let Some(value) = bound {
                if !value.is_finite() {
                    return Err(Error::InvalidParameter(format!(
                        "{name} must be a finite number, got {value}"
                    )));
                }
            }
        }
        if let (Some(minimum), Some(maximum)) = (self.minimum, self.maximum) {
            if minimum > maximum {
                return Err(Error::InvalidParameter(format!(
                    "minimum {minimum} is greater than maximum {maximum}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HistConfig::default();
        assert_eq!(config.column, 1);
        assert_eq!(config.minimum, None);
        assert_eq!(config.maximum, None);
        assert!(!config.verbose);
        assert_eq!(config.empty_bins, EmptyBinPolicy::Skip);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = HistConfig::default()
            .with_column(3)
            .with_minimum(-1.0)
            .with_maximum(1.0)
            .with_verbose(true)
            .with_empty_bins(EmptyBinPolicy::Emit);

        assert_eq!(config.column, 3);
        assert_eq!(config.range(), ValueRange::new(Some(-1.0), Some(1.0)));
        assert!(config.verbose);
        assert_eq!(config.empty_bins, EmptyBinPolicy::Emit);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let invalid = [
            HistConfig::default().with_column(0),
            HistConfig::default().with_minimum(f64::NAN),
            HistConfig::default().with_maximum(f64::INFINITY),
            HistConfig::default().with_minimum(2.0).with_maximum(1.0),
        ];
        for config in invalid {
            assert!(
                matches!(config.validate(), Err(Error::InvalidParameter(_))),
                "{config:?}"
            );
        }

        // Equal bounds keep exactly one value
        assert!(HistConfig::default()
            .with_minimum(1.0)
            .with_maximum(1.0)
            .validate()
            .is_ok());
    }
}
