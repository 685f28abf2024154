//! Library configuration.

use serde::{Deserialize, Serialize};

use crate::distribution::Distribution;
use crate::error::SourceError;

/// Tunables shared by queries, joints, and reports.
///
/// Missing fields in a JSON document fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbConfig {
    /// Absolute tolerance used when checking that masses sum to 1.0.
    pub tolerance: f64,
    /// Separator placed between labels of joint outcomes.
    pub joint_separator: String,
    /// Decimal places when rendering percentages.
    pub percent_decimals: usize,
}

impl Default for ProbConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            joint_separator: String::new(),
            percent_decimals: 2,
        }
    }
}

impl ProbConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Parse` for malformed JSON or invalid values.
    pub fn from_json_str(source_name: &str, json: &str) -> Result<Self, SourceError> {
        let config: Self = serde_json::from_str(json).map_err(|e| SourceError::Parse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
        config.validate().map_err(|message| SourceError::Parse {
            source_name: source_name.to_string(),
            message,
        })?;
        Ok(config)
    }

    /// Checks that the tolerance is a finite positive number.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(format!("tolerance must be finite and positive, got {}", self.tolerance));
        }
        Ok(())
    }

    /// Whether `dist` sums to 1.0 within the configured tolerance.
    #[must_use]
    pub fn accepts(&self, dist: &Distribution) -> bool {
        dist.is_normalized(self.tolerance)
    }
}
