//! Engine configuration.

use serde::{Deserialize, Serialize};

use qucode_ir::linalg::DEFAULT_TOLERANCE;

use crate::error::{SimError, SimResult};

/// Hard ceiling on `max_qubits`: 2^30 amplitudes is 16 GiB of `Complex64`.
pub const MAX_SUPPORTED_QUBITS: u32 = 30;

/// Settings shared by every register created for an execution.
///
/// Deserializes from JSON with missing fields taking their defaults:
///
/// ```rust
/// use qucode_sim::SimConfig;
///
/// let config = SimConfig::from_json(r#"{ "max_qubits": 10 }"#).unwrap();
/// assert_eq!(config.max_qubits, 10);
/// assert_eq!(config.tolerance, 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Largest register that may be allocated.
    pub max_qubits: u32,
    /// Tolerance for the unitarity, Hermiticity and normalization checks.
    pub tolerance: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_qubits: 16,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SimConfig {
    /// Set the maximum register size.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set the numerical tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings are usable.
    pub fn validate(&self) -> SimResult<()> {
        if self.max_qubits == 0 || self.max_qubits > MAX_SUPPORTED_QUBITS {
            return Err(SimError::InvalidConfig(format!(
                "max_qubits must be between 1 and {MAX_SUPPORTED_QUBITS}, got {}",
                self.max_qubits
            )));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(SimError::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}
