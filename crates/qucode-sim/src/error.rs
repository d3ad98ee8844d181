//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced by register construction, execution and sampling.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Requested qubit count is zero or exceeds the configured maximum.
    #[error("Invalid qubit count {requested}: must be between 1 and {max}")]
    InvalidQubitCount {
        /// The requested number of qubits.
        requested: u32,
        /// The configured maximum.
        max: u32,
    },

    /// An observable passed to `expectation` is not Hermitian.
    #[error("Observable is not Hermitian within tolerance {tolerance:.1e}")]
    NotHermitian {
        /// Tolerance that was exceeded.
        tolerance: f64,
    },

    /// Engine configuration is malformed or out of range.
    #[error("Invalid simulator configuration: {0}")]
    InvalidConfig(String),

    /// Linear-algebra or circuit error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qucode_ir::IrError),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
