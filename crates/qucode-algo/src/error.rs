//! Error types for the algorithm crate.

use thiserror::Error;

/// Errors produced while building or driving quantum algorithms.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AlgoError {
    /// The variational loop hit its iteration cap without converging.
    #[error("Optimizer did not converge after {iterations} iterations (last value {last_value})")]
    OptimizerDivergence {
        /// Iterations performed.
        iterations: usize,
        /// Objective value at the last iteration.
        last_value: f64,
    },

    /// An algorithm argument is outside its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Circuit builder or linear-algebra error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qucode_ir::IrError),

    /// Register or execution error.
    #[error("Simulation error: {0}")]
    Sim(#[from] qucode_sim::SimError),
}

/// Result type for algorithm operations.
pub type AlgoResult<T> = Result<T, AlgoError>;
