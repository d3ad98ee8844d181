//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in linear-algebra, gate and circuit operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Operand shapes are incompatible for the requested operation.
    #[error("Dimension mismatch in {op}: {left:?} vs {right:?}")]
    DimensionMismatch {
        /// The operation that detected the mismatch.
        op: &'static str,
        /// Shape of the left operand (rows, cols).
        left: (usize, usize),
        /// Shape of the right operand (rows, cols).
        right: (usize, usize),
    },

    /// Instruction targets are out of range or do not fit the operator.
    #[error("Invalid targets {targets:?} for {num_qubits}-qubit register: {reason}")]
    InvalidTargets {
        /// The offending target list.
        targets: Vec<u32>,
        /// Number of qubits available.
        num_qubits: u32,
        /// Why the targets were rejected.
        reason: String,
    },

    /// The same qubit appears twice in one instruction.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateTarget {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A matrix fails the unitarity check U†U = I.
    #[error("Operator '{name}' is not unitary (max deviation {deviation:.3e} > {tolerance:.1e})")]
    NonUnitaryOperator {
        /// Name of the gate or operator.
        name: String,
        /// Largest elementwise deviation of U†U from the identity.
        deviation: f64,
        /// Tolerance that was exceeded.
        tolerance: f64,
    },

    /// Gate arity or subcircuit mapping does not match.
    #[error("'{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate or circuit.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// A bitstring contains characters other than '0' and '1', or has the
    /// wrong length.
    #[error("Invalid bitstring '{0}'")]
    InvalidBitString(String),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
