//! Quantum phase estimation.
//!
//! Given a unitary `U` acting on `m` qubits and an eigenvector with
//! eigenvalue `e^{2πiφ}`, the circuit writes an estimate of `2^t·φ` into `t`
//! counting qubits. Counting qubit `j` controls `U^(2^j)`, so the readout is
//! little-endian like every other register index.
//!
//! Layout: counting qubits `0..t`, then the `m` auxiliary qubits. The caller
//! prepares the eigenvector on the auxiliary qubits beforehand (see
//! [`phase_estimation_with_preparation`]).

use tracing::debug;

use qucode_ir::linalg::{self, Operator};
use qucode_ir::{Circuit, CustomGate, GateKind, QubitId};

use crate::error::{AlgoError, AlgoResult};
use crate::qft::inverse_qft;

/// Build the phase-estimation circuit for `unitary` with `counting_qubits`
/// bits of precision.
///
/// Fails with `NonUnitaryOperator` if `unitary` is not unitary, or
/// `DimensionMismatch` if it is not a square power-of-two matrix.
pub fn phase_estimation(unitary: &Operator, counting_qubits: u32) -> AlgoResult<Circuit> {
    phase_estimation_with_preparation(unitary, counting_qubits, None)
}

/// Like [`phase_estimation`], but first inlines `preparation` on the
/// auxiliary qubits to load the eigenvector.
pub fn phase_estimation_with_preparation(
    unitary: &Operator,
    counting_qubits: u32,
    preparation: Option<&Circuit>,
) -> AlgoResult<Circuit> {
    if counting_qubits == 0 {
        return Err(AlgoError::InvalidParameter(
            "phase estimation needs at least one counting qubit".into(),
        ));
    }
    // U^(2^j) needs a 64-bit exponent.
    if counting_qubits > u64::BITS {
        return Err(AlgoError::InvalidParameter(format!(
            "at most {} counting qubits are supported, got {counting_qubits}",
            u64::BITS
        )));
    }
    // Validates shape and unitarity once; powers of a unitary stay unitary.
    let base = CustomGate::new("u", unitary.clone())?;
    let aux_qubits = base.num_qubits;
    let total = counting_qubits + aux_qubits;

    let counting: Vec<QubitId> = (0..counting_qubits).map(QubitId).collect();
    let aux: Vec<QubitId> = (counting_qubits..total).map(QubitId).collect();

    let mut circuit = Circuit::new("qpe", total);
    if let Some(prep) = preparation {
        circuit.append_subcircuit(prep, &aux)?;
    }
    for &q in &counting {
        circuit.h(q)?;
    }

    for (j, &control) in counting.iter().enumerate() {
        let exponent = 1u64 << j;
        let gate = CustomGate {
            name: format!("u^{exponent}"),
            num_qubits: aux_qubits,
            matrix: linalg::matrix_power(&base.matrix, exponent)?,
        };
        circuit.controlled(GateKind::Custom(gate), &[control], &aux)?;
    }

    circuit.append_subcircuit(&inverse_qft(counting_qubits)?, &counting)?;

    debug!(
        counting_qubits,
        aux_qubits,
        gates = circuit.len(),
        "built phase estimation circuit"
    );
    Ok(circuit)
}

/// Convert a counting-register readout to the phase estimate `k / 2^t`.
pub fn phase_from_readout(readout: usize, counting_qubits: u32) -> f64 {
    readout as f64 / 2f64.powi(counting_qubits as i32)
}
