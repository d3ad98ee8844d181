//! Quantum Fourier transform.
//!
//! On the little-endian register, [`qft`] realises the discrete Fourier
//! transform exactly:
//!
//!   |x⟩ → 1/√2ⁿ · Σ_y e^{2πi·xy/2ⁿ} |y⟩
//!
//! Qubits are processed from the most significant (`n-1`) down to `0`. Qubit
//! `j` first picks up a controlled phase `π/2^(k-j)` from every already
//! processed qubit `k > j`, then a Hadamard. A final swap network reverses the
//! qubit order. [`inverse_qft`] uses the same layout with negated angles,
//! which is the exact adjoint because the DFT matrix is symmetric.

use std::f64::consts::PI;

use tracing::debug;

use qucode_ir::{Circuit, QubitId};

use crate::error::{AlgoError, AlgoResult};

/// Build the `n`-qubit QFT circuit.
pub fn qft(num_qubits: u32) -> AlgoResult<Circuit> {
    fourier_circuit("qft", num_qubits, 1.0)
}

/// Build the `n`-qubit inverse QFT circuit.
pub fn inverse_qft(num_qubits: u32) -> AlgoResult<Circuit> {
    fourier_circuit("iqft", num_qubits, -1.0)
}

fn fourier_circuit(name: &str, num_qubits: u32, sign: f64) -> AlgoResult<Circuit> {
    if num_qubits == 0 {
        return Err(AlgoError::InvalidParameter(
            "QFT needs at least one qubit".into(),
        ));
    }

    let mut circuit = Circuit::new(name, num_qubits);
    for j in (0..num_qubits).rev() {
        for k in (j + 1..num_qubits).rev() {
            let angle = sign * PI / 2f64.powi((k - j) as i32);
            circuit.cp(angle, QubitId(k), QubitId(j))?;
        }
        circuit.h(QubitId(j))?;
    }
    for i in 0..num_qubits / 2 {
        circuit.swap(QubitId(i), QubitId(num_qubits - 1 - i))?;
    }

    debug!(name, num_qubits, gates = circuit.len(), "built Fourier circuit");
    Ok(circuit)
}
