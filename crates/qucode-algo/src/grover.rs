//! Grover search.
//!
//! The oracle marks one basis state with a phase flip; the diffusion operator
//! reflects about the uniform superposition. After
//! [`grover_iterations`] rounds the marked state dominates the distribution.

use std::f64::consts::PI;

use tracing::debug;

use qucode_ir::{BitString, Circuit, QubitId};

use crate::error::{AlgoError, AlgoResult};

/// Optimal number of Grover rounds for a single marked item among 2ⁿ:
/// `floor(π/4 · √2ⁿ)`, at least 1.
pub fn grover_iterations(num_qubits: u32) -> usize {
    let n_items = 2f64.powi(num_qubits as i32);
    ((PI / 4.0 * n_items.sqrt()).floor() as usize).max(1)
}

/// Phase-flip oracle for `target` (bit `i` = qubit `i`).
///
/// Self-inverse. For one qubit it reduces to Z (or XZX for target `0`).
pub fn grover_oracle(num_qubits: u32, target: &BitString) -> AlgoResult<Circuit> {
    check_target(num_qubits, target)?;
    let mut circuit = Circuit::new("oracle", num_qubits);
    let zeros: Vec<QubitId> = (0..num_qubits)
        .map(QubitId)
        .filter(|&q| target.bit(q) == Some(0))
        .collect();

    for &q in &zeros {
        circuit.x(q)?;
    }
    flip_all_ones(&mut circuit)?;
    for &q in &zeros {
        circuit.x(q)?;
    }
    Ok(circuit)
}

/// Reflection about the uniform superposition: H, X, phase-flip |1…1⟩, X, H.
pub fn grover_diffusion(num_qubits: u32) -> AlgoResult<Circuit> {
    if num_qubits == 0 {
        return Err(AlgoError::InvalidParameter(
            "diffusion needs at least one qubit".into(),
        ));
    }
    let mut circuit = Circuit::new("diffusion", num_qubits);
    for q in (0..num_qubits).map(QubitId) {
        circuit.h(q)?.x(q)?;
    }
    flip_all_ones(&mut circuit)?;
    for q in (0..num_qubits).map(QubitId) {
        circuit.x(q)?.h(q)?;
    }
    Ok(circuit)
}

/// Full search circuit: uniform superposition, then
/// [`grover_iterations`] rounds of oracle and diffusion.
pub fn grover_search(num_qubits: u32, target: &BitString) -> AlgoResult<Circuit> {
    let oracle = grover_oracle(num_qubits, target)?;
    let diffusion = grover_diffusion(num_qubits)?;
    let all: Vec<QubitId> = (0..num_qubits).map(QubitId).collect();
    let rounds = grover_iterations(num_qubits);

    let mut circuit = Circuit::new("grover", num_qubits);
    for &q in &all {
        circuit.h(q)?;
    }
    for _ in 0..rounds {
        circuit.append_subcircuit(&oracle, &all)?;
        circuit.append_subcircuit(&diffusion, &all)?;
    }

    debug!(num_qubits, target = %target, rounds, gates = circuit.len(), "built Grover circuit");
    Ok(circuit)
}

/// Phase-flip |1…1⟩: H·MCX·H on the last qubit, or plain Z for one qubit.
fn flip_all_ones(circuit: &mut Circuit) -> AlgoResult<()> {
    let n = circuit.num_qubits();
    let last = QubitId(n - 1);
    if n == 1 {
        circuit.z(last)?;
        return Ok(());
    }
    let controls: Vec<QubitId> = (0..n - 1).map(QubitId).collect();
    circuit.h(last)?.mcx(&controls, last)?.h(last)?;
    Ok(())
}

fn check_target(num_qubits: u32, target: &BitString) -> AlgoResult<()> {
    if num_qubits == 0 || target.len() != num_qubits as usize {
        return Err(AlgoError::InvalidParameter(format!(
            "target {target} does not address {num_qubits} qubits"
        )));
    }
    Ok(())
}
