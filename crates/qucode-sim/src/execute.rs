//! Circuit execution against a register.

use std::time::Instant;

use tracing::{debug, instrument};

use qucode_ir::{Circuit, IrError};

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::register::Register;

/// Apply every instruction of `circuit` to `register`, in order.
///
/// The register is left in the final pre-measurement state. Stops at the first
/// failing instruction.
#[instrument(skip(circuit, register), fields(circuit = circuit.name(), instructions = circuit.len()))]
pub fn execute(circuit: &Circuit, register: &mut Register) -> SimResult<()> {
    if circuit.num_qubits() != register.num_qubits() {
        return Err(IrError::QubitCountMismatch {
            gate_name: circuit.name().to_string(),
            expected: register.num_qubits(),
            got: circuit.num_qubits(),
        }
        .into());
    }

    let start = Instant::now();
    for instruction in circuit.instructions() {
        register.apply_instruction(instruction)?;
    }
    debug!(elapsed = ?start.elapsed(), "circuit executed");
    Ok(())
}

/// Allocate a fresh register sized for `circuit` and execute it.
pub fn run(circuit: &Circuit, config: &SimConfig) -> SimResult<Register> {
    let mut register = Register::with_config(circuit.num_qubits(), config)?;
    execute(circuit, &mut register)?;
    Ok(register)
}
