//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::qubit::{QubitId, validate_targets};

/// A gate applied to an ordered list of target qubits.
///
/// For controlled gates the controls come first in `qubits`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate to apply.
    pub gate: Gate,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate: gate.into(),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: impl Into<Gate>, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> String {
        self.gate.name()
    }

    /// The classical parameter bound to the gate, if any.
    pub fn param(&self) -> Option<f64> {
        self.gate.kind.parameter()
    }

    /// Check operands against a register of `num_qubits` qubits.
    pub fn validate(&self, num_qubits: u32) -> IrResult<()> {
        let arity = self.gate.num_qubits();
        if self.qubits.len() != arity as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: self.name(),
                expected: arity,
                got: self.qubits.len() as u32,
            });
        }
        validate_targets(&self.qubits, num_qubits, Some(&self.name()))
    }

    /// Return a copy with every qubit replaced through `mapping`.
    pub fn remap(&self, mapping: &[QubitId]) -> IrResult<Self> {
        let qubits = self
            .qubits
            .iter()
            .map(|q| {
                mapping
                    .get(q.index())
                    .copied()
                    .ok_or_else(|| IrError::InvalidTargets {
                        targets: self.qubits.iter().map(|q| q.0).collect(),
                        num_qubits: mapping.len() as u32,
                        reason: format!("{q} has no mapping"),
                    })
            })
            .collect::<IrResult<Vec<_>>>()?;
        Ok(Self {
            gate: self.gate.clone(),
            qubits,
        })
    }
}
