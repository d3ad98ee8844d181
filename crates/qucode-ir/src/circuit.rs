//! High-level circuit builder API.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateKind, StandardGate};
use crate::instruction::Instruction;
use crate::linalg::{self, Operator};
use crate::qubit::{QubitId, validate_targets};

/// A quantum circuit over a fixed number of qubits.
///
/// Instructions are append-only and validated on insertion; the execution
/// engine only ever reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Instructions in application order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            instructions: vec![],
        }
    }

    /// Append an instruction after validating its operands.
    pub fn append(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        instruction.validate(self.num_qubits)?;
        trace!(gate = %instruction.name(), qubits = ?instruction.qubits, "append");
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Apply any gate to the given qubits.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::gate(gate, qubits))
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::P(theta), qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Rx(theta), qubit))
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Ry(theta), qubit))
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Rz(theta), qubit))
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(
            GateKind::controlled(StandardGate::X, 1),
            control,
            target,
        ))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(
            GateKind::controlled(StandardGate::Z, 1),
            control,
            target,
        ))
    }

    /// Apply controlled-phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(
            GateKind::controlled(StandardGate::P(theta), 1),
            control,
            target,
        ))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))
    }

    /// Apply `gate` to `targets` iff every qubit in `controls` is |1⟩.
    pub fn controlled(
        &mut self,
        gate: impl Into<GateKind>,
        controls: &[QubitId],
        targets: &[QubitId],
    ) -> IrResult<&mut Self> {
        let gate = gate.into();
        let kind = if controls.is_empty() {
            gate
        } else {
            GateKind::controlled(gate, controls.len() as u32)
        };
        let qubits = controls.iter().chain(targets).copied();
        self.append(Instruction::gate(kind, qubits))
    }

    /// Multi-controlled X.
    pub fn mcx(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        self.controlled(StandardGate::X, controls, &[target])
    }

    /// Multi-controlled Z.
    pub fn mcz(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        self.controlled(StandardGate::Z, controls, &[target])
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Inline `other` as one logical block, sending its qubit `i` to
    /// `mapping[i]`. Inlined gates are labelled with `other`'s name.
    pub fn append_subcircuit(&mut self, other: &Circuit, mapping: &[QubitId]) -> IrResult<&mut Self> {
        if mapping.len() != other.num_qubits as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: other.name.clone(),
                expected: other.num_qubits,
                got: mapping.len() as u32,
            });
        }
        validate_targets(mapping, self.num_qubits, Some(&other.name))?;

        let inlined = other
            .instructions
            .iter()
            .map(|inst| {
                let mut mapped = inst.remap(mapping)?;
                if mapped.gate.label.is_none() {
                    mapped.gate.label = Some(other.name.clone());
                }
                Ok(mapped)
            })
            .collect::<IrResult<Vec<_>>>()?;
        self.instructions.extend(inlined);
        Ok(self)
    }

    /// The inverse circuit: adjoint gates in reverse order.
    pub fn inverse(&self) -> Circuit {
        Circuit {
            name: format!("{}_dg", self.name),
            num_qubits: self.num_qubits,
            instructions: self
                .instructions
                .iter()
                .rev()
                .map(|inst| Instruction {
                    gate: Gate {
                        kind: inst.gate.kind.adjoint(),
                        label: inst.gate.label.clone(),
                    },
                    qubits: inst.qubits.clone(),
                })
                .collect(),
        }
    }

    /// The full `2^n × 2^n` unitary implemented by this circuit.
    ///
    /// Exponential in the qubit count; intended for verification of small
    /// circuits.
    pub fn to_matrix(&self) -> IrResult<Operator> {
        let mut acc = linalg::identity(1 << self.num_qubits);
        for inst in &self.instructions {
            let full = linalg::embed(&inst.gate.to_matrix(), &inst.qubits, self.num_qubits)?;
            acc = linalg::matmul(&full, &acc)?;
        }
        Ok(acc)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True if the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Circuit depth: the longest chain of instructions sharing qubits.
    pub fn depth(&self) -> usize {
        let mut levels = vec![0usize; self.num_qubits as usize];
        for inst in &self.instructions {
            let level = inst
                .qubits
                .iter()
                .map(|q| levels[q.index()])
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                levels[q.index()] = level;
            }
        }
        levels.into_iter().max().unwrap_or(0)
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit: H on qubit 0, then CX 0 → 1.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::new("bell", 2);
        circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
        Ok(circuit)
    }

    /// Create a GHZ state circuit.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::new("ghz", n);
        if n == 0 {
            return Ok(circuit);
        }

        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }

        Ok(circuit)
    }
}
