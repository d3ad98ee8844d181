//! QuCode Circuit Representation
//!
//! This crate provides the linear-algebra core, the gate library and the
//! circuit data structures that the rest of the QuCode workspace builds on.
//!
//! # Core Components
//!
//! - **Linear algebra**: [`linalg`] with [`kron`](linalg::kron),
//!   [`inner`](linalg::inner), [`outer`](linalg::outer),
//!   [`embed`](linalg::embed) and the unitarity check
//! - **Qubits**: [`QubitId`] and the classical [`BitString`] read back from
//!   measurements
//! - **Gates**: [`StandardGate`] for the fixed catalogue, [`GateKind`] for
//!   controlled and custom gates, all resolving through
//!   [`GateKind::to_matrix`]
//! - **Instructions**: [`Instruction`] combining a gate with its targets
//! - **Circuit**: [`Circuit`], an append-only instruction list over a fixed
//!   number of qubits
//!
//! # Conventions
//!
//! Statevector indices are little-endian: bit `i` of a basis index is the value
//! of qubit `i`. An operator applied to targets `[t0, t1, ...]` treats `t0` as
//! its most significant local qubit, so a controlled gate lists its controls
//! first.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qucode_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::new("bell_state", 2);
//!
//! // |00⟩ → (|00⟩ + |11⟩)/√2
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I` | 1 | Identity |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `S`, `T` | 1 | Phase gates π/2 and π/4 |
//! | `P(θ)` | 1 | Phase shift diag(1, e^{iθ}) |
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates |
//! | `Swap` | 2 | SWAP gate |
//! | `Controlled` | k + c | Any gate with `c` control qubits |
//! | `Custom` | k | Any checked unitary matrix |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod linalg;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, GateKind, StandardGate, controlled, multi_controlled};
pub use instruction::Instruction;
pub use linalg::Operator;
pub use qubit::{BitString, QubitId};
