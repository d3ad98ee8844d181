//! Hamiltonian data structures.
//!
//! A Hamiltonian is a sum of weighted Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (I, X, Y, Z) and c_k ∈ ℝ. Real coefficients make every Hamiltonian built
//! here Hermitian, so its dense matrix is a valid observable for
//! [`Register::expectation`](qucode_sim::Register::expectation).
//!
//! # Example
//!
//! ```rust
//! use qucode_algo::hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
//!
//! // H = -1.0·Z₀Z₁  +  0.5·X₀
//! let h = Hamiltonian::from_terms(vec![
//!     HamiltonianTerm::new(-1.0, PauliString::from_ops(vec![(0, PauliOp::Z), (1, PauliOp::Z)])),
//!     HamiltonianTerm::new( 0.5, PauliString::from_ops(vec![(0, PauliOp::X)])),
//! ]);
//! assert_eq!(h.n_terms(), 2);
//! assert_eq!(h.to_matrix(2).unwrap().dim(), (4, 4));
//! ```

use serde::{Deserialize, Serialize};

use qucode_ir::StandardGate;
use qucode_ir::linalg::{self, Operator};
use qucode_sim::config::MAX_SUPPORTED_QUBITS;

use crate::error::{AlgoError, AlgoResult};

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// The 2×2 matrix of this operator.
    pub fn matrix(self) -> Operator {
        match self {
            PauliOp::I => StandardGate::I.matrix(),
            PauliOp::X => StandardGate::X.matrix(),
            PauliOp::Y => StandardGate::Y.matrix(),
            PauliOp::Z => StandardGate::Z.matrix(),
        }
    }
}

/// A tensor product of Pauli operators on named qubits.
///
/// Stored as a sorted `Vec<(qubit_index, PauliOp)>` with Identity terms
/// omitted.  Qubits not listed are implicitly I.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauliString {
    /// Non-identity terms, sorted by qubit index ascending.
    ops: Vec<(u32, PauliOp)>,
}

impl PauliString {
    /// Construct a PauliString from an iterator of (qubit, op) pairs.
    ///
    /// Identity operators are dropped; the remaining ops are sorted by qubit.
    pub fn from_ops(ops: impl IntoIterator<Item = (u32, PauliOp)>) -> Self {
        let mut v: Vec<(u32, PauliOp)> = ops
            .into_iter()
            .filter(|(_, op)| *op != PauliOp::I)
            .collect();
        v.sort_by_key(|(q, _)| *q);
        Self { ops: v }
    }

    /// Construct a Z⊗Z⊗...⊗Z string spanning the given qubits.
    pub fn zz(qubits: impl IntoIterator<Item = u32>) -> Self {
        Self::from_ops(qubits.into_iter().map(|q| (q, PauliOp::Z)))
    }

    /// Return the non-identity (qubit, op) pairs, sorted by qubit index.
    pub fn ops(&self) -> &[(u32, PauliOp)] {
        &self.ops
    }

    /// True if there are no non-identity operators.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// The highest qubit index referenced, or `None` for an identity string.
    pub fn max_qubit(&self) -> Option<u32> {
        self.ops.last().map(|(q, _)| *q)
    }

    /// The operator acting on `qubit` (I if unlisted).
    pub fn op_on(&self, qubit: u32) -> PauliOp {
        self.ops
            .binary_search_by_key(&qubit, |(q, _)| *q)
            .map_or(PauliOp::I, |i| self.ops[i].1)
    }

    /// Dense `2^n × 2^n` matrix over a register of `num_qubits`.
    ///
    /// Rows are indexed by the register's basis index, so qubit `n-1` is the
    /// leftmost Kronecker factor.
    pub fn to_matrix(&self, num_qubits: u32) -> AlgoResult<Operator> {
        check_width(num_qubits)?;
        if let Some(q) = self.max_qubit().filter(|&q| q >= num_qubits) {
            return Err(AlgoError::InvalidParameter(format!(
                "Pauli string references qubit {q} but the register has {num_qubits} qubits"
            )));
        }
        Ok((0..num_qubits)
            .rev()
            .fold(linalg::identity(1), |acc, q| {
                linalg::kron(&acc, &self.op_on(q).matrix())
            }))
    }
}

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HamiltonianTerm {
    /// Real coefficient.
    pub coeff: f64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl HamiltonianTerm {
    /// Create a new term.
    pub fn new(coeff: f64, pauli: PauliString) -> Self {
        Self { coeff, pauli }
    }

    /// Shorthand: single-qubit Z term.
    pub fn z(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::Z)]))
    }

    /// Shorthand: ZZ coupling term.
    pub fn zz(q0: u32, q1: u32, coeff: f64) -> Self {
        Self::new(
            coeff,
            PauliString::from_ops([(q0, PauliOp::Z), (q1, PauliOp::Z)]),
        )
    }

    /// Shorthand: single-qubit X term.
    pub fn x(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::X)]))
    }

    /// Shorthand: constant offset `coeff · I`.
    pub fn constant(coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops(std::iter::empty()))
    }
}

/// A sum-of-Pauli-strings Hamiltonian.
///
/// H = Σ_k  c_k · P_k
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hamiltonian {
    terms: Vec<HamiltonianTerm>,
}

impl Hamiltonian {
    /// Create from a list of terms.
    pub fn from_terms(terms: Vec<HamiltonianTerm>) -> Self {
        Self { terms }
    }

    /// All terms.
    pub fn terms(&self) -> &[HamiltonianTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// The minimum number of qubits required to represent this Hamiltonian.
    ///
    /// Returns 0 if the Hamiltonian is empty or purely identity.
    pub fn min_qubits(&self) -> u32 {
        self.terms
            .iter()
            .filter_map(|t| t.pauli.max_qubit())
            .max()
            .map_or(0, |q| q + 1)
    }

    /// Dense Hermitian matrix `Σ c_k · P_k` over `num_qubits`.
    ///
    /// `num_qubits` must be at least [`min_qubits`](Self::min_qubits) and at
    /// least one.
    pub fn to_matrix(&self, num_qubits: u32) -> AlgoResult<Operator> {
        if num_qubits == 0 || num_qubits < self.min_qubits() {
            return Err(AlgoError::InvalidParameter(format!(
                "Hamiltonian spans {} qubits but the register has {num_qubits}",
                self.min_qubits().max(1)
            )));
        }
        check_width(num_qubits)?;
        let dim = 1usize << num_qubits;
        let mut total = Operator::zeros((dim, dim));
        for term in &self.terms {
            total.scaled_add(term.coeff.into(), &term.pauli.to_matrix(num_qubits)?);
        }
        Ok(total)
    }
}

/// Dense matrices are capped at the simulator's register limit.
fn check_width(num_qubits: u32) -> AlgoResult<()> {
    if num_qubits > MAX_SUPPORTED_QUBITS {
        return Err(AlgoError::InvalidParameter(format!(
            "dense operator on {num_qubits} qubits exceeds the {MAX_SUPPORTED_QUBITS}-qubit limit"
        )));
    }
    Ok(())
}

impl FromIterator<HamiltonianTerm> for Hamiltonian {
    fn from_iter<T: IntoIterator<Item = HamiltonianTerm>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}
