//! Statevector register.

use num_complex::Complex64;
use rand::Rng;
use tracing::debug;

use qucode_ir::linalg::{self, ONE, Operator, ZERO};
use qucode_ir::{BitString, GateKind, Instruction, IrError, QubitId};

use crate::config::{MAX_SUPPORTED_QUBITS, SimConfig};
use crate::error::{SimError, SimResult};

/// The classical record of one irreversible `measure_all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementOutcome {
    /// The basis index the register collapsed to.
    pub index: usize,
    /// The same outcome as bits, qubit 0 first.
    pub bits: BitString,
}

/// A register of qubits holding a 2^n-amplitude statevector.
///
/// Created in |0…0⟩ and owned by exactly one execution. There is deliberately
/// no `Clone`: once [`measure_all`](Self::measure_all) collapses the state, the
/// pre-measurement amplitudes are gone; read [`probabilities`](Self::probabilities)
/// first if they are needed.
#[derive(Debug)]
pub struct Register {
    /// The state amplitudes; bit `i` of an index is qubit `i`.
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: u32,
    /// Unitarity / normalization tolerance.
    tolerance: f64,
}

impl Register {
    /// Create a register initialized to |0…0⟩ with the default configuration.
    pub fn new(num_qubits: u32) -> SimResult<Self> {
        Self::with_config(num_qubits, &SimConfig::default())
    }

    /// Create a register initialized to |0…0⟩.
    ///
    /// The configuration is validated first, so a builder-made config can
    /// never lift the cap past [`MAX_SUPPORTED_QUBITS`].
    pub fn with_config(num_qubits: u32, config: &SimConfig) -> SimResult<Self> {
        config.validate()?;
        let max = config.max_qubits.min(MAX_SUPPORTED_QUBITS);
        if num_qubits == 0 || num_qubits > max {
            return Err(SimError::InvalidQubitCount {
                requested: num_qubits,
                max,
            });
        }
        let size = 1usize << num_qubits;
        let mut amplitudes = vec![ZERO; size];
        amplitudes[0] = ONE;
        debug!(num_qubits, size, "allocated register");
        Ok(Self {
            amplitudes,
            num_qubits,
            tolerance: config.tolerance,
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Read-only view of the amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Re-initialize to |0…0⟩.
    pub fn reset(&mut self) {
        self.amplitudes.fill(ZERO);
        self.amplitudes[0] = ONE;
    }

    /// Sum of squared magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// True if the state has unit norm within the register tolerance.
    pub fn is_normalized(&self) -> bool {
        (self.norm_sqr() - 1.0).abs() <= self.tolerance
    }

    // =========================================================================
    // Unitary evolution
    // =========================================================================

    /// Apply `operator` to `targets` (first target = most significant local
    /// qubit).
    ///
    /// Equivalent to left-multiplying by [`linalg::embed`]`(operator, targets, n)`
    /// but costs O(2^n · 2^k): each group of 2^k amplitudes sharing the
    /// non-target bits is transformed in place.
    pub fn apply(&mut self, operator: &Operator, targets: &[QubitId]) -> SimResult<()> {
        linalg::check_operator_targets(operator, targets, self.num_qubits)?;
        let deviation = linalg::unitarity_deviation(operator);
        if deviation > self.tolerance {
            return Err(IrError::NonUnitaryOperator {
                name: format!("{}x{} operator", operator.nrows(), operator.ncols()),
                deviation,
                tolerance: self.tolerance,
            }
            .into());
        }

        let targets: Vec<usize> = targets.iter().map(|q| q.index()).collect();
        let local_dim = operator.nrows();
        let offsets: Vec<usize> = (0..local_dim)
            .map(|r| linalg::scatter_local(r, &targets))
            .collect();
        let mask = offsets[local_dim - 1];

        let mut gathered = vec![ZERO; local_dim];
        for base in (0..self.amplitudes.len()).filter(|i| i & mask == 0) {
            for (slot, &off) in gathered.iter_mut().zip(&offsets) {
                *slot = self.amplitudes[base | off];
            }
            for (r, &off) in offsets.iter().enumerate() {
                self.amplitudes[base | off] = operator
                    .row(r)
                    .iter()
                    .zip(&gathered)
                    .map(|(&m, &a)| m * a)
                    .sum();
            }
        }

        debug_assert!(
            (self.norm_sqr() - 1.0).abs() <= self.tolerance.max(1e-9),
            "unitary evolution broke normalization"
        );
        Ok(())
    }

    /// Apply a gate from the library.
    pub fn apply_gate(&mut self, gate: &GateKind, targets: &[QubitId]) -> SimResult<()> {
        self.apply(&gate.to_matrix(), targets)
    }

    /// Apply a circuit instruction.
    pub fn apply_instruction(&mut self, instruction: &Instruction) -> SimResult<()> {
        instruction.validate(self.num_qubits)?;
        self.apply_gate(&instruction.gate.kind, &instruction.qubits)
    }

    // =========================================================================
    // Classical readout
    // =========================================================================

    /// Born-rule probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Measure every qubit, collapsing the register to the drawn basis state.
    pub fn measure_all<R: Rng + ?Sized>(&mut self, rng: &mut R) -> MeasurementOutcome {
        let index = draw(&self.probabilities(), rng.r#gen());
        self.amplitudes.fill(ZERO);
        self.amplitudes[index] = ONE;
        MeasurementOutcome {
            index,
            bits: BitString::from_index(index, self.num_qubits as usize),
        }
    }

    /// Measure a single qubit.
    ///
    /// The surviving branch is renormalized; the other qubits stay in
    /// superposition.
    pub fn measure_qubit<R: Rng + ?Sized>(&mut self, qubit: QubitId, rng: &mut R) -> SimResult<u8> {
        qucode_ir::qubit::validate_targets(&[qubit], self.num_qubits, Some("measure"))?;
        let mask = 1usize << qubit.index();
        let p_one: f64 = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum();

        let r: f64 = rng.r#gen();
        let outcome = u8::from(r < p_one || p_one >= 1.0);
        let keep_set = outcome == 1;
        let p = if keep_set { p_one } else { 1.0 - p_one };
        let scale = 1.0 / p.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) == keep_set {
                *amp *= scale;
            } else {
                *amp = ZERO;
            }
        }
        Ok(outcome)
    }

    /// `Re⟨ψ|H|ψ⟩` for a Hermitian `observable`. Does not disturb the state.
    pub fn expectation(&self, observable: &Operator) -> SimResult<f64> {
        if !observable.is_square() || observable.nrows() != self.amplitudes.len() {
            return Err(IrError::DimensionMismatch {
                op: "expectation",
                left: observable.dim(),
                right: (self.amplitudes.len(), 1),
            }
            .into());
        }
        if !linalg::is_hermitian(observable, self.tolerance) {
            return Err(SimError::NotHermitian {
                tolerance: self.tolerance,
            });
        }
        let h_psi = linalg::matvec(observable, &self.amplitudes)?;
        Ok(linalg::inner(&self.amplitudes, &h_psi)?.re)
    }

    /// Bloch-sphere coordinates `(⟨X⟩, ⟨Y⟩, ⟨Z⟩)` of a single-qubit register.
    pub fn bloch_vector(&self) -> SimResult<[f64; 3]> {
        if self.num_qubits != 1 {
            return Err(IrError::QubitCountMismatch {
                gate_name: "bloch_vector".into(),
                expected: 1,
                got: self.num_qubits,
            }
            .into());
        }
        let (a, b) = (self.amplitudes[0], self.amplitudes[1]);
        let coherence = a.conj() * b;
        Ok([
            2.0 * coherence.re,
            2.0 * coherence.im,
            a.norm_sqr() - b.norm_sqr(),
        ])
    }
}

/// Inverse-CDF draw: the first index whose cumulative probability exceeds `r`.
fn draw(probabilities: &[f64], r: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, p) in probabilities.iter().enumerate() {
        cumulative += p;
        if r < cumulative {
            return i;
        }
    }

    // Rounding left `r` above the total mass: take the last reachable state.
    probabilities
        .iter()
        .rposition(|&p| p > 0.0)
        .unwrap_or(probabilities.len() - 1)
}
