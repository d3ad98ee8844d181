//! Quantum gate types.
//!
//! The catalogue is closed: every gate is a [`GateKind`] variant and resolves
//! to its unitary through [`GateKind::to_matrix`].

use ndarray::s;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::f64::consts::PI;

use crate::error::{IrError, IrResult};
use crate::linalg::{
    self, DEFAULT_TOLERANCE, ONE, Operator, ZERO, conjugate_transpose, from_rows, identity,
};

/// Standard gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,

    // Single-qubit parameterized gates
    /// Phase shift diag(1, e^{iθ}).
    P(f64),
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),

    // Two-qubit gates
    /// SWAP gate.
    Swap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::T => "t",
            StandardGate::P(_) => "p",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::Swap => 2,
            _ => 1,
        }
    }

    /// The bound classical parameter, if the gate has one.
    pub fn parameter(&self) -> Option<f64> {
        match self {
            StandardGate::P(t)
            | StandardGate::Rx(t)
            | StandardGate::Ry(t)
            | StandardGate::Rz(t) => Some(*t),
            _ => None,
        }
    }

    /// The inverse gate.
    pub fn adjoint(&self) -> StandardGate {
        match *self {
            StandardGate::S => StandardGate::P(-PI / 2.0),
            StandardGate::T => StandardGate::P(-PI / 4.0),
            StandardGate::P(t) => StandardGate::P(-t),
            StandardGate::Rx(t) => StandardGate::Rx(-t),
            StandardGate::Ry(t) => StandardGate::Ry(-t),
            StandardGate::Rz(t) => StandardGate::Rz(-t),
            g => g,
        }
    }

    /// The unitary matrix of this gate.
    pub fn matrix(&self) -> Operator {
        let c = Complex64::new;
        match *self {
            StandardGate::I => identity(2),
            StandardGate::X => from_rows([[ZERO, ONE], [ONE, ZERO]]),
            StandardGate::Y => from_rows([[ZERO, c(0.0, -1.0)], [c(0.0, 1.0), ZERO]]),
            StandardGate::Z => from_rows([[ONE, ZERO], [ZERO, -ONE]]),
            StandardGate::H => {
                let h = c(FRAC_1_SQRT_2, 0.0);
                from_rows([[h, h], [h, -h]])
            }
            StandardGate::S => phase(PI / 2.0),
            StandardGate::T => phase(PI / 4.0),
            StandardGate::P(theta) => phase(theta),
            StandardGate::Rx(theta) => {
                let (s, co) = (theta / 2.0).sin_cos();
                from_rows([[c(co, 0.0), c(0.0, -s)], [c(0.0, -s), c(co, 0.0)]])
            }
            StandardGate::Ry(theta) => {
                let (s, co) = (theta / 2.0).sin_cos();
                from_rows([[c(co, 0.0), c(-s, 0.0)], [c(s, 0.0), c(co, 0.0)]])
            }
            StandardGate::Rz(theta) => from_rows([
                [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
                [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
            ]),
            StandardGate::Swap => from_rows([
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ZERO, ONE, ZERO],
                [ZERO, ONE, ZERO, ZERO],
                [ZERO, ZERO, ZERO, ONE],
            ]),
        }
    }
}

fn phase(theta: f64) -> Operator {
    from_rows([[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, theta)]])
}

/// Block-diagonal controlled operator `diag(I, U)`.
///
/// The control is the most significant qubit of the result, so on targets
/// `[control, t...]` the operator applies `U` to `t...` iff `control` is |1⟩.
pub fn controlled(u: &Operator) -> Operator {
    multi_controlled(u, 1)
}

/// Apply `u` only when all `num_controls` leading qubits are |1⟩.
pub fn multi_controlled(u: &Operator, num_controls: u32) -> Operator {
    let d = u.nrows();
    let total = d << num_controls;
    let mut out = identity(total);
    out.slice_mut(s![total - d.., total - d..]).assign(u);
    out
}

/// A user-supplied unitary gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: u32,
    /// The unitary matrix (2^n × 2^n).
    pub matrix: Operator,
}

impl CustomGate {
    /// Create a custom gate, rejecting matrices that are not unitary within
    /// [`DEFAULT_TOLERANCE`].
    pub fn new(name: impl Into<String>, matrix: Operator) -> IrResult<Self> {
        Self::with_tolerance(name, matrix, DEFAULT_TOLERANCE)
    }

    /// Create a custom gate with an explicit unitarity tolerance.
    pub fn with_tolerance(name: impl Into<String>, matrix: Operator, tol: f64) -> IrResult<Self> {
        let name = name.into();
        let num_qubits = linalg::operator_qubits(&matrix)?;
        let deviation = linalg::unitarity_deviation(&matrix);
        if deviation > tol {
            return Err(IrError::NonUnitaryOperator {
                name,
                deviation,
                tolerance: tol,
            });
        }
        Ok(Self {
            name,
            num_qubits,
            matrix,
        })
    }
}

/// A quantum gate: standard, controlled or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// `base` applied iff all leading `num_controls` targets are |1⟩.
    Controlled {
        /// The controlled operation.
        base: Box<GateKind>,
        /// Number of control qubits.
        num_controls: u32,
    },
    /// A custom unitary gate.
    Custom(CustomGate),
}

impl GateKind {
    /// Wrap `base` with `num_controls` control qubits.
    pub fn controlled(base: impl Into<GateKind>, num_controls: u32) -> Self {
        match base.into() {
            GateKind::Controlled {
                base,
                num_controls: inner,
            } => GateKind::Controlled {
                base,
                num_controls: inner + num_controls,
            },
            base => GateKind::Controlled {
                base: Box::new(base),
                num_controls,
            },
        }
    }

    /// Get the name of this gate, e.g. `"h"`, `"cx"`, `"ccz"`.
    pub fn name(&self) -> String {
        match self {
            GateKind::Standard(g) => g.name().to_string(),
            GateKind::Controlled { base, num_controls } => {
                format!("{}{}", "c".repeat(*num_controls as usize), base.name())
            }
            GateKind::Custom(g) => g.name.clone(),
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Controlled { base, num_controls } => base.num_qubits() + num_controls,
            GateKind::Custom(g) => g.num_qubits,
        }
    }

    /// The bound classical parameter, if any.
    pub fn parameter(&self) -> Option<f64> {
        match self {
            GateKind::Standard(g) => g.parameter(),
            GateKind::Controlled { base, .. } => base.parameter(),
            GateKind::Custom(_) => None,
        }
    }

    /// Resolve the gate to its unitary matrix.
    pub fn to_matrix(&self) -> Operator {
        match self {
            GateKind::Standard(g) => g.matrix(),
            GateKind::Controlled { base, num_controls } => {
                multi_controlled(&base.to_matrix(), *num_controls)
            }
            GateKind::Custom(g) => g.matrix.clone(),
        }
    }

    /// The inverse gate.
    pub fn adjoint(&self) -> GateKind {
        match self {
            GateKind::Standard(g) => GateKind::Standard(g.adjoint()),
            GateKind::Controlled { base, num_controls } => GateKind::Controlled {
                base: Box::new(base.adjoint()),
                num_controls: *num_controls,
            },
            GateKind::Custom(g) => GateKind::Custom(CustomGate {
                name: format!("{}_dg", g.name),
                num_qubits: g.num_qubits,
                matrix: conjugate_transpose(&g.matrix),
            }),
        }
    }
}

impl From<StandardGate> for GateKind {
    fn from(gate: StandardGate) -> Self {
        GateKind::Standard(gate)
    }
}

impl From<CustomGate> for GateKind {
    fn from(gate: CustomGate) -> Self {
        GateKind::Custom(gate)
    }
}

/// A gate with associated metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
    /// Name of the logical block this gate was inlined from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Create a new gate from any gate kind.
    pub fn new(kind: impl Into<GateKind>) -> Self {
        Self {
            kind: kind.into(),
            label: None,
        }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> String {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// Resolve the gate to its unitary matrix.
    pub fn to_matrix(&self) -> Operator {
        self.kind.to_matrix()
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::new(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::new(gate)
    }
}

impl From<GateKind> for Gate {
    fn from(kind: GateKind) -> Self {
        Gate::new(kind)
    }
}
