//! Dense complex linear algebra.
//!
//! Every matrix and vector operation in the workspace goes through this
//! module: gates resolve to [`Operator`]s, registers apply them with the index
//! helpers below, and algorithm builders compose them with [`kron`] and
//! [`matrix_power`].
//!
//! # Operator ordering
//!
//! When an operator of dimension 2^k acts on targets `[t0, t1, ..., t(k-1)]`,
//! `t0` is the most significant bit of the operator's local index. A statevector
//! index, on the other hand, is little-endian: bit `i` is qubit `i`. So
//! `kron(a, b)` on targets `[0, 1]` applies `a` to qubit 0 and `b` to qubit 1.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{IrError, IrResult};
use crate::qubit::{QubitId, validate_targets};

/// A square complex matrix of dimension 2^k.
pub type Operator = Array2<Complex64>;

/// Default tolerance for unitarity, Hermiticity and normalization checks.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Complex zero.
pub const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Complex one.
pub const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Build an operator from row-major rows.
pub fn from_rows<const N: usize>(rows: [[Complex64; N]; N]) -> Operator {
    Array2::from_shape_fn((N, N), |(r, c)| rows[r][c])
}

/// Identity of dimension `dim`.
pub fn identity(dim: usize) -> Operator {
    Array2::from_diag_elem(dim, ONE)
}

/// Kronecker (tensor) product `a ⊗ b`.
///
/// The result has shape `(r1·r2, c1·c2)` and entry
/// `[(i·r2 + m), (j·c2 + n)] = a[i][j] · b[m][n]`.
pub fn kron(a: &Operator, b: &Operator) -> Operator {
    let (ar, ac) = a.dim();
    let (br, bc) = b.dim();
    let mut out = Array2::from_elem((ar * br, ac * bc), ZERO);
    for ((i, j), &aij) in a.indexed_iter() {
        if aij == ZERO {
            continue;
        }
        for ((m, n), &bmn) in b.indexed_iter() {
            out[[i * br + m, j * bc + n]] = aij * bmn;
        }
    }
    out
}

/// Tensor product of two state vectors, `a` being the more significant factor.
pub fn kron_vec(a: &[Complex64], b: &[Complex64]) -> Vec<Complex64> {
    a.iter()
        .flat_map(|&x| b.iter().map(move |&y| x * y))
        .collect()
}

/// Matrix product `a · b`.
pub fn matmul(a: &Operator, b: &Operator) -> IrResult<Operator> {
    if a.ncols() != b.nrows() {
        return Err(IrError::DimensionMismatch {
            op: "matmul",
            left: a.dim(),
            right: b.dim(),
        });
    }
    Ok(a.dot(b))
}

/// Matrix-vector product `m · v`.
pub fn matvec(m: &Operator, v: &[Complex64]) -> IrResult<Vec<Complex64>> {
    if m.ncols() != v.len() {
        return Err(IrError::DimensionMismatch {
            op: "matvec",
            left: m.dim(),
            right: (v.len(), 1),
        });
    }
    Ok(m.rows()
        .into_iter()
        .map(|row| row.iter().zip(v).map(|(&a, &b)| a * b).sum())
        .collect())
}

/// Inner product `⟨a|b⟩`, conjugate-linear in `a`.
pub fn inner(a: &[Complex64], b: &[Complex64]) -> IrResult<Complex64> {
    if a.len() != b.len() {
        return Err(IrError::DimensionMismatch {
            op: "inner",
            left: (a.len(), 1),
            right: (b.len(), 1),
        });
    }
    Ok(a.iter().zip(b).map(|(x, &y)| x.conj() * y).sum())
}

/// Outer product `|a⟩⟨b|`.
pub fn outer(a: &[Complex64], b: &[Complex64]) -> IrResult<Operator> {
    if a.is_empty() || b.is_empty() {
        return Err(IrError::DimensionMismatch {
            op: "outer",
            left: (a.len(), 1),
            right: (b.len(), 1),
        });
    }
    Ok(Array2::from_shape_fn((a.len(), b.len()), |(r, c)| {
        a[r] * b[c].conj()
    }))
}

/// Conjugate transpose `m†`.
pub fn conjugate_transpose(m: &Operator) -> Operator {
    m.t().mapv(|z| z.conj())
}

/// Largest elementwise distance between `m` and the identity.
fn deviation_from_identity(m: &Operator) -> f64 {
    m.indexed_iter()
        .map(|((r, c), &z)| (z - if r == c { ONE } else { ZERO }).norm())
        .fold(0.0, f64::max)
}

/// Largest elementwise deviation of `m†m` from the identity.
///
/// Returns `f64::INFINITY` for non-square matrices.
pub fn unitarity_deviation(m: &Operator) -> f64 {
    if !m.is_square() {
        return f64::INFINITY;
    }
    deviation_from_identity(&conjugate_transpose(m).dot(m))
}

/// True iff `m†m` equals the identity within `tol` elementwise.
pub fn is_unitary(m: &Operator, tol: f64) -> bool {
    unitarity_deviation(m) <= tol
}

/// True iff `m` equals its conjugate transpose within `tol` elementwise.
pub fn is_hermitian(m: &Operator, tol: f64) -> bool {
    m.is_square()
        && m.indexed_iter()
            .all(|((r, c), &z)| (z - m[[c, r]].conj()).norm() <= tol)
}

/// `m^exp` by repeated squaring.
pub fn matrix_power(m: &Operator, mut exp: u64) -> IrResult<Operator> {
    if !m.is_square() {
        return Err(IrError::DimensionMismatch {
            op: "matrix_power",
            left: m.dim(),
            right: m.dim(),
        });
    }
    let mut result = identity(m.nrows());
    let mut base = m.clone();
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.dot(&base);
        }
        exp >>= 1;
        if exp > 0 {
            base = base.dot(&base);
        }
    }
    Ok(result)
}

/// Number of qubits a square power-of-two operator acts on.
pub fn operator_qubits(m: &Operator) -> IrResult<u32> {
    let dim = m.nrows();
    if !m.is_square() || !dim.is_power_of_two() {
        return Err(IrError::DimensionMismatch {
            op: "operator_qubits",
            left: m.dim(),
            right: (dim.next_power_of_two(), dim.next_power_of_two()),
        });
    }
    Ok(dim.trailing_zeros())
}

/// Extract the operator-local index of the target bits of `global`.
///
/// `targets[0]` becomes the most significant local bit.
#[inline]
pub fn local_index(global: usize, targets: &[usize]) -> usize {
    let k = targets.len();
    targets
        .iter()
        .enumerate()
        .fold(0, |acc, (pos, &t)| acc | (((global >> t) & 1) << (k - 1 - pos)))
}

/// Spread an operator-local index back onto the target bit positions.
#[inline]
pub fn scatter_local(local: usize, targets: &[usize]) -> usize {
    let k = targets.len();
    targets
        .iter()
        .enumerate()
        .fold(0, |acc, (pos, &t)| acc | (((local >> (k - 1 - pos)) & 1) << t))
}

/// Expand `op` acting on `targets` to the full `2^n × 2^n` operator.
///
/// Built as a sum over basis states: column `j` of the result maps to
/// `op[r, local(j)]` at row `base(j) | scatter(r)`. The result equals direct
/// tensoring of identities at non-target positions with `op` at the targets,
/// in the target order given.
pub fn embed(op: &Operator, targets: &[QubitId], num_qubits: u32) -> IrResult<Operator> {
    check_operator_targets(op, targets, num_qubits)?;
    let targets: Vec<usize> = targets.iter().map(|q| q.index()).collect();
    let mask = scatter_local((1 << targets.len()) - 1, &targets);
    let dim = 1usize << num_qubits;
    let local_dim = op.nrows();

    let mut full = Array2::from_elem((dim, dim), ZERO);
    for col in 0..dim {
        let c = local_index(col, &targets);
        let base = col & !mask;
        for r in 0..local_dim {
            let v = op[[r, c]];
            if v != ZERO {
                full[[base | scatter_local(r, &targets), col]] = v;
            }
        }
    }
    Ok(full)
}

/// Validate that `op` is a square 2^k operator and `targets` are `k` distinct
/// in-range qubits.
pub fn check_operator_targets(op: &Operator, targets: &[QubitId], num_qubits: u32) -> IrResult<()> {
    let k = operator_qubits(op)?;
    if targets.len() != k as usize {
        return Err(IrError::InvalidTargets {
            targets: targets.iter().map(|q| q.0).collect(),
            num_qubits,
            reason: format!("operator acts on {k} qubits"),
        });
    }
    validate_targets(targets, num_qubits, None)
}
