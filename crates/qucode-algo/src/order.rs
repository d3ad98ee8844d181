//! Order finding and its classical post-processing.
//!
//! Phase estimation of the modular multiplication unitary
//! `U|y⟩ = |a·y mod N⟩` on the eigenvector mix `|1⟩` yields phases `s/r`
//! where `r` is the multiplicative order of `a` mod `N`. The order is
//! recovered from a readout by continued-fraction expansion, and a factor of
//! `N` follows from `gcd(a^(r/2) ± 1, N)` when `r` is even.

use ndarray::Array2;
use tracing::debug;

use qucode_ir::linalg::{Operator, ONE, ZERO};
use qucode_ir::{Circuit, QubitId};

use crate::error::{AlgoError, AlgoResult};
use crate::phase_estimation::phase_estimation_with_preparation;

/// Greatest common divisor.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `base^exp mod modulus` by square-and-multiply.
pub fn mod_pow(base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let m = u128::from(modulus);
    let mut result = 1u128;
    let mut b = u128::from(base) % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * b % m;
        }
        b = b * b % m;
        exp >>= 1;
    }
    result as u64
}

/// Smallest `a ≥ 2` coprime to `n`, if any.
pub fn find_coprime(n: u64) -> Option<u64> {
    (2..n).find(|&a| gcd(a, n) == 1)
}

/// Continued-fraction coefficients `[a0; a1, a2, ...]` of `numerator / denominator`.
///
/// Empty when `denominator` is zero.
pub fn continued_fraction(mut numerator: u64, mut denominator: u64) -> Vec<u64> {
    let mut coefficients = Vec::new();
    while denominator != 0 {
        coefficients.push(numerator / denominator);
        (numerator, denominator) = (denominator, numerator % denominator);
    }
    coefficients
}

/// Successive convergents `p_k / q_k` of a continued fraction.
pub fn convergents(coefficients: &[u64]) -> Vec<(u64, u64)> {
    let (mut p_prev, mut p) = (1u64, 0u64);
    let (mut q_prev, mut q) = (0u64, 1u64);
    coefficients
        .iter()
        .map(|&a| {
            let p_next = a.saturating_mul(p_prev).saturating_add(p);
            let q_next = a.saturating_mul(q_prev).saturating_add(q);
            (p, p_prev) = (p_prev, p_next);
            (q, q_prev) = (q_prev, q_next);
            (p_prev, q_prev)
        })
        .collect()
}

/// Recover the order of `a` mod `n` from a phase-estimation readout.
///
/// `readout / 2^t` approximates `s/r`. For each convergent denominator
/// `1 < q ≤ n` the smallest multiple `m` with `a^m ≡ 1 (mod n)` is a
/// candidate (multiples cover `gcd(s, r) > 1`). Every candidate is a multiple
/// of the order, so the smallest one is returned. `None` for an uninformative
/// readout such as 0.
pub fn order_from_phase(readout: u64, counting_qubits: u32, a: u64, n: u64) -> Option<u64> {
    let denominator = 1u64.checked_shl(counting_qubits)?;
    convergents(&continued_fraction(readout, denominator))
        .into_iter()
        .filter(|&(p, q)| p > 0 && q > 1 && q <= n)
        .filter_map(|(_, q)| {
            (1..=n / q)
                .map(|k| k * q)
                .find(|&r| mod_pow(a, r, n) == 1)
        })
        .min()
}

/// Split `n` using the order `r` of `a`: `gcd(a^(r/2) - 1, n)` and its cofactor.
///
/// `None` when `r` is odd or `a^(r/2) ≡ -1 (mod n)`.
pub fn factor_from_order(a: u64, r: u64, n: u64) -> Option<(u64, u64)> {
    if r == 0 || r % 2 != 0 || n < 2 {
        return None;
    }
    let half = mod_pow(a, r / 2, n);
    if half == n - 1 {
        return None;
    }
    let f = gcd((half + n - 1) % n, n);
    if f == 1 || f == n {
        return None;
    }
    let other = n / f;
    Some((f.min(other), f.max(other)))
}

/// Permutation unitary `|y⟩ → |a·y mod n⟩` for `y < n`, identity on `y ≥ n`,
/// over `num_qubits` qubits.
///
/// Requires `gcd(a, n) = 1` (otherwise the map is not a bijection) and
/// `2^num_qubits ≥ n`.
pub fn modular_multiplication_unitary(a: u64, n: u64, num_qubits: u32) -> AlgoResult<Operator> {
    if n < 2 || gcd(a, n) != 1 {
        return Err(AlgoError::InvalidParameter(format!(
            "{a} is not invertible mod {n}"
        )));
    }
    let dim = 1u64.checked_shl(num_qubits).filter(|&d| d >= n).ok_or_else(|| {
        AlgoError::InvalidParameter(format!("{num_qubits} qubits cannot hold residues mod {n}"))
    })? as usize;

    let mut u = Array2::from_elem((dim, dim), ZERO);
    for y in 0..dim as u64 {
        let image = if y < n { a % n * y % n } else { y };
        u[[image as usize, y as usize]] = ONE;
    }
    Ok(u)
}

/// Order-finding circuit for `a` mod `n` with `counting_qubits` of precision.
///
/// The work register holds `ceil(log2 n)` qubits, initialised to `|1⟩`. Its
/// first qubit is the most significant bit of `y`.
pub fn order_finding_circuit(a: u64, n: u64, counting_qubits: u32) -> AlgoResult<Circuit> {
    if n < 2 {
        return Err(AlgoError::InvalidParameter(format!(
            "cannot find orders mod {n}"
        )));
    }
    let work_qubits = u64::BITS - (n - 1).leading_zeros();
    let unitary = modular_multiplication_unitary(a, n, work_qubits)?;

    let mut preparation = Circuit::new("load_one", work_qubits);
    preparation.x(QubitId(work_qubits - 1))?;

    let circuit =
        phase_estimation_with_preparation(&unitary, counting_qubits, Some(&preparation))?;
    debug!(a, n, counting_qubits, work_qubits, "built order-finding circuit");
    Ok(circuit)
}
