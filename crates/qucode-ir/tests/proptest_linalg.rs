//! Property-based tests for the linear-algebra core.
//!
//! Operators are drawn from Euler-angle single-qubit unitaries so every
//! product stays unitary.

use proptest::prelude::*;
use qucode_ir::linalg::{
    DEFAULT_TOLERANCE, Operator, embed, identity, is_unitary, kron, matmul,
};
use qucode_ir::{Circuit, QubitId, StandardGate};

fn euler(a: f64, b: f64, c: f64) -> Operator {
    let rz1 = StandardGate::Rz(a).matrix();
    let ry = StandardGate::Ry(b).matrix();
    let rz2 = StandardGate::Rz(c).matrix();
    matmul(&rz2, &matmul(&ry, &rz1).unwrap()).unwrap()
}

fn arb_unitary() -> impl Strategy<Value = Operator> {
    let angle = -std::f64::consts::PI..std::f64::consts::PI;
    (angle.clone(), angle.clone(), angle).prop_map(|(a, b, c)| euler(a, b, c))
}

/// Two distinct qubits out of `n`.
fn arb_pair(n: u32) -> impl Strategy<Value = (u32, u32)> {
    (0..n, 1..n).prop_map(move |(a, off)| (a, (a + off) % n))
}

fn assert_close(a: &Operator, b: &Operator) -> Result<(), TestCaseError> {
    prop_assert_eq!(a.dim(), b.dim());
    for (x, y) in a.iter().zip(b.iter()) {
        prop_assert!((x - y).norm() < 1e-10);
    }
    Ok(())
}

proptest! {
    #[test]
    fn kron_mixed_product(a in arb_unitary(), b in arb_unitary(), c in arb_unitary(), d in arb_unitary()) {
        let left = matmul(&kron(&a, &b), &kron(&c, &d)).unwrap();
        let right = kron(&matmul(&a, &c).unwrap(), &matmul(&b, &d).unwrap());
        assert_close(&left, &right)?;
    }

    #[test]
    fn kron_of_unitaries_is_unitary(a in arb_unitary(), b in arb_unitary()) {
        prop_assert!(is_unitary(&kron(&a, &b), DEFAULT_TOLERANCE));
    }

    #[test]
    fn embed_of_kron_factorises(a in arb_unitary(), b in arb_unitary(), (p, q) in arb_pair(4)) {
        let joint = embed(&kron(&a, &b), &[QubitId(p), QubitId(q)], 4).unwrap();
        let split = matmul(
            &embed(&a, &[QubitId(p)], 4).unwrap(),
            &embed(&b, &[QubitId(q)], 4).unwrap(),
        )
        .unwrap();
        assert_close(&joint, &split)?;
    }

    #[test]
    fn circuit_times_inverse_is_identity(angles in prop::collection::vec(-3.0_f64..3.0, 1..8)) {
        let mut circuit = Circuit::new("rot", 3);
        for (i, &theta) in angles.iter().enumerate() {
            let q = QubitId(i as u32 % 3);
            circuit.ry(theta, q).unwrap();
            circuit.cp(theta, q, QubitId((i as u32 + 1) % 3)).unwrap();
            circuit.s(q).unwrap();
        }
        let forward = circuit.to_matrix().unwrap();
        let backward = circuit.inverse().to_matrix().unwrap();
        assert_close(&matmul(&backward, &forward).unwrap(), &identity(8))?;
    }
}
