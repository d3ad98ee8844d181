//! Tests for register evolution, readout and circuit execution.

use num_complex::Complex64;
use qucode_ir::linalg::{self, identity, kron};
use qucode_ir::{Circuit, GateKind, IrError, QubitId, StandardGate};
use qucode_sim::{Register, SimConfig, SimError, execute, run};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("qucode_sim=debug"))
        .with_target(false)
        .with_test_writer()
        .try_init();
}

fn assert_probs(register: &Register, expected: &[f64]) {
    let probs = register.probabilities();
    assert_eq!(probs.len(), expected.len());
    for (i, (p, e)) in probs.iter().zip(expected).enumerate() {
        assert!((p - e).abs() < 1e-10, "p[{i}] = {p}, expected {e}");
    }
}

// ---------------------------------------------------------------------------
// Operator placement
// ---------------------------------------------------------------------------

#[test]
fn kron_identity_x_flips_second_qubit() {
    let x = StandardGate::X.matrix();
    let mut register = Register::new(2).unwrap();
    register
        .apply(&kron(&identity(2), &x), &[QubitId(0), QubitId(1)])
        .unwrap();
    // Qubit 1 set → index 2.
    assert_probs(&register, &[0.0, 0.0, 1.0, 0.0]);
}

#[test]
fn kron_x_identity_flips_first_qubit() {
    let x = StandardGate::X.matrix();
    let mut register = Register::new(2).unwrap();
    register
        .apply(&kron(&x, &identity(2)), &[QubitId(0), QubitId(1)])
        .unwrap();
    assert_probs(&register, &[0.0, 1.0, 0.0, 0.0]);
}

#[test]
fn controlled_gate_lists_control_first() {
    let mut register = Register::new(2).unwrap();
    register
        .apply_gate(&StandardGate::X.into(), &[QubitId(1)])
        .unwrap();
    // Control on qubit 1, target qubit 0: |10⟩ → |11⟩.
    register
        .apply_gate(
            &GateKind::controlled(StandardGate::X, 1),
            &[QubitId(1), QubitId(0)],
        )
        .unwrap();
    assert_probs(&register, &[0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn toffoli_on_non_adjacent_qubits() {
    let mut circuit = Circuit::new("toffoli", 4);
    circuit
        .x(QubitId(0))
        .unwrap()
        .x(QubitId(3))
        .unwrap()
        .mcx(&[QubitId(0), QubitId(3)], QubitId(1))
        .unwrap();
    let register = run(&circuit, &SimConfig::default()).unwrap();
    let mut expected = vec![0.0; 16];
    expected[0b1011] = 1.0;
    assert_probs(&register, &expected);
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

#[test]
fn product_circuit_matches_tensor_of_states() {
    let h = std::f64::consts::FRAC_1_SQRT_2;
    let plus = [Complex64::new(h, 0.0), Complex64::new(h, 0.0)];
    let one = [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)];

    let mut circuit = Circuit::new("product", 2);
    circuit.h(QubitId(0)).unwrap();
    circuit.x(QubitId(1)).unwrap();
    let register = run(&circuit, &SimConfig::default()).unwrap();

    // Qubit 1 is the more significant factor.
    let expected = linalg::kron_vec(&one, &plus);
    for (a, e) in register.amplitudes().iter().zip(&expected) {
        assert!((a - e).norm() < 1e-12);
    }
}

#[test]
fn bell_state_probabilities() {
    init_tracing();
    let register = run(&Circuit::bell().unwrap(), &SimConfig::default()).unwrap();
    assert_probs(&register, &[0.5, 0.0, 0.0, 0.5]);
}

#[test]
fn ghz_state_probabilities() {
    let register = run(&Circuit::ghz(4).unwrap(), &SimConfig::default()).unwrap();
    let mut expected = vec![0.0; 16];
    expected[0] = 0.5;
    expected[15] = 0.5;
    assert_probs(&register, &expected);
}

#[test]
fn execute_matches_circuit_matrix() {
    let mut circuit = Circuit::new("mixed", 3);
    circuit
        .h(QubitId(0))
        .unwrap()
        .ry(0.4, QubitId(2))
        .unwrap()
        .cp(1.1, QubitId(2), QubitId(1))
        .unwrap()
        .swap(QubitId(0), QubitId(2))
        .unwrap()
        .t(QubitId(1))
        .unwrap();

    let register = run(&circuit, &SimConfig::default()).unwrap();
    let matrix = circuit.to_matrix().unwrap();
    for (i, amp) in register.amplitudes().iter().enumerate() {
        assert!((amp - matrix[[i, 0]]).norm() < 1e-10);
    }
}

#[test]
fn circuit_then_inverse_restores_zero_state() {
    let mut circuit = Circuit::new("walk", 3);
    circuit
        .h(QubitId(0))
        .unwrap()
        .rx(0.3, QubitId(1))
        .unwrap()
        .cx(QubitId(0), QubitId(2))
        .unwrap()
        .s(QubitId(2))
        .unwrap();

    let mut register = run(&circuit, &SimConfig::default()).unwrap();
    execute(&circuit.inverse(), &mut register).unwrap();
    assert_probs(&register, &[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn execute_stops_on_size_mismatch() {
    let mut register = Register::new(1).unwrap();
    assert!(matches!(
        execute(&Circuit::bell().unwrap(), &mut register),
        Err(SimError::Ir(IrError::QubitCountMismatch { .. }))
    ));
    assert_probs(&register, &[1.0, 0.0]);
}

// ---------------------------------------------------------------------------
// Readout
// ---------------------------------------------------------------------------

#[test]
fn expectation_of_zz_on_bell_state() {
    let register = run(&Circuit::bell().unwrap(), &SimConfig::default()).unwrap();
    let z = StandardGate::Z.matrix();
    let zz = kron(&z, &z);
    assert!((register.expectation(&zz).unwrap() - 1.0).abs() < 1e-12);

    let zi = kron(&z, &identity(2));
    assert!(register.expectation(&zi).unwrap().abs() < 1e-12);
}

#[test]
fn expectation_rejects_non_hermitian() {
    let register = Register::new(1).unwrap();
    let mut m = identity(2);
    m[[0, 1]] = Complex64::new(0.0, 1.0);
    assert!(matches!(
        register.expectation(&m),
        Err(SimError::NotHermitian { .. })
    ));
}

#[test]
fn measure_all_is_irreversible() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut register = run(&Circuit::ghz(3).unwrap(), &SimConfig::default()).unwrap();
    let outcome = register.measure_all(&mut rng);
    assert!(outcome.index == 0 || outcome.index == 7);
    assert_eq!(outcome.bits.to_index(), outcome.index);

    // The superposition is gone: every further measurement agrees.
    for _ in 0..10 {
        assert_eq!(register.measure_all(&mut rng), outcome);
    }
}

#[test]
fn measure_qubit_collapses_partner() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..20 {
        let mut register = run(&Circuit::bell().unwrap(), &SimConfig::default()).unwrap();
        let first = register.measure_qubit(QubitId(0), &mut rng).unwrap();
        let second = register.measure_qubit(QubitId(1), &mut rng).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn bloch_vector_after_ry() {
    let mut register = Register::new(1).unwrap();
    let theta = 0.7;
    register
        .apply(&StandardGate::Ry(theta).matrix(), &[QubitId(0)])
        .unwrap();
    let [x, y, z] = register.bloch_vector().unwrap();
    assert!((x - theta.sin()).abs() < 1e-12);
    assert!(y.abs() < 1e-12);
    assert!((z - theta.cos()).abs() < 1e-12);
}

#[test]
fn tolerance_from_config_governs_unitarity() {
    let mut m = StandardGate::X.matrix();
    m[[0, 1]] = Complex64::new(1.0 + 1e-6, 0.0);
    assert!(linalg::unitarity_deviation(&m) > 1e-9);

    let mut strict = Register::new(1).unwrap();
    assert!(strict.apply(&m, &[QubitId(0)]).is_err());

    let loose = SimConfig::default().with_tolerance(1e-3);
    let mut register = Register::with_config(1, &loose).unwrap();
    assert!(register.apply(&m, &[QubitId(0)]).is_ok());
}
