//! Tests for quantum phase estimation.

use std::f64::consts::PI;

use qucode_algo::{phase_estimation, phase_estimation_with_preparation, phase_from_readout};
use qucode_ir::linalg::{Operator, kron};
use qucode_ir::{Circuit, QubitId, StandardGate};
use qucode_sim::{SimConfig, run};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("qucode_algo=debug"))
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// Probability of each counting-register readout, marginalising the rest.
fn readout_distribution(circuit: &Circuit, counting_qubits: u32) -> Vec<f64> {
    let register = run(circuit, &SimConfig::default()).unwrap();
    let mask = (1usize << counting_qubits) - 1;
    let mut dist = vec![0.0; 1 << counting_qubits];
    for (i, p) in register.probabilities().into_iter().enumerate() {
        dist[i & mask] += p;
    }
    dist
}

fn estimate(unitary: &Operator, counting_qubits: u32, preparation: &Circuit) -> Vec<f64> {
    let circuit =
        phase_estimation_with_preparation(unitary, counting_qubits, Some(preparation)).unwrap();
    readout_distribution(&circuit, counting_qubits)
}

fn flip_all(n: u32) -> Circuit {
    let mut c = Circuit::new("prep", n);
    for q in 0..n {
        c.x(QubitId(q)).unwrap();
    }
    c
}

// ---------------------------------------------------------------------------
// Exact phases
// ---------------------------------------------------------------------------

#[test]
fn t_gate_phase_is_one_eighth() {
    init_tracing();
    let dist = estimate(&StandardGate::T.matrix(), 3, &flip_all(1));
    assert!((dist[1] - 1.0).abs() < 1e-10, "{dist:?}");
    assert_eq!(phase_from_readout(1, 3), 0.125);
}

#[test]
fn every_exact_phase_is_recovered() {
    let t = 4;
    for k in 0..16usize {
        let phi = k as f64 / 16.0;
        let u = StandardGate::P(2.0 * PI * phi).matrix();
        let dist = estimate(&u, t, &flip_all(1));
        assert!((dist[k] - 1.0).abs() < 1e-9, "k={k}: {dist:?}");
    }
}

#[test]
fn eigenvalue_one_reads_zero() {
    // |0⟩ is an eigenvector of any phase gate with eigenvalue 1.
    let circuit = phase_estimation(&StandardGate::S.matrix(), 3).unwrap();
    let dist = readout_distribution(&circuit, 3);
    assert!((dist[0] - 1.0).abs() < 1e-10);
}

#[test]
fn two_qubit_unitary_adds_phases() {
    // Eigenvector |11⟩ of P(a) ⊗ P(b) has phase a + b.
    let a = 2.0 * PI * 0.125;
    let b = 2.0 * PI * 0.25;
    let u = kron(&StandardGate::P(a).matrix(), &StandardGate::P(b).matrix());
    let dist = estimate(&u, 3, &flip_all(2));
    // (0.125 + 0.25) · 8 = 3.
    assert!((dist[3] - 1.0).abs() < 1e-10, "{dist:?}");
}

// ---------------------------------------------------------------------------
// Inexact phases
// ---------------------------------------------------------------------------

#[test]
fn inexact_phase_peaks_at_nearest_readout() {
    // φ = 0.3 → 2.4 on 3 bits: 2 is the most likely readout.
    let u = StandardGate::P(2.0 * PI * 0.3).matrix();
    let dist = estimate(&u, 3, &flip_all(1));
    let best = (0..dist.len())
        .max_by(|&i, &j| dist[i].total_cmp(&dist[j]))
        .unwrap();
    assert_eq!(best, 2);
    assert!((dist.iter().sum::<f64>() - 1.0).abs() < 1e-10);
}
