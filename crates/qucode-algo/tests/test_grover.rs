//! Tests for Grover search.

use qucode_algo::{grover_diffusion, grover_oracle, grover_search};
use qucode_ir::linalg::identity;
use qucode_ir::{BitString, QubitId};
use qucode_sim::{SimConfig, run, sample};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn target(s: &str) -> BitString {
    s.parse().unwrap()
}

// ---------------------------------------------------------------------------
// Oracle
// ---------------------------------------------------------------------------

#[test]
fn oracle_flips_only_target_phase() {
    let t = target("101");
    let m = grover_oracle(3, &t).unwrap().to_matrix().unwrap();
    for i in 0..8 {
        let expected = if i == t.to_index() { -1.0 } else { 1.0 };
        assert!((m[[i, i]].re - expected).abs() < 1e-12, "diag {i}");
        assert!(m[[i, i]].im.abs() < 1e-12);
    }
}

#[test]
fn oracle_twice_is_identity() {
    for s in ["0", "1", "10", "011", "1100"] {
        let t = target(s);
        let n = t.len() as u32;
        let oracle = grover_oracle(n, &t).unwrap();
        let mut twice = oracle.clone();
        let all: Vec<QubitId> = (0..n).map(QubitId).collect();
        twice.append_subcircuit(&oracle, &all).unwrap();

        let m = twice.to_matrix().unwrap();
        for (a, b) in m.iter().zip(identity(1 << n).iter()) {
            assert!((a - b).norm() < 1e-10, "target {s}");
        }
    }
}

#[test]
fn diffusion_is_self_inverse() {
    let d = grover_diffusion(3).unwrap().to_matrix().unwrap();
    let dd = d.dot(&d);
    for (a, b) in dd.iter().zip(identity(8).iter()) {
        assert!((a - b).norm() < 1e-10);
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[test]
fn search_three_qubits_finds_target() {
    let t = target("101");
    let register = run(&grover_search(3, &t).unwrap(), &SimConfig::default()).unwrap();
    let p = register.probabilities()[t.to_index()];
    assert!(p > 0.9, "p = {p}");
}

#[test]
fn search_every_two_qubit_target_is_certain() {
    // One round on 4 items is exact.
    for s in ["00", "10", "01", "11"] {
        let t = target(s);
        let register = run(&grover_search(2, &t).unwrap(), &SimConfig::default()).unwrap();
        assert!((register.probabilities()[t.to_index()] - 1.0).abs() < 1e-10);
    }
}

#[test]
fn sampled_search_reports_target_most_often() {
    let t = target("0110");
    let mut rng = StdRng::seed_from_u64(17);
    let counts = sample(&grover_search(4, &t).unwrap(), 500, &mut rng, &SimConfig::default())
        .unwrap();
    let (best, _) = counts.most_frequent().unwrap();
    assert_eq!(best, "0110");
}
