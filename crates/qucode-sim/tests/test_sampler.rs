//! Tests for shot sampling.

use qucode_ir::{Circuit, QubitId};
use qucode_sim::{Counts, SimConfig, SimError, sample};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bell_counts(seed: u64, shots: u32) -> Counts {
    let mut rng = StdRng::seed_from_u64(seed);
    sample(&Circuit::bell().unwrap(), shots, &mut rng, &SimConfig::default()).unwrap()
}

// ---------------------------------------------------------------------------
// Histogram shape
// ---------------------------------------------------------------------------

#[test]
fn counts_sum_to_shots() {
    let counts = bell_counts(42, 1000);
    assert_eq!(counts.total(), 1000);
}

#[test]
fn bell_only_correlated_outcomes() {
    let counts = bell_counts(1, 1000);
    assert_eq!(counts.get("00") + counts.get("11"), 1000);
    assert_eq!(counts.get("01"), 0);
    assert_eq!(counts.get("10"), 0);

    // Roughly balanced.
    let p = counts.probability("00");
    assert!((0.4..0.6).contains(&p), "p(00) = {p}");
}

#[test]
fn bitstring_lists_qubit_zero_first() {
    let mut circuit = Circuit::new("x1", 3);
    circuit.x(QubitId(1)).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let counts = sample(&circuit, 10, &mut rng, &SimConfig::default()).unwrap();
    assert_eq!(counts.get("010"), 10);
}

// ---------------------------------------------------------------------------
// Reproducibility
// ---------------------------------------------------------------------------

#[test]
fn same_seed_same_histogram() {
    assert_eq!(bell_counts(7, 500), bell_counts(7, 500));
}

#[test]
fn counts_serialize_to_json() {
    let counts = bell_counts(3, 100);
    let json = serde_json::to_string(&counts).unwrap();
    let back: Counts = serde_json::from_str(&json).unwrap();
    assert_eq!(back, counts);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn sample_rejects_oversized_circuit() {
    let mut rng = StdRng::seed_from_u64(0);
    let config = SimConfig::default().with_max_qubits(2);
    assert!(matches!(
        sample(&Circuit::ghz(3).unwrap(), 10, &mut rng, &config),
        Err(SimError::InvalidQubitCount { .. })
    ));
}
