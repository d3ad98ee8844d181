//! Repeated-shot sampling and the measurement histogram.

use std::time::Instant;

use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use qucode_ir::{BitString, Circuit};

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::execute::execute;
use crate::register::Register;

/// Measurement histogram: bitstring (qubit 0 first) → number of shots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Record one shot.
    pub fn record(&mut self, bits: &BitString) {
        self.insert(bits.to_string(), 1);
    }

    /// Observations of `bitstring`, zero if never seen.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of shots recorded.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(bitstring, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// The most frequent outcome; ties break towards the smaller bitstring.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.iter()
            .max_by(|(ka, va), (kb, vb)| va.cmp(vb).then_with(|| kb.cmp(ka)))
    }

    /// Empirical probability of `bitstring`.
    pub fn probability(&self, bitstring: &str) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.get(bitstring) as f64 / total as f64
        }
    }

    /// Outcomes sorted by bitstring.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Execute `circuit` `shots` times on fresh registers and histogram the
/// `measure_all` outcomes.
///
/// Each shot owns its register, so no state is shared between shots. With a
/// seeded `rng` the histogram is reproducible.
#[instrument(skip(circuit, rng, config), fields(circuit = circuit.name(), num_qubits = circuit.num_qubits()))]
pub fn sample<R: Rng + ?Sized>(
    circuit: &Circuit,
    shots: u32,
    rng: &mut R,
    config: &SimConfig,
) -> SimResult<Counts> {
    let start = Instant::now();
    let mut counts = Counts::new();

    for shot in 0..shots {
        let mut register = Register::with_config(circuit.num_qubits(), config)?;
        execute(circuit, &mut register)?;
        let outcome = register.measure_all(rng);
        counts.record(&outcome.bits);

        if shot > 0 && shot % 1000 == 0 {
            debug!(shot, "sampling progress");
        }
    }

    debug!(shots, distinct = counts.len(), elapsed = ?start.elapsed(), "sampling completed");
    Ok(counts)
}
