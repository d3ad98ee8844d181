//! QuCode Statevector Simulator
//!
//! This crate executes [`qucode_ir::Circuit`]s on an exact statevector. It
//! holds 2^n complex amplitudes, so memory doubles with every qubit; the
//! configured `max_qubits` guards against accidental huge allocations.
//!
//! # Features
//!
//! - **Register**: [`Register`] with in-place gate application, Born-rule
//!   probabilities, collapsing measurement and expectation values
//! - **Execution**: [`execute`] a circuit on an existing register or [`run`] it
//!   on a fresh one
//! - **Sampling**: [`sample`] repeated shots into a [`Counts`] histogram,
//!   reproducible with a seeded RNG
//!
//! # Memory
//!
//! | Qubits | Amplitudes |
//! |--------|------------|
//! | 10 | ~16 KB |
//! | 16 | ~1 MB |
//! | 20 | ~16 MB |
//! | 25 | ~512 MB |
//!
//! # Example
//!
//! ```rust
//! use qucode_ir::Circuit;
//! use qucode_sim::{SimConfig, sample};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let circuit = Circuit::bell().unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! let counts = sample(&circuit, 1000, &mut rng, &SimConfig::default()).unwrap();
//!
//! // Only the correlated outcomes appear.
//! assert_eq!(counts.get("00") + counts.get("11"), 1000);
//! ```

pub mod config;
pub mod error;
pub mod execute;
pub mod register;
pub mod sampler;

pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use execute::{execute, run};
pub use register::{MeasurementOutcome, Register};
pub use sampler::{Counts, sample};
