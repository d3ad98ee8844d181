//! `qucode-algo`: textbook quantum algorithms on the QuCode simulator.
//!
//! Every algorithm is a circuit builder returning a [`qucode_ir::Circuit`],
//! which is then executed or sampled with `qucode-sim`:
//!
//! - **QFT**: [`qft`] / [`inverse_qft`], the exact DFT on the little-endian
//!   register
//! - **Grover search**: [`grover_oracle`], [`grover_diffusion`],
//!   [`grover_search`]
//! - **Phase estimation**: [`phase_estimation`] for any unitary matrix
//! - **Order finding**: [`order`] with continued-fraction post-processing
//!   and the modular multiplication unitary used for factoring
//! - **Variational loop**: [`variational::minimize`] over Pauli-sum
//!   [`Hamiltonian`]s with a pluggable classical [`Optimizer`]
//!
//! # Quick start
//!
//! ```rust
//! use qucode_algo::grover_search;
//! use qucode_ir::BitString;
//! use qucode_sim::{SimConfig, run};
//!
//! let target: BitString = "101".parse().unwrap();
//! let circuit = grover_search(3, &target).unwrap();
//! let register = run(&circuit, &SimConfig::default()).unwrap();
//!
//! // The marked state dominates after two rounds.
//! assert!(register.probabilities()[target.to_index()] > 0.9);
//! ```

pub mod error;
pub mod grover;
pub mod hamiltonian;
pub mod order;
pub mod phase_estimation;
pub mod qft;
pub mod variational;

pub use error::{AlgoError, AlgoResult};
pub use grover::{grover_diffusion, grover_iterations, grover_oracle, grover_search};
pub use hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
pub use phase_estimation::{phase_estimation, phase_estimation_with_preparation, phase_from_readout};
pub use qft::{inverse_qft, qft};
pub use variational::{
    Gradient, GradientDescent, Optimizer, StepOutcome, VariationalConfig, VariationalResult,
    minimize,
};
