//! Variational (hybrid quantum-classical) minimisation.
//!
//! Each iteration builds a parameterised circuit, runs it on a fresh register,
//! reads `⟨ψ(θ)|H|ψ(θ)⟩` and hands the parameters and that energy to a
//! classical [`Optimizer`], which either proposes the next parameters or
//! signals convergence. Reaching the iteration cap without a convergence
//! signal fails with [`AlgoError::OptimizerDivergence`].
//!
//! # Example
//!
//! ```rust
//! use qucode_algo::variational::{GradientDescent, VariationalConfig, minimize};
//! use qucode_ir::{Circuit, IrResult, QubitId, StandardGate};
//!
//! // Ground state of Z is |1⟩, reached by Ry(π).
//! let z = StandardGate::Z.matrix();
//! let ansatz = |params: &[f64]| -> IrResult<Circuit> {
//!     let mut circuit = Circuit::new("ry", 1);
//!     circuit.ry(params[0], QubitId(0))?;
//!     Ok(circuit)
//! };
//!
//! let mut optimizer = GradientDescent::new(0.4);
//! let result = minimize(&z, ansatz, &[0.5], &mut optimizer, &VariationalConfig::default()).unwrap();
//! assert!((result.energy + 1.0).abs() < 1e-3);
//! ```

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use qucode_ir::linalg::Operator;
use qucode_ir::{Circuit, IrResult, QubitId};
use qucode_sim::{SimConfig, run};

use crate::error::{AlgoError, AlgoResult};

/// Settings for [`minimize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationalConfig {
    /// Iteration cap before reporting divergence.
    pub max_iterations: usize,
    /// Register settings for every energy evaluation.
    pub sim: SimConfig,
}

impl Default for VariationalConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            sim: SimConfig::default(),
        }
    }
}

impl VariationalConfig {
    /// Set the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the register configuration.
    #[must_use]
    pub fn with_sim(mut self, sim: SimConfig) -> Self {
        self.sim = sim;
        self
    }
}

/// Objective callback handed to an [`Optimizer`].
pub type Objective<'a> = dyn FnMut(&[f64]) -> AlgoResult<f64> + 'a;

/// Result of one [`Optimizer::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Parameters for the next evaluation.
    pub params: Vec<f64>,
    /// The optimizer considers `params` a minimum; the loop stops.
    pub converged: bool,
}

/// A classical optimizer driving the variational loop.
pub trait Optimizer {
    /// Human-readable optimizer name.
    fn name(&self) -> &str;

    /// Given `params` and their `energy`, propose the next parameters or
    /// signal convergence. `objective` may be evaluated as often as needed.
    fn step(
        &mut self,
        params: &[f64],
        energy: f64,
        objective: &mut Objective<'_>,
    ) -> AlgoResult<StepOutcome>;
}

/// Gradient estimator used by [`GradientDescent`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gradient {
    /// `(f(θ + π/2) - f(θ - π/2)) / 2`, exact for `Rx`/`Ry`/`Rz` parameters.
    ParameterShift,
    /// Forward difference `(f(θ + δ) - f(θ)) / δ`.
    FiniteDifference {
        /// Step size δ.
        delta: f64,
    },
}

impl Gradient {
    /// Estimate `∇f` at `params`.
    pub fn estimate(&self, params: &[f64], objective: &mut Objective<'_>) -> AlgoResult<Vec<f64>> {
        let mut shifted = params.to_vec();
        let base = match self {
            Gradient::FiniteDifference { delta } if *delta <= 0.0 => {
                return Err(AlgoError::InvalidParameter(format!(
                    "finite-difference step must be positive, got {delta}"
                )));
            }
            Gradient::FiniteDifference { .. } => Some(objective(params)?),
            Gradient::ParameterShift => None,
        };

        let mut gradient = Vec::with_capacity(params.len());
        for i in 0..params.len() {
            let g = match (self, base) {
                (Gradient::FiniteDifference { delta }, Some(f0)) => {
                    shifted[i] = params[i] + delta;
                    (objective(&shifted)? - f0) / delta
                }
                _ => {
                    shifted[i] = params[i] + FRAC_PI_2;
                    let plus = objective(&shifted)?;
                    shifted[i] = params[i] - FRAC_PI_2;
                    let minus = objective(&shifted)?;
                    (plus - minus) / 2.0
                }
            };
            shifted[i] = params[i];
            gradient.push(g);
        }
        Ok(gradient)
    }
}

/// Plain gradient descent: `θ ← θ - η·∇E(θ)`.
///
/// Converges once `‖∇E(θ)‖` drops below `tolerance`. A step size too small to
/// get there within the iteration cap ends in divergence, not convergence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientDescent {
    /// Step size η.
    pub learning_rate: f64,
    /// Gradient-norm threshold for convergence.
    pub tolerance: f64,
    /// How the gradient is estimated.
    pub gradient: Gradient,
}

impl GradientDescent {
    /// Gradient descent with parameter-shift gradients.
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            tolerance: 1e-6,
            gradient: Gradient::ParameterShift,
        }
    }

    /// Set the gradient-norm convergence threshold.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Use a different gradient estimator.
    #[must_use]
    pub fn with_gradient(mut self, gradient: Gradient) -> Self {
        self.gradient = gradient;
        self
    }
}

impl Optimizer for GradientDescent {
    fn name(&self) -> &str {
        "gradient_descent"
    }

    fn step(
        &mut self,
        params: &[f64],
        _energy: f64,
        objective: &mut Objective<'_>,
    ) -> AlgoResult<StepOutcome> {
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(AlgoError::InvalidParameter(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(AlgoError::InvalidParameter(format!(
                "gradient tolerance must be positive, got {}",
                self.tolerance
            )));
        }

        let gradient = self.gradient.estimate(params, objective)?;
        let norm = gradient.iter().map(|g| g * g).sum::<f64>().sqrt();
        if norm < self.tolerance {
            return Ok(StepOutcome {
                params: params.to_vec(),
                converged: true,
            });
        }
        Ok(StepOutcome {
            params: params
                .iter()
                .zip(&gradient)
                .map(|(p, g)| p - self.learning_rate * g)
                .collect(),
            converged: false,
        })
    }
}

/// Outcome of a converged [`minimize`] run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationalResult {
    /// Final parameters.
    pub params: Vec<f64>,
    /// Energy at `params`.
    pub energy: f64,
    /// Parameter updates applied before the optimizer signalled convergence.
    pub iterations: usize,
    /// Energy after every update, starting with the initial parameters.
    pub history: Vec<f64>,
}

/// Energy `⟨ψ|H|ψ⟩` of `circuit` on a fresh register.
pub fn energy(hamiltonian: &Operator, circuit: &Circuit, config: &SimConfig) -> AlgoResult<f64> {
    let register = run(circuit, config)?;
    Ok(register.expectation(hamiltonian)?)
}

/// Minimise `⟨ψ(θ)|H|ψ(θ)⟩` over the circuits produced by `builder`.
#[instrument(skip_all, fields(optimizer = optimizer.name(), n_params = initial_params.len()))]
pub fn minimize<B, O>(
    hamiltonian: &Operator,
    builder: B,
    initial_params: &[f64],
    optimizer: &mut O,
    config: &VariationalConfig,
) -> AlgoResult<VariationalResult>
where
    B: Fn(&[f64]) -> IrResult<Circuit>,
    O: Optimizer + ?Sized,
{
    let mut objective = |params: &[f64]| -> AlgoResult<f64> {
        let circuit = builder(params)?;
        energy(hamiltonian, &circuit, &config.sim)
    };

    let mut params = initial_params.to_vec();
    let mut current = objective(&params)?;
    let mut history = vec![current];

    for iteration in 0..config.max_iterations {
        let outcome = optimizer.step(&params, current, &mut objective)?;
        if outcome.converged {
            debug!(iteration, energy = current, "variational loop converged");
            return Ok(VariationalResult {
                params,
                energy: current,
                iterations: iteration,
                history,
            });
        }

        params = outcome.params;
        current = objective(&params)?;
        debug!(iteration = iteration + 1, energy = current, "variational step");
        history.push(current);
    }

    warn!(
        max_iterations = config.max_iterations,
        energy = current,
        "variational loop hit its iteration cap"
    );
    Err(AlgoError::OptimizerDivergence {
        iterations: config.max_iterations,
        last_value: current,
    })
}

/// Layered `Ry` ansatz: each layer rotates every qubit, and consecutive layers
/// are joined by a CX ladder. `params.len()` must be a multiple of
/// `num_qubits`.
pub fn ry_ansatz(num_qubits: u32, params: &[f64]) -> IrResult<Circuit> {
    let mut circuit = Circuit::new("ry_ansatz", num_qubits);
    let width = num_qubits.max(1) as usize;
    for (layer, angles) in params.chunks(width).enumerate() {
        if layer > 0 {
            for q in 0..num_qubits.saturating_sub(1) {
                circuit.cx(QubitId(q), QubitId(q + 1))?;
            }
        }
        for (q, &theta) in angles.iter().enumerate() {
            circuit.ry(theta, QubitId(q as u32))?;
        }
    }
    Ok(circuit)
}
