//! Driver for the variational quantum eigensolver in QFerm.

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::path::PathBuf;

use anyhow::{ensure, format_err};
use argmin::core::{
    CostFunction, Executor, Gradient, State, TerminationReason, TerminationStatus,
};
use argmin::solver::{
    linesearch::condition::ArmijoCondition, linesearch::BacktrackingLineSearch, quasinewton::BFGS,
};
use argmin_math::ArgminL2Norm;
use derive_builder::Builder;
use ndarray::{Array1, Array2};
use num_traits::ToPrimitive;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::drivers::hamiltonian::HamiltonianRecord;
use crate::drivers::{GroundStateRecord, QFermDriver};
use crate::io::format::{log_title, nice_bool, qferm_output, qferm_warn, QFermOutput};
use crate::io::{write_qferm_binary, QFermFileType};
use crate::qubit::QubitOperator;
use crate::simulator::RyAnsatz;

#[cfg(test)]
#[path = "vqe_tests.rs"]
mod vqe_tests;

// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

fn default_true() -> bool {
    true
}
fn default_depth() -> usize {
    2
}
fn default_max_iterations() -> usize {
    256
}
fn default_gradient_threshold() -> f64 {
    1e-6
}
fn default_line_search_step_size() -> f64 {
    1e-4
}
fn default_initial_parameter() -> f64 {
    0.1
}

/// Structure containing control parameters for the variational quantum eigensolver.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct VqeParams {
    /// The number of entangling-plus-rotation repetitions in the trial circuit.
    #[builder(default = "2")]
    #[serde(default = "default_depth")]
    pub depth: usize,

    /// Boolean indicating if the trial circuit starts from the Hartree-Fock reference
    /// bitstring rather than the all-zeros state.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub use_reference_state: bool,

    /// The uniform value used to initialise every circuit parameter.
    #[builder(default = "0.1")]
    #[serde(default = "default_initial_parameter")]
    pub initial_parameter: f64,

    /// Boolean indicating if the circuit parameters are instead initialised uniformly at
    /// random in `[-initial_parameter, +initial_parameter]`.
    #[builder(default = "false")]
    #[serde(default)]
    pub randomise_initial_parameters: bool,

    /// The gradient threshold for the optimisation of the circuit parameters.
    #[builder(default = "1e-6")]
    #[serde(default = "default_gradient_threshold")]
    pub gradient_threshold: f64,

    /// The step size for the line search in the optimisation of the circuit parameters.
    #[builder(default = "1e-4")]
    #[serde(default = "default_line_search_step_size")]
    pub line_search_step_size: f64,

    /// The maximum number of optimisation iterations.
    #[builder(default = "256")]
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Optional name for saving the ground-state estimate as a binary file of type
    /// [`QFermFileType::Sol`]. If `None`, the result will not be saved.
    #[builder(default = "None")]
    #[serde(default)]
    pub result_save_name: Option<PathBuf>,
}

impl VqeParams {
    /// Returns a builder to construct a [`VqeParams`] structure.
    pub fn builder() -> VqeParamsBuilder {
        VqeParamsBuilder::default()
    }
}

impl Default for VqeParams {
    fn default() -> Self {
        Self::builder()
            .build()
            .expect("Unable to construct a default `VqeParams`.")
    }
}

impl fmt::Display for VqeParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trial circuit depth: {}", self.depth)?;
        writeln!(
            f,
            "Start from the reference bitstring: {}",
            nice_bool(self.use_reference_state)
        )?;
        writeln!(f, "Initial circuit parameter: {:.3e}", self.initial_parameter)?;
        writeln!(
            f,
            "Randomise initial circuit parameters: {}",
            nice_bool(self.randomise_initial_parameters)
        )?;
        writeln!(
            f,
            "Optimisation gradient threshold: {:.3e}",
            self.gradient_threshold
        )?;
        writeln!(
            f,
            "Optimisation line search step size: {:.3e}",
            self.line_search_step_size
        )?;
        writeln!(f, "Maximum optimisation iterations: {}", self.max_iterations)?;
        writeln!(
            f,
            "Save ground-state estimate to file: {}",
            if let Some(name) = self.result_save_name.as_ref() {
                let mut path = name.clone();
                path.set_extension(QFermFileType::Sol.ext());
                path.display().to_string()
            } else {
                nice_bool(false)
            }
        )?;
        writeln!(f)?;
        Ok(())
    }
}

// ------
// Result
// ------

/// Structure to contain variational quantum eigensolver results.
#[derive(Clone, Builder, Debug)]
pub struct VqeResult<'a> {
    /// The control parameters used to obtain this set of results.
    parameters: &'a VqeParams,

    /// The optimised circuit parameters.
    pub optimal_parameters: Array1<f64>,

    /// The electronic ground-state energy, with any particle-hole shift restored.
    pub electronic_energy: f64,

    /// The total ground-state energy, including the core energy.
    pub total_energy: f64,

    /// The number of optimisation iterations performed.
    pub n_iterations: u64,
}

impl<'a> VqeResult<'a> {
    fn builder() -> VqeResultBuilder<'a> {
        VqeResultBuilder::default()
    }
}

// ------
// Driver
// ------

/// Driver for ground-state estimation by the variational quantum eigensolver.
///
/// The trial state is prepared by a hardware-efficient $`R_y`$ circuit on a statevector
/// simulator; the energy expectation value is minimised by BFGS with backtracking line search,
/// with gradients evaluated exactly by the parameter-shift rule.
#[derive(Clone, Builder)]
pub struct VqeDriver<'a> {
    /// The control parameters for the variational quantum eigensolver.
    parameters: &'a VqeParams,

    /// The qubit Hamiltonian to be minimised, together with its scalar shifts.
    hamiltonian: &'a HamiltonianRecord,

    /// The result of the optimisation.
    #[builder(setter(skip), default = "None")]
    result: Option<VqeResult<'a>>,
}

impl<'a> VqeDriver<'a> {
    /// Returns a builder to construct a [`VqeDriver`] structure.
    pub fn builder() -> VqeDriverBuilder<'a> {
        VqeDriverBuilder::default()
    }

    /// Executes the variational optimisation.
    fn minimise_energy(&mut self) -> Result<(), anyhow::Error> {
        log_title("Variational Quantum Eigensolver");
        qferm_output!("");
        let params = self.parameters;
        params.log_output_display();

        let op = &self.hamiltonian.qubit_hamiltonian;
        let n_qubits = op.n_qubits();
        ensure!(
            self.hamiltonian.reference_bits.len() == n_qubits,
            "The reference bitstring length {} does not match the {n_qubits}-qubit Hamiltonian.",
            self.hamiltonian.reference_bits.len()
        );
        let initial_bits = if params.use_reference_state {
            self.hamiltonian.reference_bits.clone()
        } else {
            vec![false; n_qubits]
        };
        let ansatz = RyAnsatz::new(n_qubits, params.depth);
        let n_parameters = ansatz.n_parameters();
        qferm_output!(
            "Trial circuit: {n_parameters} R_y parameters on {n_qubits} qubits at depth {}.",
            params.depth
        );

        let problem = VqeProblem {
            hamiltonian: op.clone(),
            ansatz,
            initial_bits,
        };
        let theta0 = if params.randomise_initial_parameters && params.initial_parameter.abs() > 0.0
        {
            let spread = params.initial_parameter.abs();
            let mut rng = rand::thread_rng();
            Array1::from_shape_fn(n_parameters, |_| rng.gen_range(-spread..spread))
        } else {
            Array1::from_elem(n_parameters, params.initial_parameter)
        };

        let linesearch = BacktrackingLineSearch::<Array1<f64>, Array1<f64>, _, f64>::new(
            ArmijoCondition::new(params.line_search_step_size)?,
        );
        let solver: BFGS<_, f64> =
            BFGS::new(linesearch).with_tolerance_grad(params.gradient_threshold)?;

        qferm_output!("Solver: BFGS with backtracking line search");
        qferm_output!("  BFGS gradient tolerance: {:.3e}", params.gradient_threshold);
        qferm_output!("  BFGS maximum iterations: {}", params.max_iterations);
        qferm_output!(
            "  Line search conditions : Armijo with step size {:.3e}",
            params.line_search_step_size,
        );
        qferm_output!("");

        let res = Executor::new(problem, solver)
            .configure(|state| {
                state
                    .param(theta0)
                    .inv_hessian(Array2::<f64>::eye(n_parameters))
                    .max_iters(params.max_iterations.to_u64().unwrap_or_else(|| {
                        qferm_warn!(
                            "Unable to convert the specified maximum number of iterations, {}, to `u64`. The value {} will be used instead.",
                            params.max_iterations,
                            u64::MAX
                        );
                        u64::MAX
                    }))
            })
            .run()?;

        let final_state = res.state();
        let termination_status = final_state.get_termination_status();
        qferm_output!("BFGS optimisation result:");
        qferm_output!("  Termination status: {}", termination_status);
        qferm_output!("  Final iteration: {}", final_state.iter);
        qferm_output!("  Last best iteration: {}", final_state.last_best_iter);
        qferm_output!("  Best cost function: {:.10}", final_state.get_best_cost());
        qferm_output!(
            "  Final gradient norm: {:.3e}",
            final_state
                .get_gradient()
                .ok_or(format_err!("Unable to retrieve the final gradient."))?
                .l2_norm(),
        );
        qferm_output!("");

        if !matches!(
            termination_status,
            TerminationStatus::Terminated(TerminationReason::SolverConverged)
        ) {
            qferm_warn!(
                "The optimisation terminated with status `{termination_status}` before reaching \
                 the gradient threshold; the best parameters found so far are reported."
            );
        }

        let optimal_parameters = final_state
            .get_best_param()
            .ok_or(format_err!("Unable to retrieve the optimised parameters."))?
            .clone();
        let electronic_energy =
            final_state.get_best_cost() + self.hamiltonian.particle_hole_shift;
        let total_energy = electronic_energy + self.hamiltonian.core_energy;

        qferm_output!("Ground-state electronic energy: {electronic_energy:+.10} Eh");
        qferm_output!("Ground-state total energy:      {total_energy:+.10} Eh");
        qferm_output!("");

        if let Some(name) = params.result_save_name.as_ref() {
            let record = GroundStateRecord {
                method: "variational quantum eigensolver".to_string(),
                electronic_energy,
                total_energy,
            };
            write_qferm_binary(name, QFermFileType::Sol, &record)?;
            let mut path = name.clone();
            path.set_extension(QFermFileType::Sol.ext());
            qferm_output!("Ground-state estimate saved to: {}", path.display());
            qferm_output!("");
        }

        self.result = Some(
            VqeResult::builder()
                .parameters(params)
                .optimal_parameters(optimal_parameters)
                .electronic_energy(electronic_energy)
                .total_energy(total_energy)
                .n_iterations(final_state.iter)
                .build()?,
        );
        Ok(())
    }
}

impl<'a> QFermDriver for VqeDriver<'a> {
    type Params = VqeParams;

    type Outcome = VqeResult<'a>;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No variational quantum eigensolver results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.minimise_energy()
    }
}

// ==============================
// Variational energy functional
// ==============================

/// The variational energy functional minimised by the eigensolver.
#[derive(Clone)]
struct VqeProblem {
    /// The qubit Hamiltonian whose expectation value is the cost.
    hamiltonian: QubitOperator,

    /// The trial circuit.
    ansatz: RyAnsatz,

    /// The basis state the trial circuit starts from.
    initial_bits: Vec<bool>,
}

impl VqeProblem {
    /// Evaluates the energy expectation value at a parameter vector.
    fn energy(&self, theta: &Array1<f64>) -> Result<f64, anyhow::Error> {
        let state = self
            .ansatz
            .prepare(&self.initial_bits, theta.as_slice().ok_or_else(|| {
                format_err!("Unable to view the parameter vector as a slice.")
            })?)?;
        Ok(self.hamiltonian.expectation(state.amplitudes()).re)
    }
}

impl CostFunction for VqeProblem {
    type Param = Array1<f64>;
    type Output = f64;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        Ok(self.energy(theta)?)
    }
}

impl Gradient for VqeProblem {
    type Param = Array1<f64>;
    type Gradient = Array1<f64>;

    /// Evaluates the gradient by the parameter-shift rule, exact for $`R_y`$ generators:
    /// $`\partial_k E = \frac{1}{2}\left(E(\theta_k + \pi/2) - E(\theta_k - \pi/2)\right)`$.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, argmin::core::Error> {
        let mut gradient = Array1::<f64>::zeros(theta.len());
        for k in 0..theta.len() {
            let mut shifted = theta.clone();
            shifted[k] = theta[k] + FRAC_PI_2;
            let plus = self.energy(&shifted)?;
            shifted[k] = theta[k] - FRAC_PI_2;
            let minus = self.energy(&shifted)?;
            gradient[k] = 0.5 * (plus - minus);
        }
        Ok(gradient)
    }
}
