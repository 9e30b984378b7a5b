//! Driver for exact diagonalisation of qubit Hamiltonians in QFerm.

use std::fmt;
use std::path::PathBuf;

use anyhow::{ensure, format_err};
use derive_builder::Builder;
use ndarray_linalg::{Eigh, UPLO};
use serde::{Deserialize, Serialize};

use crate::drivers::hamiltonian::HamiltonianRecord;
use crate::drivers::{GroundStateRecord, QFermDriver};
use crate::io::format::{log_title, nice_bool, qferm_output, QFermOutput};
use crate::io::{write_qferm_binary, QFermFileType};

#[cfg(test)]
#[path = "exact_eigensolver_tests.rs"]
mod exact_eigensolver_tests;

// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

fn default_max_qubits() -> usize {
    12
}
fn default_n_states() -> usize {
    1
}

/// Structure containing control parameters for exact diagonalisation.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct ExactEigensolverParams {
    /// The largest qubit count for which a dense matrix realisation is permitted.
    #[builder(default = "12")]
    #[serde(default = "default_max_qubits")]
    pub max_qubits: usize,

    /// The number of lowest eigenvalues to report.
    #[builder(default = "1")]
    #[serde(default = "default_n_states")]
    pub n_states: usize,

    /// Optional name for saving the ground-state estimate as a binary file of type
    /// [`QFermFileType::Sol`]. If `None`, the result will not be saved.
    #[builder(default = "None")]
    #[serde(default)]
    pub result_save_name: Option<PathBuf>,
}

impl ExactEigensolverParams {
    /// Returns a builder to construct an [`ExactEigensolverParams`] structure.
    pub fn builder() -> ExactEigensolverParamsBuilder {
        ExactEigensolverParamsBuilder::default()
    }
}

impl Default for ExactEigensolverParams {
    fn default() -> Self {
        Self::builder()
            .build()
            .expect("Unable to construct a default `ExactEigensolverParams`.")
    }
}

impl fmt::Display for ExactEigensolverParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dense diagonalisation limit: {} qubits", self.max_qubits)?;
        writeln!(f, "Number of states reported: {}", self.n_states)?;
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

/// Structure to contain exact diagonalisation results.
#[derive(Clone, Builder, Debug)]
pub struct ExactEigensolverResult<'a> {
    /// The control parameters used to obtain this set of results.
    parameters: &'a ExactEigensolverParams,

    /// The lowest eigenvalues of the qubit Hamiltonian, in ascending order.
    pub eigenvalues: Vec<f64>,

    /// The electronic ground-state energy, with any particle-hole shift restored.
    pub electronic_energy: f64,

    /// The total ground-state energy, including the core energy.
    pub total_energy: f64,
}

impl<'a> ExactEigensolverResult<'a> {
    fn builder() -> ExactEigensolverResultBuilder<'a> {
        ExactEigensolverResultBuilder::default()
    }
}

// ------
// Driver
// ------

/// Driver for exact ground-state computation by dense Hermitian diagonalisation.
///
/// The qubit Hamiltonian is realised as a dense matrix in the computational basis and
/// diagonalised; the ground-state energies are assembled from the lowest eigenvalue and the
/// scalar shifts carried by the Hamiltonian record.
#[derive(Clone, Builder)]
pub struct ExactEigensolverDriver<'a> {
    /// The control parameters for exact diagonalisation.
    parameters: &'a ExactEigensolverParams,

    /// The qubit Hamiltonian to be diagonalised, together with its scalar shifts.
    hamiltonian: &'a HamiltonianRecord,

    /// The result of the diagonalisation.
    #[builder(setter(skip), default = "None")]
    result: Option<ExactEigensolverResult<'a>>,
}

impl<'a> ExactEigensolverDriver<'a> {
    /// Returns a builder to construct an [`ExactEigensolverDriver`] structure.
    pub fn builder() -> ExactEigensolverDriverBuilder<'a> {
        ExactEigensolverDriverBuilder::default()
    }

    /// Executes exact diagonalisation.
    fn diagonalise(&mut self) -> Result<(), anyhow::Error> {
        log_title("Exact Ground-State Diagonalisation");
        qferm_output!("");
        let params = self.parameters;
        params.log_output_display();

        let op = &self.hamiltonian.qubit_hamiltonian;
        let n_qubits = op.n_qubits();
        ensure!(
            n_qubits <= params.max_qubits,
            "The qubit Hamiltonian acts on {n_qubits} qubits, above the dense diagonalisation \
             limit of {} qubits.",
            params.max_qubits
        );
        qferm_output!(
            "Realising {} Pauli terms on {n_qubits} qubits as a {dim}×{dim} matrix.",
            op.n_terms(),
            dim = 1usize << n_qubits
        );

        let matrix = op.to_matrix();
        let (eigenvalues, _) = matrix
            .eigh(UPLO::Lower)
            .map_err(|err| format_err!("Hamiltonian diagonalisation failed: {err}."))?;
        let n_states = params.n_states.min(eigenvalues.len()).max(1);
        let eigenvalues = eigenvalues.iter().copied().take(n_states).collect::<Vec<_>>();

        let ground = eigenvalues[0];
        let electronic_energy = ground + self.hamiltonian.particle_hole_shift;
        let total_energy = electronic_energy + self.hamiltonian.core_energy;

        qferm_output!("Lowest eigenvalues of the qubit Hamiltonian:");
        for (state, eigenvalue) in eigenvalues.iter().enumerate() {
            qferm_output!("  State {state}: {eigenvalue:+.10}");
        }
        qferm_output!("");
        qferm_output!("Ground-state electronic energy: {electronic_energy:+.10} Eh");
        qferm_output!("Ground-state total energy:      {total_energy:+.10} Eh");
        qferm_output!("");

        if let Some(name) = params.result_save_name.as_ref() {
            let record = GroundStateRecord {
                method: "exact diagonalisation".to_string(),
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
            ExactEigensolverResult::builder()
                .parameters(params)
                .eigenvalues(eigenvalues)
                .electronic_energy(electronic_energy)
                .total_energy(total_energy)
                .build()?,
        );
        Ok(())
    }
}

impl<'a> QFermDriver for ExactEigensolverDriver<'a> {
    type Params = ExactEigensolverParams;

    type Outcome = ExactEigensolverResult<'a>;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No exact diagonalisation results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.diagonalise()
    }
}
