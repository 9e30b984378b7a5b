//! Driver for qubit-Hamiltonian construction in QFerm.

use std::fmt;
use std::path::PathBuf;

use anyhow::{bail, format_err};
use derive_builder::Builder;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::auxiliary::molecule::{DistanceUnit, Molecule};
use crate::basis::build_basis;
use crate::drivers::QFermDriver;
use crate::fermion::FermionicOperator;
use crate::integrals::{compute_ao_integrals, MolecularIntegrals};
use crate::interfaces::fcidump::read_fcidump;
use crate::io::format::{
    log_subtitle, log_title, nice_bool, qferm_error, qferm_output, write_subtitle, QFermOutput,
};
use crate::io::{write_qferm_binary, QFermFileType};
use crate::mapping::{reduce_reference_bitstring, reduce_two_qubits, QubitMapping};
use crate::qubit::QubitOperator;
use crate::scf::{restricted_hartree_fock, transform_to_mo};

#[cfg(test)]
#[path = "hamiltonian_tests.rs"]
mod hamiltonian_tests;

// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

fn default_basis_set() -> String {
    "sto-3g".to_string()
}
fn default_multiplicity() -> u32 {
    1
}
fn default_scf_max_cycles() -> usize {
    128
}
fn default_scf_threshold() -> f64 {
    1e-10
}
fn default_truncation_threshold() -> f64 {
    1e-12
}

/// An enumerated type for the provenance of the molecular integrals.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum IntegralSource {
    /// Variant for integrals computed from a molecular geometry with the built-in Gaussian
    /// integral engine followed by a restricted Hartree-Fock calculation.
    Gaussian {
        /// The `xyz` file specifying the molecular geometry.
        xyz: PathBuf,

        /// The distance unit of the coordinates in the `xyz` file.
        #[serde(default)]
        distance_unit: DistanceUnit,

        /// The name of the Gaussian basis set.
        #[serde(default = "default_basis_set")]
        basis_set: String,

        /// The total molecular charge.
        #[serde(default)]
        charge: i32,

        /// The spin multiplicity, $`2S + 1`$.
        #[serde(default = "default_multiplicity")]
        multiplicity: u32,

        /// The maximum number of SCF cycles.
        #[serde(default = "default_scf_max_cycles")]
        scf_max_cycles: usize,

        /// The SCF convergence threshold on the electronic energy.
        #[serde(default = "default_scf_threshold")]
        scf_energy_threshold: f64,
    },

    /// Variant for integrals read from an `FCIDUMP` file produced by an external electronic
    /// structure program.
    FciDump {
        /// The `FCIDUMP` file to be read.
        path: PathBuf,
    },
}

impl fmt::Display for IntegralSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegralSource::Gaussian {
                xyz,
                distance_unit,
                basis_set,
                charge,
                multiplicity,
                scf_max_cycles,
                scf_energy_threshold,
            } => {
                writeln!(f, "Integral source: Gaussian engine")?;
                writeln!(f, "  Geometry file: {} ({})", xyz.display(), distance_unit)?;
                writeln!(f, "  Basis set: {basis_set}")?;
                writeln!(f, "  Charge: {charge:+}  Multiplicity: {multiplicity}")?;
                writeln!(
                    f,
                    "  SCF: at most {scf_max_cycles} cycles to {scf_energy_threshold:.3e} Eh"
                )?;
            }
            IntegralSource::FciDump { path } => {
                writeln!(f, "Integral source: FCIDUMP file {}", path.display())?;
            }
        }
        Ok(())
    }
}

/// Structure containing control parameters for qubit-Hamiltonian construction.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct HamiltonianParams {
    /// The provenance of the molecular integrals.
    pub source: IntegralSource,

    /// The fermion-to-qubit mapping.
    #[builder(default)]
    #[serde(default)]
    pub mapping: QubitMapping,

    /// Boolean indicating if the fermionic operator is re-referenced against the Hartree-Fock
    /// determinant before mapping.
    #[builder(default = "false")]
    #[serde(default)]
    pub particle_hole: bool,

    /// Boolean indicating if the two parity-symmetry qubits are removed after a parity mapping.
    #[builder(default = "false")]
    #[serde(default)]
    pub two_qubit_reduction: bool,

    /// The magnitude below which mapped Pauli terms are discarded.
    #[builder(default = "1e-12")]
    #[serde(default = "default_truncation_threshold")]
    pub truncation_threshold: f64,

    /// Optional name for saving the constructed qubit Hamiltonian as a binary file of type
    /// [`QFermFileType::Ham`]. If `None`, the result will not be saved.
    #[builder(default = "None")]
    #[serde(default)]
    pub result_save_name: Option<PathBuf>,
}

impl HamiltonianParams {
    /// Returns a builder to construct a [`HamiltonianParams`] structure.
    pub fn builder() -> HamiltonianParamsBuilder {
        HamiltonianParamsBuilder::default()
    }
}

impl fmt::Display for HamiltonianParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)?;
        writeln!(f, "Fermion-to-qubit mapping: {}", self.mapping)?;
        writeln!(
            f,
            "Particle-hole transformation: {}",
            nice_bool(self.particle_hole)
        )?;
        writeln!(
            f,
            "Two-qubit reduction: {}",
            nice_bool(self.two_qubit_reduction)
        )?;
        writeln!(
            f,
            "Pauli-term truncation threshold: {:.3e}",
            self.truncation_threshold
        )?;
        writeln!(
            f,
            "Save qubit Hamiltonian to file: {}",
            if let Some(name) = self.result_save_name.as_ref() {
                let mut path = name.clone();
                path.set_extension(QFermFileType::Ham.ext());
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

/// A serialisable record of a constructed qubit Hamiltonian, sufficient to drive any of the
/// ground-state solvers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HamiltonianRecord {
    /// The mapped qubit Hamiltonian.
    pub qubit_hamiltonian: QubitOperator,

    /// The scalar core energy (nuclear repulsion plus any frozen-core contribution).
    pub core_energy: f64,

    /// The scalar removed by the particle-hole transformation; zero if the transformation was
    /// not applied.
    pub particle_hole_shift: f64,

    /// The qubit values of the Hartree-Fock reference determinant under the chosen mapping,
    /// after any two-qubit reduction.
    pub reference_bits: Vec<bool>,

    /// The numbers of α and β electrons.
    pub n_electrons: (usize, usize),
}

impl fmt::Display for HamiltonianRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_subtitle(f, "Qubit Hamiltonian")?;
        writeln!(f)?;
        write!(f, "{}", self.qubit_hamiltonian)?;
        writeln!(f)?;
        writeln!(f, "Core energy: {:+.10} Eh", self.core_energy)?;
        writeln!(
            f,
            "Particle-hole shift: {:+.10} Eh",
            self.particle_hole_shift
        )?;
        writeln!(
            f,
            "Reference determinant qubit values: [{}]",
            self.reference_bits
                .iter()
                .map(|b| if *b { "1" } else { "0" })
                .join(", ")
        )?;
        writeln!(
            f,
            "Electrons: {} α, {} β",
            self.n_electrons.0, self.n_electrons.1
        )?;
        Ok(())
    }
}

/// Structure to contain qubit-Hamiltonian construction results.
#[derive(Clone, Builder, Debug)]
pub struct HamiltonianResult<'a> {
    /// The control parameters used to obtain this set of results.
    parameters: &'a HamiltonianParams,

    /// The fermionic Hamiltonian before mapping, after any particle-hole transformation.
    pub fermionic: FermionicOperator,

    /// The constructed qubit Hamiltonian and its accompanying scalars.
    pub record: HamiltonianRecord,

    /// The number of spin-orbitals of the underlying fermionic problem.
    pub n_spin_orbitals: usize,
}

impl<'a> HamiltonianResult<'a> {
    fn builder() -> HamiltonianResultBuilder<'a> {
        HamiltonianResultBuilder::default()
    }

    /// The total energy corresponding to an electronic eigenvalue of the stored qubit
    /// Hamiltonian: the eigenvalue plus the particle-hole shift and the core energy.
    pub fn total_energy(&self, qubit_eigenvalue: f64) -> f64 {
        qubit_eigenvalue + self.record.particle_hole_shift + self.record.core_energy
    }
}

// ------
// Driver
// ------

/// Driver for the construction of a qubit Hamiltonian from molecular integrals.
///
/// The driver assembles molecular integrals from the configured source, expands them into a
/// second-quantized fermionic operator, optionally re-references it by the particle-hole
/// transformation, and maps it onto qubits with the configured mapping.
#[derive(Clone, Builder)]
pub struct HamiltonianDriver<'a> {
    /// The control parameters for qubit-Hamiltonian construction.
    parameters: &'a HamiltonianParams,

    /// The result of the construction.
    #[builder(setter(skip), default = "None")]
    result: Option<HamiltonianResult<'a>>,
}

impl<'a> HamiltonianDriver<'a> {
    /// Returns a builder to construct a [`HamiltonianDriver`] structure.
    pub fn builder() -> HamiltonianDriverBuilder<'a> {
        HamiltonianDriverBuilder::default()
    }

    /// Assembles the molecular integrals from the configured source.
    fn assemble_integrals(&self) -> Result<MolecularIntegrals, anyhow::Error> {
        match &self.parameters.source {
            IntegralSource::Gaussian {
                xyz,
                distance_unit,
                basis_set,
                charge,
                multiplicity,
                scf_max_cycles,
                scf_energy_threshold,
            } => {
                log_subtitle("Molecular integrals from the Gaussian engine");
                qferm_output!("");
                let mol = Molecule::from_xyz(xyz, *distance_unit)?
                    .with_charge_and_multiplicity(*charge, *multiplicity);
                mol.log_output_display();
                qferm_output!("");
                let (n_alpha, n_beta) = mol.n_alpha_beta()?;
                if n_alpha != n_beta {
                    qferm_error!(
                        "Multiplicity {multiplicity} implies {n_alpha} α and {n_beta} β \
                         electrons, but the restricted engine only treats closed shells."
                    );
                    bail!("Only singlet (closed-shell) systems are supported, got multiplicity {multiplicity}.");
                }
                let n_electrons = n_alpha + n_beta;
                let basis = build_basis(&mol, basis_set)?;
                qferm_output!("Basis set: {basis_set} ({} functions)", basis.len());
                let ao = compute_ao_integrals(&basis, &mol);
                let scf =
                    restricted_hartree_fock(&ao, n_electrons, *scf_max_cycles, *scf_energy_threshold)?;
                let e_nuc = mol.nuclear_repulsion_energy();
                qferm_output!(
                    "SCF converged in {} cycles: E(elec) = {:+.10} Eh, E(total) = {:+.10} Eh",
                    scf.n_iterations,
                    scf.electronic_energy,
                    scf.electronic_energy + e_nuc
                );
                qferm_output!("");
                Ok(transform_to_mo(&ao, &scf, e_nuc, n_electrons))
            }
            IntegralSource::FciDump { path } => {
                log_subtitle("Molecular integrals from FCIDUMP");
                qferm_output!("");
                let integrals = read_fcidump(path)?;
                qferm_output!(
                    "Read {} orbitals and {} electrons from {}.",
                    integrals.n_orbitals(),
                    integrals.n_electrons,
                    path.display()
                );
                qferm_output!("");
                Ok(integrals)
            }
        }
    }

    /// Executes qubit-Hamiltonian construction.
    fn construct_hamiltonian(&mut self) -> Result<(), anyhow::Error> {
        log_title("Qubit Hamiltonian Construction");
        qferm_output!("");
        let params = self.parameters;
        params.log_output_display();

        let integrals = self.assemble_integrals()?;
        let fermionic = FermionicOperator::from_integrals(&integrals);
        let n_spin_orbitals = fermionic.n_spin_orbitals();
        qferm_output!(
            "Second-quantized operator over {n_spin_orbitals} spin-orbitals ({} α, {} β electrons).",
            fermionic.n_alpha,
            fermionic.n_beta
        );

        let (fermionic, particle_hole_shift) = if params.particle_hole {
            let (transformed, shift) = fermionic.particle_hole_transformation();
            qferm_output!("Particle-hole transformation shift: {shift:+.10} Eh.");
            (transformed, shift)
        } else {
            (fermionic, 0.0)
        };

        let mapped = params
            .mapping
            .map(&fermionic, params.truncation_threshold)?;
        let reference_bits = params.mapping.reference_bitstring(&fermionic);
        qferm_output!(
            "Mapped qubit Hamiltonian ({}): {} Pauli terms on {} qubits.",
            params.mapping,
            mapped.n_terms(),
            mapped.n_qubits()
        );

        let (qubit_hamiltonian, reference_bits) = if params.two_qubit_reduction {
            if params.mapping != QubitMapping::Parity {
                qferm_error!(
                    "Two-qubit reduction requires the parity mapping, but the {} mapping was \
                     requested.",
                    params.mapping
                );
                bail!("Two-qubit reduction is only valid for the parity mapping.");
            }
            let reduced = reduce_two_qubits(&mapped, fermionic.n_alpha, fermionic.n_beta)?;
            qferm_output!(
                "Two-qubit reduction: {} Pauli terms on {} qubits.",
                reduced.n_terms(),
                reduced.n_qubits()
            );
            (reduced, reduce_reference_bitstring(&reference_bits)?)
        } else {
            (mapped, reference_bits)
        };
        qferm_output!("");

        let record = HamiltonianRecord {
            qubit_hamiltonian,
            core_energy: integrals.core_energy,
            particle_hole_shift,
            reference_bits,
            n_electrons: (fermionic.n_alpha, fermionic.n_beta),
        };
        record.log_output_display();
        qferm_output!("");

        if let Some(name) = params.result_save_name.as_ref() {
            write_qferm_binary(name, QFermFileType::Ham, &record)?;
            let mut path = name.clone();
            path.set_extension(QFermFileType::Ham.ext());
            qferm_output!("Qubit Hamiltonian saved to: {}", path.display());
            qferm_output!("");
        }

        self.result = Some(
            HamiltonianResult::builder()
                .parameters(params)
                .fermionic(fermionic)
                .record(record)
                .n_spin_orbitals(n_spin_orbitals)
                .build()?,
        );
        Ok(())
    }
}

impl<'a> QFermDriver for HamiltonianDriver<'a> {
    type Params = HamiltonianParams;

    type Outcome = HamiltonianResult<'a>;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No qubit-Hamiltonian construction results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.construct_hamiltonian()
    }
}
