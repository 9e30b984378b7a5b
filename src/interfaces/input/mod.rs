//! YAML input configuration for QFerm calculations.

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::drivers::exact_eigensolver::{ExactEigensolverDriver, ExactEigensolverParams};
use crate::drivers::hamiltonian::{HamiltonianDriver, HamiltonianParams, HamiltonianRecord};
use crate::drivers::vqe::{VqeDriver, VqeParams};
use crate::drivers::QFermDriver;
use crate::interfaces::InputHandle;
use crate::io::{read_qferm_binary, QFermFileType};

#[cfg(test)]
#[path = "input_tests.rs"]
mod input_tests;

/// An enumerated type representing possible input kinds for the qubit Hamiltonian from a YAML
/// input file.
#[derive(Clone, Serialize, Deserialize)]
pub enum HamiltonianInputKind {
    /// Variant indicating that the parameters for the qubit-Hamiltonian construction driver
    /// will be specified.
    Parameters(HamiltonianParams),

    /// Variant indicating that a previously constructed qubit Hamiltonian will be read in from
    /// a `QFerm` [`QFermFileType::Ham`] binary file. The associated path gives the name of the
    /// file without its `.qferm.ham` extension.
    FromFile(PathBuf),
}

/// A structure containing `QFerm` input parameters which can be serialised into and
/// deserialised from a YAML input file.
#[derive(Clone, Serialize, Deserialize)]
pub struct Input {
    /// Specification for the qubit Hamiltonian: either the parameters for its construction, or
    /// the name of a [`QFermFileType::Ham`] binary file containing a previously constructed
    /// Hamiltonian (without the `.qferm.ham` extension).
    pub hamiltonian: HamiltonianInputKind,

    /// Specification for exact ground-state diagonalisation. If `None`, no exact
    /// diagonalisation will be performed.
    ///
    /// If not specified, this will be taken to be `None`.
    #[serde(default)]
    pub exact_eigensolver: Option<ExactEigensolverParams>,

    /// Specification for the variational quantum eigensolver. If `None`, no variational
    /// optimisation will be performed.
    ///
    /// If not specified, this will be taken to be `None`.
    #[serde(default)]
    pub vqe: Option<VqeParams>,
}

impl InputHandle for Input {
    /// Handles the input structure: the qubit Hamiltonian is constructed or read in, then each
    /// requested ground-state solver is run against it.
    fn handle(&self) -> Result<(), anyhow::Error> {
        let record: HamiltonianRecord = match &self.hamiltonian {
            HamiltonianInputKind::Parameters(params) => {
                let mut driver = HamiltonianDriver::builder()
                    .parameters(params)
                    .build()
                    .with_context(|| {
                        "Unable to construct a qubit-Hamiltonian construction driver"
                    })?;
                driver.run().with_context(|| {
                    "Unable to run the qubit-Hamiltonian construction driver successfully"
                })?;
                driver
                    .result()
                    .with_context(|| "Unable to retrieve the qubit-Hamiltonian construction result")?
                    .record
                    .clone()
            }
            HamiltonianInputKind::FromFile(name) => {
                read_qferm_binary(name, QFermFileType::Ham).with_context(|| {
                    format!("Unable to read `{}.qferm.ham`", name.display())
                })?
            }
        };

        if let Some(params) = self.exact_eigensolver.as_ref() {
            let mut driver = ExactEigensolverDriver::builder()
                .parameters(params)
                .hamiltonian(&record)
                .build()
                .with_context(|| "Unable to construct an exact diagonalisation driver")?;
            driver
                .run()
                .with_context(|| "Unable to run the exact diagonalisation driver successfully")?;
        }

        if let Some(params) = self.vqe.as_ref() {
            let mut driver = VqeDriver::builder()
                .parameters(params)
                .hamiltonian(&record)
                .build()
                .with_context(|| {
                    "Unable to construct a variational quantum eigensolver driver"
                })?;
            driver.run().with_context(|| {
                "Unable to run the variational quantum eigensolver driver successfully"
            })?;
        }

        Ok(())
    }
}
