//! Gaussian basis sets for the built-in integral engine.
//!
//! Only s-type shells are tabulated: the built-in engine targets minimal-basis
//! hydrogenic systems, and anything richer is expected to arrive through an
//! FCIDUMP file instead.

use std::collections::HashMap;

use anyhow::{self, format_err};
use lazy_static::lazy_static;
use nalgebra::Point3;

use crate::auxiliary::molecule::Molecule;

#[cfg(test)]
#[path = "basis_tests.rs"]
mod basis_tests;

lazy_static! {
    /// Exponents and contraction coefficients of tabulated s-type shells, keyed by
    /// basis-set name and atomic number.
    static ref SHELL_REGISTRY: HashMap<(&'static str, u32), (Vec<f64>, Vec<f64>)> = {
        let mut registry = HashMap::new();
        // STO-3G hydrogen 1s (ζ = 1.24).
        registry.insert(
            ("sto-3g", 1),
            (
                vec![3.425250914, 0.6239137298, 0.1688554040],
                vec![0.1543289673, 0.5353281423, 0.4446345422],
            ),
        );
        // STO-3G helium 1s.
        registry.insert(
            ("sto-3g", 2),
            (
                vec![6.362421394, 1.158922999, 0.3136497915],
                vec![0.1543289673, 0.5353281423, 0.4446345422],
            ),
        );
        registry
    };
}

/// A contracted s-type Gaussian basis function.
///
/// Contraction coefficients stored here include the primitive normalisation factors
/// $`(2\alpha/\pi)^{3/4}`$ and an overall factor normalising the contracted function.
#[derive(Clone, Debug)]
pub struct ContractedGaussian {
    /// Primitive exponents.
    pub exponents: Vec<f64>,

    /// Normalised contraction coefficients.
    pub coefficients: Vec<f64>,

    /// The centre of the function in Bohr.
    pub center: Point3<f64>,
}

impl ContractedGaussian {
    /// Constructs a contracted s-type Gaussian, folding primitive normalisation into the
    /// contraction coefficients and renormalising the contracted function to unit self-overlap.
    pub fn new(exponents: &[f64], coefficients: &[f64], center: Point3<f64>) -> Self {
        let norm_coefficients = exponents
            .iter()
            .zip(coefficients.iter())
            .map(|(alpha, d)| d * (2.0 * alpha / std::f64::consts::PI).powf(0.75))
            .collect::<Vec<_>>();
        let mut cgto = ContractedGaussian {
            exponents: exponents.to_vec(),
            coefficients: norm_coefficients,
            center,
        };
        let self_overlap = cgto.self_overlap();
        cgto.coefficients
            .iter_mut()
            .for_each(|d| *d /= self_overlap.sqrt());
        cgto
    }

    /// The self-overlap $`\langle g | g \rangle`$ of this contracted function.
    fn self_overlap(&self) -> f64 {
        let mut s = 0.0;
        for (&alpha, &da) in self.exponents.iter().zip(self.coefficients.iter()) {
            for (&beta, &db) in self.exponents.iter().zip(self.coefficients.iter()) {
                s += da * db * (std::f64::consts::PI / (alpha + beta)).powf(1.5);
            }
        }
        s
    }
}

/// Builds the list of contracted basis functions for a molecule in a named basis set.
///
/// # Arguments
///
/// * `mol` - The molecule whose atoms carry the basis functions.
/// * `basis_name` - The basis-set name, matched case-insensitively.
///
/// # Returns
///
/// One [`ContractedGaussian`] per tabulated shell on each atom.
pub fn build_basis(
    mol: &Molecule,
    basis_name: &str,
) -> Result<Vec<ContractedGaussian>, anyhow::Error> {
    let name = basis_name.to_lowercase();
    mol.atoms
        .iter()
        .map(|atom| {
            let (exponents, coefficients) = SHELL_REGISTRY
                .get(&(name.as_str(), atom.atomic_number))
                .ok_or_else(|| {
                    format_err!(
                        "No `{basis_name}` shell tabulated for element `{}`. \
                         Use an FCIDUMP integral source for this system.",
                        atom.symbol
                    )
                })?;
            Ok(ContractedGaussian::new(
                exponents,
                coefficients,
                atom.coordinates,
            ))
        })
        .collect()
}
