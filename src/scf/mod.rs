//! Restricted Hartree-Fock and the transformation of integrals to the molecular-orbital basis.

use anyhow::{self, bail, ensure, format_err};
use approx;
use ndarray::{Array1, Array2, Array4};
use ndarray_linalg::{Eigh, UPLO};

use crate::integrals::{AoIntegrals, MolecularIntegrals};

#[cfg(test)]
#[path = "scf_tests.rs"]
mod scf_tests;

/// Threshold below which overlap eigenvalues are considered linearly dependent.
const LINEAR_DEPENDENCE_THRESHOLD: f64 = 1e-10;

/// A converged restricted Hartree-Fock solution.
#[derive(Clone, Debug)]
pub struct ScfSolution {
    /// The molecular-orbital coefficient matrix, one column per orbital, in ascending orbital
    /// energy order.
    pub coefficients: Array2<f64>,

    /// The orbital energies.
    pub orbital_energies: Array1<f64>,

    /// The electronic Hartree-Fock energy.
    pub electronic_energy: f64,

    /// The number of doubly-occupied orbitals.
    pub n_occupied: usize,

    /// The number of SCF cycles taken to converge.
    pub n_iterations: usize,
}

/// Solves the restricted Hartree-Fock equations by symmetric orthogonalisation.
///
/// # Arguments
///
/// * `ao` - The atomic-orbital integrals.
/// * `n_electrons` - The number of electrons; must be even for a closed-shell treatment.
/// * `max_cycles` - The maximum number of SCF cycles.
/// * `energy_threshold` - Convergence threshold on the electronic energy change.
///
/// # Returns
///
/// The converged [`ScfSolution`].
///
/// # Errors
///
/// Errors if the electron count is odd, the overlap matrix is linearly dependent, or the SCF
/// procedure fails to converge within `max_cycles`.
pub fn restricted_hartree_fock(
    ao: &AoIntegrals,
    n_electrons: usize,
    max_cycles: usize,
    energy_threshold: f64,
) -> Result<ScfSolution, anyhow::Error> {
    ensure!(
        n_electrons % 2 == 0,
        "Restricted Hartree-Fock requires an even number of electrons, got {n_electrons}."
    );
    let n = ao.hcore.nrows();
    let n_occupied = n_electrons / 2;
    ensure!(
        n_occupied <= n,
        "{n_electrons} electrons cannot be accommodated in {n} orbitals."
    );

    // Symmetric orthogonalisation: X = U s^{-1/2} U†.
    let (s_eigvals, s_eigvecs) = ao
        .overlap
        .eigh(UPLO::Lower)
        .map_err(|err| format_err!("Overlap diagonalisation failed: {err}."))?;
    if s_eigvals
        .iter()
        .any(|&lambda| lambda < LINEAR_DEPENDENCE_THRESHOLD)
    {
        bail!("The overlap matrix is (near-)linearly dependent.");
    }
    let s_invsqrt = Array2::from_diag(&s_eigvals.mapv(|lambda| 1.0 / lambda.sqrt()));
    let x = s_eigvecs.dot(&s_invsqrt).dot(&s_eigvecs.t());

    let mut fock = ao.hcore.clone();
    let mut electronic_energy = 0.0;

    for cycle in 1..=max_cycles {
        let fock_prime = x.t().dot(&fock).dot(&x);
        let (orbital_energies, c_prime) = fock_prime
            .eigh(UPLO::Lower)
            .map_err(|err| format_err!("Fock diagonalisation failed: {err}."))?;
        let coefficients = x.dot(&c_prime);

        // Closed-shell density matrix, D = 2 Σ_occ C C†.
        let c_occ = coefficients.slice(ndarray::s![.., ..n_occupied]);
        let density = 2.0 * c_occ.dot(&c_occ.t());

        let mut g = Array2::<f64>::zeros((n, n));
        for mu in 0..n {
            for nu in 0..n {
                let mut value = 0.0;
                for lambda in 0..n {
                    for sigma in 0..n {
                        value += density[(lambda, sigma)]
                            * (ao.eri[(mu, nu, sigma, lambda)]
                                - 0.5 * ao.eri[(mu, lambda, sigma, nu)]);
                    }
                }
                g[(mu, nu)] = value;
            }
        }
        fock = &ao.hcore + &g;

        let new_energy = 0.5 * (&density * (&ao.hcore + &fock)).sum();
        let converged = cycle > 1
            && approx::abs_diff_eq!(new_energy, electronic_energy, epsilon = energy_threshold);
        electronic_energy = new_energy;
        if converged {
            return Ok(ScfSolution {
                coefficients,
                orbital_energies,
                electronic_energy,
                n_occupied,
                n_iterations: cycle,
            });
        }
    }

    bail!("SCF failed to converge within {max_cycles} cycles.")
}

/// Transforms atomic-orbital integrals into the molecular-orbital basis of an SCF solution.
///
/// # Arguments
///
/// * `ao` - The atomic-orbital integrals.
/// * `scf` - The SCF solution providing the molecular-orbital coefficients.
/// * `core_energy` - The scalar core energy to be carried along (nuclear repulsion).
/// * `n_electrons` - The number of electrons.
///
/// # Returns
///
/// The [`MolecularIntegrals`] over spatial molecular orbitals in chemist notation.
pub fn transform_to_mo(
    ao: &AoIntegrals,
    scf: &ScfSolution,
    core_energy: f64,
    n_electrons: usize,
) -> MolecularIntegrals {
    let c = &scf.coefficients;
    let n = c.ncols();
    let one_body = c.t().dot(&ao.hcore).dot(c);

    // Four staged quarter-transforms of (μν|λσ) → (pq|rs).
    let mut stage1 = Array4::<f64>::zeros((n, n, n, n));
    for p in 0..n {
        for nu in 0..n {
            for lambda in 0..n {
                for sigma in 0..n {
                    let mut value = 0.0;
                    for mu in 0..n {
                        value += c[(mu, p)] * ao.eri[(mu, nu, lambda, sigma)];
                    }
                    stage1[(p, nu, lambda, sigma)] = value;
                }
            }
        }
    }
    let mut stage2 = Array4::<f64>::zeros((n, n, n, n));
    for p in 0..n {
        for q in 0..n {
            for lambda in 0..n {
                for sigma in 0..n {
                    let mut value = 0.0;
                    for nu in 0..n {
                        value += c[(nu, q)] * stage1[(p, nu, lambda, sigma)];
                    }
                    stage2[(p, q, lambda, sigma)] = value;
                }
            }
        }
    }
    let mut stage3 = Array4::<f64>::zeros((n, n, n, n));
    for p in 0..n {
        for q in 0..n {
            for r in 0..n {
                for sigma in 0..n {
                    let mut value = 0.0;
                    for lambda in 0..n {
                        value += c[(lambda, r)] * stage2[(p, q, lambda, sigma)];
                    }
                    stage3[(p, q, r, sigma)] = value;
                }
            }
        }
    }
    let mut two_body = Array4::<f64>::zeros((n, n, n, n));
    for p in 0..n {
        for q in 0..n {
            for r in 0..n {
                for s in 0..n {
                    let mut value = 0.0;
                    for sigma in 0..n {
                        value += c[(sigma, s)] * stage3[(p, q, r, sigma)];
                    }
                    two_body[(p, q, r, s)] = value;
                }
            }
        }
    }

    MolecularIntegrals {
        one_body,
        two_body,
        core_energy,
        n_electrons,
    }
}
