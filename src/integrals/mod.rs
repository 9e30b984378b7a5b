//! Analytic one- and two-electron integrals over contracted s-type Gaussians.
//!
//! The formulas are the standard closed forms for s-type primitives (Szabo & Ostlund,
//! appendix A); the Boys function is evaluated by its downward series for small
//! arguments and its asymptotic form for large ones.

use ndarray::{Array2, Array4};
use serde::{Deserialize, Serialize};

use crate::auxiliary::molecule::Molecule;
use crate::basis::ContractedGaussian;


const PI: f64 = std::f64::consts::PI;

/// The Boys function $`F_0(t)`$.
///
/// For $`t < 35`$ the series $`F_0(t) = e^{-t} \sum_i (2t)^i / (2i+1)!!`$ is used;
/// beyond that the asymptotic form $`\frac{1}{2}\sqrt{\pi/t}`$ is exact to machine
/// precision.
pub(crate) fn boys_f0(t: f64) -> f64 {
    if t < 1e-13 {
        1.0 - t / 3.0
    } else if t < 35.0 {
        let mut term = 1.0;
        let mut sum = 1.0;
        let mut i = 1u32;
        loop {
            term *= 2.0 * t / f64::from(2 * i + 1);
            sum += term;
            if term < sum * 1e-17 {
                break;
            }
            i += 1;
        }
        (-t).exp() * sum
    } else {
        0.5 * (PI / t).sqrt()
    }
}

/// Computed one- and two-electron integrals in the atomic-orbital basis.
#[derive(Clone, Debug)]
pub struct AoIntegrals {
    /// The overlap matrix $`S_{\mu\nu}`$.
    pub overlap: Array2<f64>,

    /// The core Hamiltonian $`H^{\mathrm{core}}_{\mu\nu} = T_{\mu\nu} + V_{\mu\nu}`$.
    pub hcore: Array2<f64>,

    /// The two-electron repulsion integrals $`(\mu\nu|\lambda\sigma)`$ in chemist notation.
    pub eri: Array4<f64>,
}

/// One- and two-body molecular integrals over spatial molecular orbitals.
///
/// This is the immutable hand-over structure between the integral-provision stage and the
/// fermionic-operator builder, produced once per geometry and basis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MolecularIntegrals {
    /// The one-body integrals $`h_{pq}`$ over spatial orbitals.
    pub one_body: Array2<f64>,

    /// The two-body integrals $`(pq|rs)`$ over spatial orbitals in chemist notation.
    pub two_body: Array4<f64>,

    /// The scalar core energy (nuclear repulsion plus any frozen-core contribution).
    pub core_energy: f64,

    /// The number of electrons to be accommodated in these orbitals.
    pub n_electrons: usize,
}

impl MolecularIntegrals {
    /// The number of spatial orbitals.
    pub fn n_orbitals(&self) -> usize {
        self.one_body.nrows()
    }
}

/// Computes the overlap, core-Hamiltonian, and electron-repulsion integrals for a basis of
/// contracted s-type Gaussians.
///
/// # Arguments
///
/// * `basis` - The contracted basis functions.
/// * `mol` - The molecule providing the nuclear charges and positions.
///
/// # Returns
///
/// The assembled [`AoIntegrals`].
pub fn compute_ao_integrals(basis: &[ContractedGaussian], mol: &Molecule) -> AoIntegrals {
    let n = basis.len();
    let mut overlap = Array2::<f64>::zeros((n, n));
    let mut hcore = Array2::<f64>::zeros((n, n));
    let mut eri = Array4::<f64>::zeros((n, n, n, n));

    for i in 0..n {
        for j in 0..=i {
            let (s_ij, t_ij) = contracted_overlap_kinetic(&basis[i], &basis[j]);
            let v_ij = contracted_nuclear_attraction(&basis[i], &basis[j], mol);
            overlap[(i, j)] = s_ij;
            overlap[(j, i)] = s_ij;
            hcore[(i, j)] = t_ij + v_ij;
            hcore[(j, i)] = t_ij + v_ij;
        }
    }

    // Chemist-notation (ij|kl) with 8-fold permutational symmetry.
    for i in 0..n {
        for j in 0..=i {
            for k in 0..=i {
                let l_max = if k == i { j } else { k };
                for l in 0..=l_max {
                    let value = contracted_eri(&basis[i], &basis[j], &basis[k], &basis[l]);
                    for (p, q, r, s) in [
                        (i, j, k, l),
                        (j, i, k, l),
                        (i, j, l, k),
                        (j, i, l, k),
                        (k, l, i, j),
                        (l, k, i, j),
                        (k, l, j, i),
                        (l, k, j, i),
                    ] {
                        eri[(p, q, r, s)] = value;
                    }
                }
            }
        }
    }

    AoIntegrals {
        overlap,
        hcore,
        eri,
    }
}

/// Contracted overlap and kinetic-energy integrals between two s-type functions.
fn contracted_overlap_kinetic(a: &ContractedGaussian, b: &ContractedGaussian) -> (f64, f64) {
    let r2_ab = (a.center - b.center).norm_squared();
    let mut s = 0.0;
    let mut t = 0.0;
    for (&alpha, &da) in a.exponents.iter().zip(a.coefficients.iter()) {
        for (&beta, &db) in b.exponents.iter().zip(b.coefficients.iter()) {
            let p = alpha + beta;
            let mu = alpha * beta / p;
            let prim_s = (PI / p).powf(1.5) * (-mu * r2_ab).exp();
            s += da * db * prim_s;
            t += da * db * mu * (3.0 - 2.0 * mu * r2_ab) * prim_s;
        }
    }
    (s, t)
}

/// Contracted nuclear-attraction integral between two s-type functions over all nuclei.
fn contracted_nuclear_attraction(
    a: &ContractedGaussian,
    b: &ContractedGaussian,
    mol: &Molecule,
) -> f64 {
    let r2_ab = (a.center - b.center).norm_squared();
    let mut v = 0.0;
    for (&alpha, &da) in a.exponents.iter().zip(a.coefficients.iter()) {
        for (&beta, &db) in b.exponents.iter().zip(b.coefficients.iter()) {
            let p = alpha + beta;
            let mu = alpha * beta / p;
            let centre_p = (a.center * alpha + b.center.coords * beta) / p;
            let pref = -2.0 * PI / p * (-mu * r2_ab).exp();
            for atom in mol.atoms.iter() {
                let r2_pc = (centre_p - atom.coordinates).norm_squared();
                v += da * db * pref * f64::from(atom.atomic_number) * boys_f0(p * r2_pc);
            }
        }
    }
    v
}

/// Contracted electron-repulsion integral $(ab|cd)$ between four s-type functions.
fn contracted_eri(
    a: &ContractedGaussian,
    b: &ContractedGaussian,
    c: &ContractedGaussian,
    d: &ContractedGaussian,
) -> f64 {
    let r2_ab = (a.center - b.center).norm_squared();
    let r2_cd = (c.center - d.center).norm_squared();
    let mut value = 0.0;
    for (&alpha, &da) in a.exponents.iter().zip(a.coefficients.iter()) {
        for (&beta, &db) in b.exponents.iter().zip(b.coefficients.iter()) {
            let p = alpha + beta;
            let centre_p = (a.center * alpha + b.center.coords * beta) / p;
            let exp_ab = (-alpha * beta / p * r2_ab).exp();
            for (&gamma, &dc) in c.exponents.iter().zip(c.coefficients.iter()) {
                for (&delta, &dd) in d.exponents.iter().zip(d.coefficients.iter()) {
                    let q = gamma + delta;
                    let centre_q = (c.center * gamma + d.center.coords * delta) / q;
                    let exp_cd = (-gamma * delta / q * r2_cd).exp();
                    let r2_pq = (centre_p - centre_q).norm_squared();
                    value += da * db * dc * dd
                        * 2.0 * PI.powf(2.5) / (p * q * (p + q).sqrt())
                        * exp_ab
                        * exp_cd
                        * boys_f0(p * q / (p + q) * r2_pq);
                }
            }
        }
    }
    value
}
