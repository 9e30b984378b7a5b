//! Second-quantized fermionic operators over spin-orbitals.

use ndarray::{Array2, Array4};
use serde::{Deserialize, Serialize};

use crate::integrals::MolecularIntegrals;


/// A second-quantized fermionic Hamiltonian,
///
/// ```math
///     \hat{H} = c
///             + \sum_{pq} h_{pq}\, a^{\dagger}_p a_q
///             + \frac{1}{2} \sum_{pqrs} g_{pqrs}\, a^{\dagger}_p a^{\dagger}_q a_s a_r,
/// ```
///
/// where $`p, q, r, s`$ index spin-orbitals in block order (all α first, then all β) and
/// $`g_{pqrs} = \langle pq | rs \rangle`$ is stored in physicist notation. Instances are
/// immutable once built; transformations produce new instances.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FermionicOperator {
    /// The one-body coefficients $`h_{pq}`$ over spin-orbitals.
    pub one_body: Array2<f64>,

    /// The two-body coefficients $`\langle pq | rs \rangle`$ over spin-orbitals.
    pub two_body: Array4<f64>,

    /// The scalar constant $`c`$.
    pub constant: f64,

    /// The number of α electrons.
    pub n_alpha: usize,

    /// The number of β electrons.
    pub n_beta: usize,
}

impl FermionicOperator {
    /// Builds the fermionic Hamiltonian from spatial molecular integrals by spin-orbital
    /// expansion.
    ///
    /// Spin-orbital $`p`$ corresponds to spatial orbital $`p \bmod n`$ with spin
    /// $`\lfloor p / n \rfloor`$ (0 = α, 1 = β), and the physicist-notation coefficients
    /// follow from the chemist-notation spatial integrals as
    /// $`\langle pq | rs \rangle = \delta_{\sigma_p \sigma_r} \delta_{\sigma_q \sigma_s}
    /// (\bar{p}\bar{r} | \bar{q}\bar{s})`$.
    ///
    /// The core energy of the integrals is deliberately *not* absorbed into the constant: it is
    /// reported separately so that electronic and total energies remain distinguishable.
    pub fn from_integrals(integrals: &MolecularIntegrals) -> Self {
        let n = integrals.n_orbitals();
        let n_so = 2 * n;
        let spin = |p: usize| p / n;
        let spatial = |p: usize| p % n;

        let mut one_body = Array2::<f64>::zeros((n_so, n_so));
        for p in 0..n_so {
            for q in 0..n_so {
                if spin(p) == spin(q) {
                    one_body[(p, q)] = integrals.one_body[(spatial(p), spatial(q))];
                }
            }
        }

        let mut two_body = Array4::<f64>::zeros((n_so, n_so, n_so, n_so));
        for p in 0..n_so {
            for q in 0..n_so {
                for r in 0..n_so {
                    for s in 0..n_so {
                        if spin(p) == spin(r) && spin(q) == spin(s) {
                            two_body[(p, q, r, s)] = integrals.two_body[(
                                spatial(p),
                                spatial(r),
                                spatial(q),
                                spatial(s),
                            )];
                        }
                    }
                }
            }
        }

        let n_electrons = integrals.n_electrons;
        let n_beta = n_electrons / 2;
        FermionicOperator {
            one_body,
            two_body,
            constant: 0.0,
            n_alpha: n_electrons - n_beta,
            n_beta,
        }
    }

    /// The number of spin-orbitals.
    pub fn n_spin_orbitals(&self) -> usize {
        self.one_body.nrows()
    }

    /// The total number of electrons.
    pub fn n_particles(&self) -> usize {
        self.n_alpha + self.n_beta
    }

    /// The spin-orbital indices occupied in the aufbau reference determinant.
    pub fn reference_occupation(&self) -> Vec<usize> {
        let n = self.n_spin_orbitals() / 2;
        (0..self.n_alpha)
            .chain((0..self.n_beta).map(|i| n + i))
            .collect()
    }

    /// The expectation value of this operator in the aufbau reference determinant,
    ///
    /// ```math
    ///     E_{\mathrm{ref}} = c + \sum_{i} h_{ii}
    ///         + \frac{1}{2} \sum_{ij} \left( \langle ij|ij \rangle - \langle ij|ji \rangle \right),
    /// ```
    ///
    /// with $`i, j`$ running over occupied spin-orbitals.
    pub fn reference_energy(&self) -> f64 {
        let occupied = self.reference_occupation();
        let mut energy = self.constant;
        for &i in occupied.iter() {
            energy += self.one_body[(i, i)];
        }
        for &i in occupied.iter() {
            for &j in occupied.iter() {
                energy += 0.5 * (self.two_body[(i, j, i, j)] - self.two_body[(i, j, j, i)]);
            }
        }
        energy
    }

    /// Applies the particle-hole transformation, re-referencing this operator against the
    /// aufbau reference determinant.
    ///
    /// # Returns
    ///
    /// A pair of the transformed operator and the scalar energy shift such that the spectra
    /// satisfy $`E(\hat{H}) = E(\hat{H}_{\mathrm{ph}}) + \Delta`$.
    pub fn particle_hole_transformation(&self) -> (Self, f64) {
        let shift = self.reference_energy();
        let mut transformed = self.clone();
        transformed.constant -= shift;
        (transformed, shift)
    }
}
