//! Fermion-to-qubit mappings.
//!
//! All three supported mappings are expressed through an invertible GF(2) encoding matrix
//! $`\boldsymbol{\beta}`$ relating occupation vectors $`\mathbf{x}`$ to stored qubit values
//! $`\mathbf{b} = \boldsymbol{\beta} \mathbf{x}`$. The Jordan-Wigner, parity and Bravyi-Kitaev
//! mappings differ only in their choice of $`\boldsymbol{\beta}`$; the ladder-operator images
//! follow from the update, parity and remainder sets derived from $`\boldsymbol{\beta}`$ and
//! its inverse.

use std::fmt;

use anyhow::{self, bail, ensure, format_err};
use bitvec::prelude::*;
use itertools::iproduct;
use num_complex::Complex64;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::fermion::FermionicOperator;
use crate::qubit::{Pauli, PauliString, QubitOperator};


// =================
// Enum definitions
// =================

/// Supported fermion-to-qubit mappings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QubitMapping {
    /// The Jordan-Wigner mapping: qubit $`j`$ stores the occupation of spin-orbital $`j`$.
    JordanWigner,

    /// The parity mapping: qubit $`j`$ stores the parity of the occupations of spin-orbitals
    /// $`0, \ldots, j`$.
    Parity,

    /// The Bravyi-Kitaev mapping: qubit $`j`$ stores partial occupation sums following the
    /// binary-tree structure of Bravyi and Kitaev.
    BravyiKitaev,
}

impl Default for QubitMapping {
    fn default() -> Self {
        QubitMapping::JordanWigner
    }
}

impl fmt::Display for QubitMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QubitMapping::JordanWigner => write!(f, "Jordan-Wigner"),
            QubitMapping::Parity => write!(f, "parity"),
            QubitMapping::BravyiKitaev => write!(f, "Bravyi-Kitaev"),
        }
    }
}

// ====================
// GF(2) linear algebra
// ====================

/// A square matrix over GF(2) stored as rows of bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BinaryMatrix {
    dim: usize,
    rows: Vec<BitVec>,
}

impl BinaryMatrix {
    fn zeros(dim: usize) -> Self {
        BinaryMatrix {
            dim,
            rows: vec![bitvec![0; dim]; dim],
        }
    }

    fn identity(dim: usize) -> Self {
        let mut mat = Self::zeros(dim);
        for i in 0..dim {
            mat.rows[i].set(i, true);
        }
        mat
    }

    /// The lower-triangular matrix of ones, including the diagonal.
    fn lower_triangular_ones(dim: usize) -> Self {
        let mut mat = Self::zeros(dim);
        for i in 0..dim {
            for j in 0..=i {
                mat.rows[i].set(j, true);
            }
        }
        mat
    }

    /// The strictly lower-triangular matrix of ones.
    fn strictly_lower_triangular_ones(dim: usize) -> Self {
        let mut mat = Self::zeros(dim);
        for i in 0..dim {
            for j in 0..i {
                mat.rows[i].set(j, true);
            }
        }
        mat
    }

    /// The Bravyi-Kitaev encoding matrix, built recursively on blocks of power-of-two size and
    /// truncated to `dim`. Truncation is valid because the full matrix is lower-triangular.
    fn bravyi_kitaev(dim: usize) -> Self {
        let mut size = 1;
        while size < dim {
            size *= 2;
        }
        let mut full = Self::identity(1);
        while full.dim < size {
            let half = full.dim;
            let mut doubled = Self::zeros(2 * half);
            for i in 0..half {
                for j in 0..half {
                    if full.get(i, j) {
                        doubled.rows[i].set(j, true);
                        doubled.rows[half + i].set(half + j, true);
                    }
                }
            }
            // The last row of the doubled matrix accumulates the full lower half.
            for j in 0..half {
                doubled.rows[2 * half - 1].set(j, true);
            }
            full = doubled;
        }
        let mut mat = Self::zeros(dim);
        for i in 0..dim {
            for j in 0..=i {
                if full.get(i, j) {
                    mat.rows[i].set(j, true);
                }
            }
        }
        mat
    }

    fn get(&self, i: usize, j: usize) -> bool {
        self.rows[i][j]
    }

    /// Computes the GF(2) matrix product `self · other`.
    fn multiply(&self, other: &BinaryMatrix) -> BinaryMatrix {
        debug_assert_eq!(self.dim, other.dim);
        let mut result = Self::zeros(self.dim);
        for i in 0..self.dim {
            for k in 0..self.dim {
                if self.get(i, k) {
                    *result.rows[i].as_mut_bitslice() ^= other.rows[k].as_bitslice();
                }
            }
        }
        result
    }

    /// Inverts this matrix over GF(2) by Gauss-Jordan elimination.
    fn inverse(&self) -> Result<BinaryMatrix, anyhow::Error> {
        let dim = self.dim;
        let mut work = self.rows.clone();
        let mut inv = Self::identity(dim);
        for col in 0..dim {
            let pivot = (col..dim)
                .find(|&row| work[row][col])
                .ok_or_else(|| format_err!("Encoding matrix is singular over GF(2)."))?;
            work.swap(col, pivot);
            inv.rows.swap(col, pivot);
            for row in 0..dim {
                if row != col && work[row][col] {
                    let pivot_row = work[col].clone();
                    *work[row].as_mut_bitslice() ^= pivot_row.as_bitslice();
                    let pivot_inv = inv.rows[col].clone();
                    *inv.rows[row].as_mut_bitslice() ^= pivot_inv.as_bitslice();
                }
            }
        }
        Ok(inv)
    }

    /// Applies this matrix to a bit vector.
    fn apply(&self, x: &BitVec) -> BitVec {
        debug_assert_eq!(x.len(), self.dim);
        let mut b = bitvec![0; self.dim];
        for i in 0..self.dim {
            let parity = self.rows[i].iter_ones().filter(|&j| x[j]).count() % 2;
            b.set(i, parity == 1);
        }
        b
    }
}

// ==================
// Ladder-operator sets
// ==================

/// The qubit index sets governing the image of each fermionic mode under an encoding matrix.
///
/// For mode $`j`$:
/// * the update set holds the qubits other than $`j`$ whose stored value depends on
///   occupation $`x_j`$ (column $`j`$ of $`\boldsymbol{\beta}`$);
/// * the parity set holds the qubits whose product of $`Z`$ eigenvalues yields
///   $`(-1)^{x_0 + \cdots + x_{j-1}}`$ (row $`j`$ of
///   $`\mathbf{R} \boldsymbol{\beta}^{-1}`$ with $`\mathbf{R}`$ strictly lower-triangular
///   ones);
/// * the remainder set is the symmetric difference of the parity set with the off-diagonal
///   support of row $`j`$ of $`\boldsymbol{\beta}^{-1}`$.
struct EncodedSets {
    update: Vec<Vec<usize>>,
    parity: Vec<Vec<usize>>,
    remainder: Vec<Vec<usize>>,
}

impl EncodedSets {
    fn from_encoding(beta: &BinaryMatrix) -> Result<Self, anyhow::Error> {
        let dim = beta.dim;
        let beta_inv = beta.inverse()?;
        let pi = BinaryMatrix::strictly_lower_triangular_ones(dim).multiply(&beta_inv);

        let mut update = Vec::with_capacity(dim);
        let mut parity = Vec::with_capacity(dim);
        let mut remainder = Vec::with_capacity(dim);
        for j in 0..dim {
            update.push(
                (0..dim)
                    .filter(|&i| i != j && beta.get(i, j))
                    .collect::<Vec<_>>(),
            );
            let parity_j = (0..dim).filter(|&i| pi.get(j, i)).collect::<Vec<_>>();
            let flip_j = (0..dim)
                .filter(|&i| i != j && beta_inv.get(j, i))
                .collect::<Vec<_>>();
            let mut remainder_j = parity_j
                .iter()
                .filter(|i| !flip_j.contains(i))
                .chain(flip_j.iter().filter(|i| !parity_j.contains(i)))
                .copied()
                .collect::<Vec<_>>();
            remainder_j.sort_unstable();
            parity.push(parity_j);
            remainder.push(remainder_j);
        }
        Ok(EncodedSets {
            update,
            parity,
            remainder,
        })
    }

    /// Assembles the image of the lowering operator $`a_j`$ (or the raising operator
    /// $`a^{\dagger}_j`$ when `dagger` is set),
    ///
    /// ```math
    ///     a_j \mapsto \frac{1}{2} X_{U(j)}
    ///         \left( X_j Z_{P(j)} \pm \mathrm{i}\, Y_j Z_{\rho(j)} \right).
    /// ```
    fn ladder_operator(
        &self,
        n_qubits: usize,
        j: usize,
        dagger: bool,
    ) -> Result<QubitOperator, anyhow::Error> {
        let mut x_ops = vec![(j, Pauli::X)];
        x_ops.extend(self.update[j].iter().map(|&i| (i, Pauli::X)));
        x_ops.extend(self.parity[j].iter().map(|&i| (i, Pauli::Z)));

        let mut y_ops = vec![(j, Pauli::Y)];
        y_ops.extend(self.update[j].iter().map(|&i| (i, Pauli::X)));
        y_ops.extend(self.remainder[j].iter().map(|&i| (i, Pauli::Z)));

        let y_coefficient = if dagger {
            Complex64::new(0.0, -0.5)
        } else {
            Complex64::new(0.0, 0.5)
        };
        let mut op = QubitOperator::zero(n_qubits);
        op.add_term(
            PauliString::from_ops(n_qubits, &x_ops)?,
            Complex64::new(0.5, 0.0),
        );
        op.add_term(PauliString::from_ops(n_qubits, &y_ops)?, y_coefficient);
        Ok(op)
    }
}

// ==============
// Mapping driver
// ==============

impl QubitMapping {
    pub(crate) fn encoding_matrix(&self, dim: usize) -> BinaryMatrix {
        match self {
            QubitMapping::JordanWigner => BinaryMatrix::identity(dim),
            QubitMapping::Parity => BinaryMatrix::lower_triangular_ones(dim),
            QubitMapping::BravyiKitaev => BinaryMatrix::bravyi_kitaev(dim),
        }
    }

    /// Maps a fermionic Hamiltonian onto a qubit operator, discarding Pauli terms whose
    /// coefficient magnitude does not exceed `threshold`.
    ///
    /// One qubit is allocated per spin-orbital. The two-body contraction is parallelised over
    /// the first two operator indices.
    ///
    /// # Errors
    ///
    /// Errors if the encoding matrix cannot be inverted over GF(2).
    pub fn map(
        &self,
        fermionic: &FermionicOperator,
        threshold: f64,
    ) -> Result<QubitOperator, anyhow::Error> {
        let n_qubits = fermionic.n_spin_orbitals();
        ensure!(n_qubits > 0, "Cannot map an operator over zero spin-orbitals.");
        let sets = EncodedSets::from_encoding(&self.encoding_matrix(n_qubits))?;

        let lowering = (0..n_qubits)
            .map(|j| sets.ladder_operator(n_qubits, j, false))
            .collect::<Result<Vec<_>, _>>()?;
        let raising = (0..n_qubits)
            .map(|j| sets.ladder_operator(n_qubits, j, true))
            .collect::<Result<Vec<_>, _>>()?;

        let mut qubit_op = QubitOperator::scalar(
            n_qubits,
            Complex64::new(fermionic.constant, 0.0),
        );

        // One-body part, Σ_pq h_pq a†_p a_q.
        let one_body = iproduct!(0..n_qubits, 0..n_qubits)
            .filter(|&(p, q)| fermionic.one_body[(p, q)].abs() > 0.0)
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|(p, q)| {
                let mut term = raising[p].compose(&lowering[q]);
                term.scale(Complex64::new(fermionic.one_body[(p, q)], 0.0));
                term
            })
            .reduce(
                || QubitOperator::zero(n_qubits),
                |mut acc, term| {
                    acc.add_assign(&term);
                    acc
                },
            );
        qubit_op.add_assign(&one_body);

        // Two-body part, ½ Σ_pqrs ⟨pq|rs⟩ a†_p a†_q a_s a_r.
        let two_body = iproduct!(0..n_qubits, 0..n_qubits)
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|(p, q)| {
                let mut partial = QubitOperator::zero(n_qubits);
                let front = raising[p].compose(&raising[q]);
                for r in 0..n_qubits {
                    for s in 0..n_qubits {
                        let g = fermionic.two_body[(p, q, r, s)];
                        if g.abs() == 0.0 {
                            continue;
                        }
                        let mut term = front.compose(&lowering[s]).compose(&lowering[r]);
                        term.scale(Complex64::new(0.5 * g, 0.0));
                        partial.add_assign(&term);
                    }
                }
                partial
            })
            .reduce(
                || QubitOperator::zero(n_qubits),
                |mut acc, term| {
                    acc.add_assign(&term);
                    acc
                },
            );
        qubit_op.add_assign(&two_body);

        qubit_op.chop(threshold);
        Ok(qubit_op)
    }

    /// The stored qubit values of the aufbau reference determinant under this mapping,
    /// $`\mathbf{b} = \boldsymbol{\beta} \mathbf{x}`$.
    pub fn reference_bitstring(&self, fermionic: &FermionicOperator) -> Vec<bool> {
        let n_qubits = fermionic.n_spin_orbitals();
        let mut x = bitvec![0; n_qubits];
        for i in fermionic.reference_occupation() {
            x.set(i, true);
        }
        self.encoding_matrix(n_qubits)
            .apply(&x)
            .iter()
            .by_vals()
            .collect()
    }
}

// ==================
// Two-qubit reduction
// ==================

/// Removes the two symmetry qubits of a parity-mapped operator over block-ordered
/// spin-orbitals.
///
/// Under the parity mapping with all α spin-orbitals preceding all β ones, qubit
/// $`n/2 - 1`$ stores the α-occupation parity and qubit $`n - 1`$ the total parity. Both are
/// conserved by a particle-number- and spin-conserving Hamiltonian, so any $`Z`$ on them can
/// be replaced by its eigenvalue $`(-1)^{N_{\alpha}}`$ or $`(-1)^{N}`$ in the targeted sector.
///
/// # Errors
///
/// Errors if the operator acts on fewer than four qubits or carries an $`X`$ or $`Y`$ on a
/// symmetry qubit, which indicates a symmetry-breaking operator that cannot be reduced.
pub fn reduce_two_qubits(
    op: &QubitOperator,
    n_alpha: usize,
    n_beta: usize,
) -> Result<QubitOperator, anyhow::Error> {
    let n_qubits = op.n_qubits();
    ensure!(
        n_qubits >= 4 && n_qubits % 2 == 0,
        "Two-qubit reduction requires an even number of at least four qubits, got {n_qubits}."
    );
    let alpha_qubit = n_qubits / 2 - 1;
    let total_qubit = n_qubits - 1;
    let alpha_sign = if n_alpha % 2 == 0 { 1.0 } else { -1.0 };
    let total_sign = if (n_alpha + n_beta) % 2 == 0 { 1.0 } else { -1.0 };

    let mut reduced = QubitOperator::zero(n_qubits - 2);
    for (string, coefficient) in op.terms() {
        let mut sign = 1.0;
        let mut kept_ops = Vec::new();
        for k in 0..n_qubits {
            let p = string.get(k);
            if k == alpha_qubit || k == total_qubit {
                match p {
                    Pauli::I => {}
                    Pauli::Z => {
                        sign *= if k == alpha_qubit { alpha_sign } else { total_sign };
                    }
                    Pauli::X | Pauli::Y => {
                        bail!(
                            "Term {string} breaks the parity symmetry on qubit {k} and cannot \
                             be reduced."
                        );
                    }
                }
            } else if p != Pauli::I {
                let reduced_index = if k < alpha_qubit { k } else { k - 1 };
                kept_ops.push((reduced_index, p));
            }
        }
        reduced.add_term(
            PauliString::from_ops(n_qubits - 2, &kept_ops)?,
            coefficient * sign,
        );
    }
    Ok(reduced)
}

/// The reference bitstring after two-qubit reduction: the parity-mapped bitstring with the two
/// symmetry qubits removed.
///
/// # Errors
///
/// Errors if the bitstring covers fewer than four qubits or an odd number of qubits, matching
/// the registers accepted by [`reduce_two_qubits`].
pub fn reduce_reference_bitstring(bits: &[bool]) -> Result<Vec<bool>, anyhow::Error> {
    let n_qubits = bits.len();
    ensure!(
        n_qubits >= 4 && n_qubits % 2 == 0,
        "Two-qubit reduction requires an even number of at least four qubits, got {n_qubits}."
    );
    Ok(bits
        .iter()
        .enumerate()
        .filter(|&(k, _)| k != n_qubits / 2 - 1 && k != n_qubits - 1)
        .map(|(_, &b)| b)
        .collect())
}
