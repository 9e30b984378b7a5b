//! Qubit operators as sums of weighted Pauli strings.
//!
//! Qubit indexing is little-endian throughout: qubit $`k`$ corresponds to bit $`k`$ of a
//! computational basis index.

use std::fmt;

use anyhow::{self, ensure};
use indexmap::IndexMap;
use itertools::Itertools;
use ndarray::{Array1, Array2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};


/// A single-qubit Pauli operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

impl Pauli {
    /// Computes the single-qubit product `self · other`, returning the resulting Pauli and the
    /// power $`k`$ of the phase $`\mathrm{i}^k`$ it carries.
    fn product(self, other: Pauli) -> (Pauli, u8) {
        use Pauli::*;
        match (self, other) {
            (I, p) => (p, 0),
            (p, I) => (p, 0),
            (X, X) | (Y, Y) | (Z, Z) => (I, 0),
            (X, Y) => (Z, 1),
            (Y, X) => (Z, 3),
            (Y, Z) => (X, 1),
            (Z, Y) => (X, 3),
            (Z, X) => (Y, 1),
            (X, Z) => (Y, 3),
        }
    }

    fn to_char(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }
}

/// A dense Pauli string $`P_0 \otimes P_1 \otimes \cdots`$ over a fixed number of qubits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PauliString(Vec<Pauli>);

impl PauliString {
    /// The identity string on `n_qubits` qubits.
    pub fn identity(n_qubits: usize) -> Self {
        PauliString(vec![Pauli::I; n_qubits])
    }

    /// Constructs a string from `(qubit, operator)` pairs on `n_qubits` qubits.
    pub fn from_ops(n_qubits: usize, ops: &[(usize, Pauli)]) -> Result<Self, anyhow::Error> {
        let mut paulis = vec![Pauli::I; n_qubits];
        for &(qubit, op) in ops {
            ensure!(
                qubit < n_qubits,
                "Qubit index {qubit} out of range for {n_qubits} qubits."
            );
            paulis[qubit] = op;
        }
        Ok(PauliString(paulis))
    }

    /// The number of qubits this string acts on.
    pub fn n_qubits(&self) -> usize {
        self.0.len()
    }

    /// The Pauli operator on qubit `k`.
    pub fn get(&self, k: usize) -> Pauli {
        self.0[k]
    }

    /// Replaces the operator on qubit `k`, accumulating the product phase.
    fn compose_at(&mut self, k: usize, op: Pauli) -> u8 {
        let (product, phase) = self.0[k].product(op);
        self.0[k] = product;
        phase
    }

    /// Computes the string product `self · other`, returning the resulting string and the power
    /// $`k`$ of the accumulated phase $`\mathrm{i}^k`$.
    pub fn product(&self, other: &PauliString) -> (PauliString, u8) {
        debug_assert_eq!(self.n_qubits(), other.n_qubits());
        let mut phase = 0u8;
        let paulis = self
            .0
            .iter()
            .zip(other.0.iter())
            .map(|(&a, &b)| {
                let (p, k) = a.product(b);
                phase = (phase + k) % 4;
                p
            })
            .collect::<Vec<_>>();
        (PauliString(paulis), phase)
    }

    /// Whether every non-identity operator in this string is `Z`.
    pub fn is_diagonal(&self) -> bool {
        self.0.iter().all(|&p| p == Pauli::I || p == Pauli::Z)
    }

    /// Applies this string to a computational basis state, returning the resulting basis index
    /// and the phase.
    pub fn apply_to_basis_state(&self, basis: usize) -> (usize, Complex64) {
        let mut out = basis;
        let mut phase = Complex64::new(1.0, 0.0);
        for (k, &p) in self.0.iter().enumerate() {
            let bit = (basis >> k) & 1;
            match p {
                Pauli::I => {}
                Pauli::X => out ^= 1 << k,
                Pauli::Y => {
                    out ^= 1 << k;
                    phase *= if bit == 0 {
                        Complex64::new(0.0, 1.0)
                    } else {
                        Complex64::new(0.0, -1.0)
                    };
                }
                Pauli::Z => {
                    if bit == 1 {
                        phase = -phase;
                    }
                }
            }
        }
        (out, phase)
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in self.0.iter() {
            write!(f, "{}", p.to_char())?;
        }
        Ok(())
    }
}

/// A qubit operator: a sum of complex-weighted Pauli strings with deterministic term order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QubitOperator {
    n_qubits: usize,
    terms: IndexMap<PauliString, Complex64>,
}

impl QubitOperator {
    /// The zero operator on `n_qubits` qubits.
    pub fn zero(n_qubits: usize) -> Self {
        QubitOperator {
            n_qubits,
            terms: IndexMap::new(),
        }
    }

    /// A scalar multiple of the identity on `n_qubits` qubits.
    pub fn scalar(n_qubits: usize, value: Complex64) -> Self {
        let mut op = Self::zero(n_qubits);
        op.add_term(PauliString::identity(n_qubits), value);
        op
    }

    /// The number of qubits this operator acts on.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// The number of stored Pauli terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// Iterates over the stored `(string, coefficient)` terms.
    pub fn terms(&self) -> impl Iterator<Item = (&PauliString, &Complex64)> {
        self.terms.iter()
    }

    /// Accumulates a weighted Pauli string into this operator.
    pub fn add_term(&mut self, string: PauliString, coefficient: Complex64) {
        debug_assert_eq!(string.n_qubits(), self.n_qubits);
        let entry = self.terms.entry(string).or_insert(Complex64::new(0.0, 0.0));
        *entry += coefficient;
    }

    /// Adds another operator into this one.
    pub fn add_assign(&mut self, other: &QubitOperator) {
        for (string, coefficient) in other.terms.iter() {
            self.add_term(string.clone(), *coefficient);
        }
    }

    /// Multiplies every coefficient by a scalar.
    pub fn scale(&mut self, factor: Complex64) {
        for coefficient in self.terms.values_mut() {
            *coefficient *= factor;
        }
    }

    /// Computes the operator product `self · other`.
    pub fn compose(&self, other: &QubitOperator) -> QubitOperator {
        let mut result = QubitOperator::zero(self.n_qubits);
        for (string_a, coeff_a) in self.terms.iter() {
            for (string_b, coeff_b) in other.terms.iter() {
                let (string, phase) = string_a.product(string_b);
                let phase_factor = match phase {
                    0 => Complex64::new(1.0, 0.0),
                    1 => Complex64::new(0.0, 1.0),
                    2 => Complex64::new(-1.0, 0.0),
                    _ => Complex64::new(0.0, -1.0),
                };
                result.add_term(string, coeff_a * coeff_b * phase_factor);
            }
        }
        result
    }

    /// The Hermitian adjoint of this operator.
    pub fn adjoint(&self) -> QubitOperator {
        // Pauli strings are self-adjoint, so only the coefficients conjugate.
        let mut result = QubitOperator::zero(self.n_qubits);
        for (string, coefficient) in self.terms.iter() {
            result.add_term(string.clone(), coefficient.conj());
        }
        result
    }

    /// Removes all terms whose coefficient magnitude does not exceed `threshold`.
    pub fn chop(&mut self, threshold: f64) {
        self.terms
            .retain(|_, coefficient| coefficient.norm() > threshold);
    }

    /// The largest coefficient magnitude of any non-identity term, used to decide whether two
    /// operators differ beyond numerical noise.
    pub fn max_offdiagonal_norm(&self) -> f64 {
        self.terms
            .iter()
            .filter(|(string, _)| **string != PauliString::identity(self.n_qubits))
            .map(|(_, coefficient)| coefficient.norm())
            .fold(0.0, f64::max)
    }

    /// Realises this operator as a dense matrix in the computational basis.
    pub fn to_matrix(&self) -> Array2<Complex64> {
        let dim = 1usize << self.n_qubits;
        let mut matrix = Array2::<Complex64>::zeros((dim, dim));
        for (string, coefficient) in self.terms.iter() {
            for basis in 0..dim {
                let (out, phase) = string.apply_to_basis_state(basis);
                matrix[(out, basis)] += coefficient * phase;
            }
        }
        matrix
    }

    /// Computes the expectation value $`\langle\psi|\hat{O}|\psi\rangle`$ for a statevector.
    pub fn expectation(&self, state: &Array1<Complex64>) -> Complex64 {
        debug_assert_eq!(state.len(), 1usize << self.n_qubits);
        let mut value = Complex64::new(0.0, 0.0);
        for (string, coefficient) in self.terms.iter() {
            let mut term_value = Complex64::new(0.0, 0.0);
            for (basis, amplitude) in state.iter().enumerate() {
                if amplitude.norm_sqr() == 0.0 {
                    continue;
                }
                let (out, phase) = string.apply_to_basis_state(basis);
                term_value += state[out].conj() * phase * amplitude;
            }
            value += coefficient * term_value;
        }
        value
    }
}

impl fmt::Display for QubitOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (string, coefficient) in self
            .terms
            .iter()
            .sorted_by(|(string_a, _), (string_b, _)| {
                string_a.to_string().cmp(&string_b.to_string())
            })
        {
            if coefficient.im.abs() > 1e-12 {
                writeln!(
                    f,
                    "  {:+.12} {:+.12}i * {string}",
                    coefficient.re, coefficient.im
                )?;
            } else {
                writeln!(f, "  {:+.12} * {string}", coefficient.re)?;
            }
        }
        Ok(())
    }
}
