//! A dense statevector simulator for variational circuits.
//!
//! Basis indices are little-endian: qubit $`k`$ corresponds to bit $`k`$ of a computational
//! basis index.

use anyhow::{self, ensure};
use ndarray::Array1;
use num_complex::Complex64;

#[cfg(test)]
#[path = "simulator_tests.rs"]
mod simulator_tests;

/// A normalised pure state over a fixed number of qubits.
#[derive(Clone, Debug)]
pub struct Statevector {
    n_qubits: usize,
    amplitudes: Array1<Complex64>,
}

impl Statevector {
    /// The computational basis state with the given qubit values.
    pub fn from_bitstring(bits: &[bool]) -> Self {
        let n_qubits = bits.len();
        let index = bits
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .fold(0usize, |acc, (k, _)| acc | (1 << k));
        let mut amplitudes = Array1::<Complex64>::zeros(1 << n_qubits);
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Statevector {
            n_qubits,
            amplitudes,
        }
    }

    /// The all-zeros basis state.
    pub fn zero_state(n_qubits: usize) -> Self {
        Self::from_bitstring(&vec![false; n_qubits])
    }

    /// The number of qubits.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// The amplitude vector in the computational basis.
    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.amplitudes
    }

    /// Applies a $`Y`$-rotation $`R_y(\theta) = \exp(-\mathrm{i} \theta Y / 2)`$ to one qubit.
    pub fn apply_ry(&mut self, qubit: usize, theta: f64) {
        debug_assert!(qubit < self.n_qubits);
        let cos = (0.5 * theta).cos();
        let sin = (0.5 * theta).sin();
        let mask = 1usize << qubit;
        for index in 0..self.amplitudes.len() {
            if index & mask == 0 {
                let a0 = self.amplitudes[index];
                let a1 = self.amplitudes[index | mask];
                self.amplitudes[index] = cos * a0 - sin * a1;
                self.amplitudes[index | mask] = sin * a0 + cos * a1;
            }
        }
    }

    /// Applies a controlled-NOT gate.
    pub fn apply_cnot(&mut self, control: usize, target: usize) {
        debug_assert!(control < self.n_qubits && target < self.n_qubits && control != target);
        let control_mask = 1usize << control;
        let target_mask = 1usize << target;
        for index in 0..self.amplitudes.len() {
            if index & control_mask != 0 && index & target_mask == 0 {
                self.amplitudes.swap(index, index | target_mask);
            }
        }
    }
}

/// A hardware-efficient trial circuit of $`R_y`$ rotations interleaved with linear
/// controlled-NOT entangling chains.
///
/// The circuit consists of an initial rotation layer followed by `depth` repetitions of an
/// entangling chain and another rotation layer, giving
/// $`n_{\mathrm{qubits}} (d + 1)`$ real parameters. With all parameters zero the circuit is the
/// identity, so the prepared state coincides with the initial basis state.
#[derive(Clone, Debug)]
pub struct RyAnsatz {
    n_qubits: usize,
    depth: usize,
}

impl RyAnsatz {
    pub fn new(n_qubits: usize, depth: usize) -> Self {
        RyAnsatz { n_qubits, depth }
    }

    /// The number of variational parameters.
    pub fn n_parameters(&self) -> usize {
        self.n_qubits * (self.depth + 1)
    }

    /// Prepares the trial state from an initial basis state and a parameter vector.
    ///
    /// # Errors
    ///
    /// Errors if the bitstring length or the parameter count does not match the circuit.
    pub fn prepare(
        &self,
        initial_bits: &[bool],
        parameters: &[f64],
    ) -> Result<Statevector, anyhow::Error> {
        ensure!(
            initial_bits.len() == self.n_qubits,
            "Expected {} initial qubit values, got {}.",
            self.n_qubits,
            initial_bits.len()
        );
        ensure!(
            parameters.len() == self.n_parameters(),
            "Expected {} circuit parameters, got {}.",
            self.n_parameters(),
            parameters.len()
        );
        let mut state = Statevector::from_bitstring(initial_bits);
        let mut parameter_iter = parameters.iter();
        for layer in 0..=self.depth {
            if layer > 0 && self.n_qubits > 1 {
                for qubit in 0..self.n_qubits - 1 {
                    state.apply_cnot(qubit, qubit + 1);
                }
            }
            for qubit in 0..self.n_qubits {
                if let Some(&theta) = parameter_iter.next() {
                    state.apply_ry(qubit, theta);
                }
            }
        }
        Ok(state)
    }
}
