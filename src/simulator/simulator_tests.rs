use approx::assert_abs_diff_eq;
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::qubit::{Pauli, PauliString, QubitOperator};
use crate::simulator::{RyAnsatz, Statevector};

fn norm(state: &Statevector) -> f64 {
    state
        .amplitudes()
        .iter()
        .map(|a| a.norm_sqr())
        .sum::<f64>()
        .sqrt()
}

#[test]
fn test_simulator_basis_state_preparation() {
    // Little-endian: |q1 q0⟩ = |01⟩ has index 1.
    let state = Statevector::from_bitstring(&[true, false]);
    assert_abs_diff_eq!(state.amplitudes()[1].re, 1.0, epsilon = 1e-14);
    assert_abs_diff_eq!(state.amplitudes()[0].norm(), 0.0, epsilon = 1e-14);
    assert_abs_diff_eq!(state.amplitudes()[2].norm(), 0.0, epsilon = 1e-14);
}

#[test]
fn test_simulator_ry_rotation() {
    // R_y(π)|0⟩ = |1⟩.
    let mut state = Statevector::zero_state(1);
    state.apply_ry(0, PI);
    assert_abs_diff_eq!(state.amplitudes()[0].norm(), 0.0, epsilon = 1e-14);
    assert_abs_diff_eq!(state.amplitudes()[1].re, 1.0, epsilon = 1e-14);

    // R_y(π/2)|0⟩ = (|0⟩ + |1⟩)/√2 gives ⟨X⟩ = 1.
    let mut plus = Statevector::zero_state(1);
    plus.apply_ry(0, PI / 2.0);
    let mut x = QubitOperator::zero(1);
    x.add_term(
        PauliString::from_ops(1, &[(0, Pauli::X)]).unwrap(),
        Complex64::new(1.0, 0.0),
    );
    assert_abs_diff_eq!(x.expectation(plus.amplitudes()).re, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(norm(&plus), 1.0, epsilon = 1e-14);
}

#[test]
fn test_simulator_cnot() {
    // CNOT(0→1)|01⟩ = |11⟩.
    let mut state = Statevector::from_bitstring(&[true, false]);
    state.apply_cnot(0, 1);
    assert_abs_diff_eq!(state.amplitudes()[3].re, 1.0, epsilon = 1e-14);

    // Control clear: no action.
    let mut idle = Statevector::from_bitstring(&[false, true]);
    idle.apply_cnot(0, 1);
    assert_abs_diff_eq!(idle.amplitudes()[2].re, 1.0, epsilon = 1e-14);
}

#[test]
fn test_simulator_ansatz_identity_at_zero_parameters() {
    let ansatz = RyAnsatz::new(2, 2);
    assert_eq!(ansatz.n_parameters(), 6);
    let state = ansatz
        .prepare(&[true, false], &vec![0.0; ansatz.n_parameters()])
        .unwrap();
    assert_abs_diff_eq!(state.amplitudes()[1].re, 1.0, epsilon = 1e-14);
    assert_abs_diff_eq!(norm(&state), 1.0, epsilon = 1e-14);
}

#[test]
fn test_simulator_ansatz_parameter_validation() {
    let ansatz = RyAnsatz::new(2, 1);
    assert!(ansatz.prepare(&[true, false], &[0.0; 3]).is_err());
    assert!(ansatz.prepare(&[true], &[0.0; 4]).is_err());
}

#[test]
fn test_simulator_ansatz_preserves_norm() {
    let ansatz = RyAnsatz::new(3, 2);
    let parameters = (0..ansatz.n_parameters())
        .map(|i| 0.3 * (i as f64) - 0.7)
        .collect::<Vec<_>>();
    let state = ansatz.prepare(&[true, false, true], &parameters).unwrap();
    assert_abs_diff_eq!(norm(&state), 1.0, epsilon = 1e-12);
}
