use approx::assert_abs_diff_eq;
use argmin::core::{CostFunction, Gradient};
use ndarray::{Array1, Array2, Array4};

use crate::drivers::hamiltonian::HamiltonianRecord;
use crate::drivers::vqe::{VqeDriver, VqeParams, VqeProblem};
use crate::drivers::QFermDriver;
use crate::fermion::FermionicOperator;
use crate::integrals::MolecularIntegrals;
use crate::mapping::{reduce_reference_bitstring, reduce_two_qubits, QubitMapping};
use crate::simulator::RyAnsatz;

/// A two-qubit-reduced parity Hamiltonian for H2/STO-3G at R = 1.4 a.u. from the Szabo &
/// Ostlund MO integrals.
fn reduced_h2_record() -> HamiltonianRecord {
    let mut one_body = Array2::<f64>::zeros((2, 2));
    one_body[(0, 0)] = -1.2528;
    one_body[(1, 1)] = -0.4756;

    let mut two_body = Array4::<f64>::zeros((2, 2, 2, 2));
    two_body[(0, 0, 0, 0)] = 0.6746;
    two_body[(1, 1, 1, 1)] = 0.6975;
    two_body[(0, 0, 1, 1)] = 0.6636;
    two_body[(1, 1, 0, 0)] = 0.6636;
    for &(p, q, r, s) in &[
        (0, 1, 0, 1),
        (1, 0, 0, 1),
        (0, 1, 1, 0),
        (1, 0, 1, 0),
    ] {
        two_body[(p, q, r, s)] = 0.1813;
    }

    let fermionic = FermionicOperator::from_integrals(&MolecularIntegrals {
        one_body,
        two_body,
        core_energy: 1.0 / 1.4,
        n_electrons: 2,
    });
    let mapped = QubitMapping::Parity.map(&fermionic, 1e-12).unwrap();
    let reduced = reduce_two_qubits(&mapped, 1, 1).unwrap();
    let reference_bits =
        reduce_reference_bitstring(&QubitMapping::Parity.reference_bitstring(&fermionic))
            .unwrap();
    HamiltonianRecord {
        qubit_hamiltonian: reduced,
        core_energy: 1.0 / 1.4,
        particle_hole_shift: 0.0,
        reference_bits,
        n_electrons: (1, 1),
    }
}

fn szabo_h2_fci_energy() -> f64 {
    let h11: f64 = 2.0 * (-1.2528) + 0.6746;
    let h22 = 2.0 * (-0.4756) + 0.6975;
    let k = 0.1813;
    0.5 * (h11 + h22) - (0.25 * (h11 - h22) * (h11 - h22) + k * k).sqrt()
}

#[test]
fn test_vqe_cost_at_reference_state() {
    // With all rotation angles zero the trial circuit is the identity, so the cost is the
    // Hartree-Fock electronic energy, 2 h_11 + (11|11).
    let record = reduced_h2_record();
    let problem = VqeProblem {
        hamiltonian: record.qubit_hamiltonian.clone(),
        ansatz: RyAnsatz::new(2, 1),
        initial_bits: record.reference_bits.clone(),
    };
    let cost = problem.cost(&Array1::zeros(4)).unwrap();
    assert_abs_diff_eq!(cost, 2.0 * (-1.2528) + 0.6746, epsilon = 1e-10);
}

#[test]
fn test_vqe_parameter_shift_gradient() {
    // The parameter-shift gradient agrees with a central finite difference.
    let record = reduced_h2_record();
    let problem = VqeProblem {
        hamiltonian: record.qubit_hamiltonian.clone(),
        ansatz: RyAnsatz::new(2, 1),
        initial_bits: record.reference_bits.clone(),
    };
    let theta = Array1::from_vec(vec![0.3, -0.2, 0.7, 0.1]);
    let analytic = problem.gradient(&theta).unwrap();
    let step = 1e-5;
    for k in 0..theta.len() {
        let mut plus = theta.clone();
        plus[k] += step;
        let mut minus = theta.clone();
        minus[k] -= step;
        let numeric =
            (problem.cost(&plus).unwrap() - problem.cost(&minus).unwrap()) / (2.0 * step);
        assert_abs_diff_eq!(analytic[k], numeric, epsilon = 1e-7);
    }
}

#[test]
fn test_vqe_driver_h2() {
    let record = reduced_h2_record();
    let params = VqeParams::default();
    let mut driver = VqeDriver::builder()
        .parameters(&params)
        .hamiltonian(&record)
        .build()
        .unwrap();
    driver.run().unwrap();
    let res = driver.result().unwrap();

    assert_abs_diff_eq!(res.electronic_energy, szabo_h2_fci_energy(), epsilon = 1e-5);
    assert_abs_diff_eq!(
        res.total_energy,
        res.electronic_energy + 1.0 / 1.4,
        epsilon = 1e-12
    );
    assert!(res.n_iterations > 0);
    assert_eq!(res.optimal_parameters.len(), 2 * (params.depth + 1));
}

#[test]
fn test_vqe_driver_variational_bound() {
    // Even from the all-zeros state the optimised energy never undercuts the exact ground
    // state.
    let record = reduced_h2_record();
    let params = VqeParams::builder()
        .use_reference_state(false)
        .build()
        .unwrap();
    let mut driver = VqeDriver::builder()
        .parameters(&params)
        .hamiltonian(&record)
        .build()
        .unwrap();
    driver.run().unwrap();
    let res = driver.result().unwrap();
    assert!(res.electronic_energy >= szabo_h2_fci_energy() - 1e-9);
}

#[test]
fn test_vqe_driver_randomised_start() {
    // A randomised start from the reference bitstring still reaches the ground state and never
    // undercuts it.
    let record = reduced_h2_record();
    let params = VqeParams::builder()
        .randomise_initial_parameters(true)
        .build()
        .unwrap();
    let mut driver = VqeDriver::builder()
        .parameters(&params)
        .hamiltonian(&record)
        .build()
        .unwrap();
    driver.run().unwrap();
    let res = driver.result().unwrap();
    assert_abs_diff_eq!(res.electronic_energy, szabo_h2_fci_energy(), epsilon = 1e-5);
    assert!(res.electronic_energy >= szabo_h2_fci_energy() - 1e-9);
}

#[test]
fn test_vqe_driver_rejects_mismatched_reference() {
    let mut record = reduced_h2_record();
    record.reference_bits = vec![true, false, true];
    let params = VqeParams::default();
    let mut driver = VqeDriver::builder()
        .parameters(&params)
        .hamiltonian(&record)
        .build()
        .unwrap();
    assert!(driver.run().is_err());
}
