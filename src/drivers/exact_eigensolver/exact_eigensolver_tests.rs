use approx::assert_abs_diff_eq;
use ndarray::{Array2, Array4};

use crate::drivers::exact_eigensolver::{ExactEigensolverDriver, ExactEigensolverParams};
use crate::drivers::hamiltonian::HamiltonianRecord;
use crate::drivers::QFermDriver;
use crate::fermion::FermionicOperator;
use crate::integrals::MolecularIntegrals;
use crate::mapping::QubitMapping;

/// MO-basis integrals for H2/STO-3G at R = 1.4 a.u. from Szabo & Ostlund, section 3.5.
fn szabo_h2_record(mapping: QubitMapping, particle_hole: bool) -> HamiltonianRecord {
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
    let (fermionic, particle_hole_shift) = if particle_hole {
        fermionic.particle_hole_transformation()
    } else {
        (fermionic, 0.0)
    };
    HamiltonianRecord {
        qubit_hamiltonian: mapping.map(&fermionic, 1e-12).unwrap(),
        core_energy: 1.0 / 1.4,
        particle_hole_shift,
        reference_bits: mapping.reference_bitstring(&fermionic),
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
fn test_exact_eigensolver_h2() {
    let record = szabo_h2_record(QubitMapping::JordanWigner, false);
    let params = ExactEigensolverParams::default();
    let mut driver = ExactEigensolverDriver::builder()
        .parameters(&params)
        .hamiltonian(&record)
        .build()
        .unwrap();
    driver.run().unwrap();
    let res = driver.result().unwrap();

    assert_abs_diff_eq!(res.electronic_energy, szabo_h2_fci_energy(), epsilon = 1e-8);
    assert_abs_diff_eq!(
        res.total_energy,
        szabo_h2_fci_energy() + 1.0 / 1.4,
        epsilon = 1e-8
    );
    assert_eq!(res.eigenvalues.len(), 1);
}

#[test]
fn test_exact_eigensolver_particle_hole_consistency() {
    // The assembled electronic energy does not depend on whether the particle-hole
    // transformation was applied before mapping.
    let plain = szabo_h2_record(QubitMapping::Parity, false);
    let shifted = szabo_h2_record(QubitMapping::Parity, true);
    let params = ExactEigensolverParams::default();

    let mut plain_driver = ExactEigensolverDriver::builder()
        .parameters(&params)
        .hamiltonian(&plain)
        .build()
        .unwrap();
    plain_driver.run().unwrap();
    let mut shifted_driver = ExactEigensolverDriver::builder()
        .parameters(&params)
        .hamiltonian(&shifted)
        .build()
        .unwrap();
    shifted_driver.run().unwrap();

    assert_abs_diff_eq!(
        plain_driver.result().unwrap().electronic_energy,
        shifted_driver.result().unwrap().electronic_energy,
        epsilon = 1e-10
    );
}

#[test]
fn test_exact_eigensolver_multiple_states() {
    let record = szabo_h2_record(QubitMapping::JordanWigner, false);
    let params = ExactEigensolverParams::builder()
        .n_states(4)
        .build()
        .unwrap();
    let mut driver = ExactEigensolverDriver::builder()
        .parameters(&params)
        .hamiltonian(&record)
        .build()
        .unwrap();
    driver.run().unwrap();
    let res = driver.result().unwrap();

    assert_eq!(res.eigenvalues.len(), 4);
    for pair in res.eigenvalues.windows(2) {
        assert!(pair[0] <= pair[1] + 1e-12);
    }
}

#[test]
fn test_exact_eigensolver_qubit_limit() {
    let record = szabo_h2_record(QubitMapping::JordanWigner, false);
    let params = ExactEigensolverParams::builder()
        .max_qubits(2)
        .build()
        .unwrap();
    let mut driver = ExactEigensolverDriver::builder()
        .parameters(&params)
        .hamiltonian(&record)
        .build()
        .unwrap();
    assert!(driver.run().is_err());
    assert!(driver.result().is_err());
}
