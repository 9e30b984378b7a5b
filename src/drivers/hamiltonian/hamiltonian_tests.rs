use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use ndarray_linalg::{Eigh, UPLO};

use crate::drivers::hamiltonian::{HamiltonianDriver, HamiltonianParams, IntegralSource};
use crate::drivers::QFermDriver;
use crate::mapping::QubitMapping;
use crate::qubit::QubitOperator;

/// The electronic ground-state energy of H2/STO-3G at 0.735 Å.
const H2_FCI_ELECTRONIC: f64 = -1.857275;

fn gaussian_h2_source() -> IntegralSource {
    IntegralSource::Gaussian {
        xyz: PathBuf::from("tests/xyz/h2.xyz"),
        distance_unit: Default::default(),
        basis_set: "sto-3g".to_string(),
        charge: 0,
        multiplicity: 1,
        scf_max_cycles: 128,
        scf_energy_threshold: 1e-10,
    }
}

fn lowest_eigenvalue(op: &QubitOperator) -> f64 {
    let (eigenvalues, _) = op.to_matrix().eigh(UPLO::Lower).unwrap();
    eigenvalues.iter().copied().fold(f64::INFINITY, f64::min)
}

#[test]
fn test_hamiltonian_driver_h2_all_mappings() {
    // All three mappings yield the same ground-state electronic energy for H2 at the
    // equilibrium geometry.
    for mapping in [
        QubitMapping::JordanWigner,
        QubitMapping::Parity,
        QubitMapping::BravyiKitaev,
    ] {
        let params = HamiltonianParams::builder()
            .source(gaussian_h2_source())
            .mapping(mapping)
            .build()
            .unwrap();
        let mut driver = HamiltonianDriver::builder()
            .parameters(&params)
            .build()
            .unwrap();
        driver.run().unwrap();
        let res = driver.result().unwrap();

        assert_eq!(res.n_spin_orbitals, 4);
        assert_eq!(res.record.qubit_hamiltonian.n_qubits(), 4);
        assert_eq!(res.record.n_electrons, (1, 1));
        let electronic =
            lowest_eigenvalue(&res.record.qubit_hamiltonian) + res.record.particle_hole_shift;
        assert_abs_diff_eq!(electronic, H2_FCI_ELECTRONIC, epsilon = 1e-4);
    }
}

#[test]
fn test_hamiltonian_driver_reference_bitstrings() {
    let params = HamiltonianParams::builder()
        .source(gaussian_h2_source())
        .mapping(QubitMapping::JordanWigner)
        .build()
        .unwrap();
    let mut driver = HamiltonianDriver::builder()
        .parameters(&params)
        .build()
        .unwrap();
    driver.run().unwrap();
    assert_eq!(
        driver.result().unwrap().record.reference_bits,
        vec![true, false, true, false]
    );
}

#[test]
fn test_hamiltonian_driver_parity_reduction_and_particle_hole() {
    let params = HamiltonianParams::builder()
        .source(gaussian_h2_source())
        .mapping(QubitMapping::Parity)
        .particle_hole(true)
        .two_qubit_reduction(true)
        .build()
        .unwrap();
    let mut driver = HamiltonianDriver::builder()
        .parameters(&params)
        .build()
        .unwrap();
    driver.run().unwrap();
    let res = driver.result().unwrap();

    assert_eq!(res.record.qubit_hamiltonian.n_qubits(), 2);
    assert_eq!(res.record.reference_bits.len(), 2);
    // The particle-hole shift is the Hartree-Fock electronic energy at this geometry,
    // E(HF, total) - E(nuc) = -1.1167 - 0.7200.
    assert_abs_diff_eq!(res.record.particle_hole_shift, -1.8366, epsilon = 5e-3);
    // Shifted spectrum plus shift recovers the FCI electronic energy.
    let electronic =
        lowest_eigenvalue(&res.record.qubit_hamiltonian) + res.record.particle_hole_shift;
    assert_abs_diff_eq!(electronic, H2_FCI_ELECTRONIC, epsilon = 1e-4);
    // Total-energy assembly includes the nuclear repulsion.
    assert_abs_diff_eq!(
        res.total_energy(lowest_eigenvalue(&res.record.qubit_hamiltonian)),
        electronic + res.record.core_energy,
        epsilon = 1e-12
    );
}

#[test]
fn test_hamiltonian_driver_reduction_requires_parity() {
    let params = HamiltonianParams::builder()
        .source(gaussian_h2_source())
        .mapping(QubitMapping::JordanWigner)
        .two_qubit_reduction(true)
        .build()
        .unwrap();
    let mut driver = HamiltonianDriver::builder()
        .parameters(&params)
        .build()
        .unwrap();
    assert!(driver.run().is_err());
    assert!(driver.result().is_err());
}

#[test]
fn test_hamiltonian_driver_rejects_open_shell_multiplicity() {
    // A triplet request cannot be honoured by the restricted engine and must error rather than
    // silently return the singlet answer.
    let IntegralSource::Gaussian { xyz, .. } = gaussian_h2_source() else {
        unreachable!();
    };
    let params = HamiltonianParams::builder()
        .source(IntegralSource::Gaussian {
            xyz,
            distance_unit: Default::default(),
            basis_set: "sto-3g".to_string(),
            charge: 0,
            multiplicity: 3,
            scf_max_cycles: 128,
            scf_energy_threshold: 1e-10,
        })
        .build()
        .unwrap();
    let mut driver = HamiltonianDriver::builder()
        .parameters(&params)
        .build()
        .unwrap();
    assert!(driver.run().is_err());
    assert!(driver.result().is_err());
}

#[test]
fn test_hamiltonian_driver_fcidump_source() {
    let params = HamiltonianParams::builder()
        .source(IntegralSource::FciDump {
            path: PathBuf::from("tests/fcidump/h2.fcidump"),
        })
        .mapping(QubitMapping::BravyiKitaev)
        .build()
        .unwrap();
    let mut driver = HamiltonianDriver::builder()
        .parameters(&params)
        .build()
        .unwrap();
    driver.run().unwrap();
    let res = driver.result().unwrap();

    assert_eq!(res.record.qubit_hamiltonian.n_qubits(), 4);
    assert_abs_diff_eq!(res.record.core_energy, 0.7142857143, epsilon = 1e-12);
    // FCI electronic energy of the Szabo integrals from the 2x2 singlet secular problem.
    let h11: f64 = 2.0 * (-1.2528) + 0.6746;
    let h22 = 2.0 * (-0.4756) + 0.6975;
    let k = 0.1813;
    let reference = 0.5 * (h11 + h22) - (0.25 * (h11 - h22) * (h11 - h22) + k * k).sqrt();
    assert_abs_diff_eq!(
        lowest_eigenvalue(&res.record.qubit_hamiltonian),
        reference,
        epsilon = 1e-8
    );
}
