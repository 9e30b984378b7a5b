use approx::assert_abs_diff_eq;

use crate::auxiliary::molecule::{DistanceUnit, Molecule};
use crate::basis::build_basis;
use crate::integrals::compute_ao_integrals;
use crate::scf::{restricted_hartree_fock, transform_to_mo};

/// Reference values for H2/STO-3G at R = 1.4 a.u. from Szabo & Ostlund, section 3.5.
#[test]
fn test_scf_h2_sto3g() {
    let mol = Molecule::from_xyz_str("2\n\nH 0.0 0.0 0.0\nH 0.0 0.0 1.4\n", DistanceUnit::Bohr)
        .unwrap();
    let basis = build_basis(&mol, "sto-3g").unwrap();
    let ao = compute_ao_integrals(&basis, &mol);
    let scf = restricted_hartree_fock(&ao, 2, 100, 1e-10).unwrap();

    assert_eq!(scf.n_occupied, 1);
    assert_abs_diff_eq!(scf.electronic_energy, -1.8310, epsilon = 2e-3);
    let total = scf.electronic_energy + mol.nuclear_repulsion_energy();
    assert_abs_diff_eq!(total, -1.1167, epsilon = 2e-3);
    assert!(scf.orbital_energies[0] < scf.orbital_energies[1]);
}

#[test]
fn test_scf_mo_transform_h2_sto3g() {
    let mol = Molecule::from_xyz_str("2\n\nH 0.0 0.0 0.0\nH 0.0 0.0 1.4\n", DistanceUnit::Bohr)
        .unwrap();
    let basis = build_basis(&mol, "sto-3g").unwrap();
    let ao = compute_ao_integrals(&basis, &mol);
    let scf = restricted_hartree_fock(&ao, 2, 100, 1e-10).unwrap();
    let mo = transform_to_mo(&ao, &scf, mol.nuclear_repulsion_energy(), 2);

    // Szabo & Ostlund MO-basis values; signs of h_12 depend on orbital phases and are
    // therefore not tested.
    assert_abs_diff_eq!(mo.one_body[(0, 0)], -1.2528, epsilon = 2e-3);
    assert_abs_diff_eq!(mo.one_body[(1, 1)], -0.4756, epsilon = 2e-3);
    assert_abs_diff_eq!(mo.two_body[(0, 0, 0, 0)], 0.6746, epsilon = 2e-3);
    assert_abs_diff_eq!(mo.two_body[(1, 1, 1, 1)], 0.6975, epsilon = 2e-3);
    assert_abs_diff_eq!(mo.two_body[(0, 0, 1, 1)], 0.6636, epsilon = 2e-3);
    assert_abs_diff_eq!(mo.two_body[(0, 1, 0, 1)], 0.1813, epsilon = 2e-3);

    // HF electronic energy reassembled from MO integrals: 2 h_11 + (11|11).
    assert_abs_diff_eq!(
        2.0 * mo.one_body[(0, 0)] + mo.two_body[(0, 0, 0, 0)],
        scf.electronic_energy,
        epsilon = 1e-8
    );
}

#[test]
fn test_scf_rejects_open_shell() {
    let mol = Molecule::from_xyz_str("2\n\nH 0.0 0.0 0.0\nH 0.0 0.0 1.4\n", DistanceUnit::Bohr)
        .unwrap();
    let basis = build_basis(&mol, "sto-3g").unwrap();
    let ao = compute_ao_integrals(&basis, &mol);
    assert!(restricted_hartree_fock(&ao, 1, 100, 1e-10).is_err());
    assert!(restricted_hartree_fock(&ao, 6, 100, 1e-10).is_err());
}
