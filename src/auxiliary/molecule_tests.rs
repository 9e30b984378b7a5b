use approx::assert_relative_eq;

use crate::auxiliary::atom::{Atom, ElementMap, ANGSTROM_TO_BOHR};
use crate::auxiliary::molecule::{DistanceUnit, Molecule};

const H2_XYZ: &str = "2\n\nH 0.0 0.0 0.0\nH 0.0 0.0 0.735\n";

#[test]
fn test_molecule_from_xyz_str() {
    let mol = Molecule::from_xyz_str(H2_XYZ, DistanceUnit::Angstrom).unwrap();
    assert_eq!(mol.atoms.len(), 2);
    assert_eq!(mol.atoms[0].atomic_number, 1);
    assert_relative_eq!(
        mol.atoms[1].coordinates[2],
        0.735 * ANGSTROM_TO_BOHR,
        max_relative = 1e-12
    );
    assert_eq!(mol.n_electrons().unwrap(), 2);
    assert_eq!(mol.n_alpha_beta().unwrap(), (1, 1));
}

#[test]
fn test_molecule_element_lookup_through_local_map() {
    // The element map lives only as long as this test body.
    let emap = ElementMap::new();
    let atom = Atom::from_xyz_line("He 0.0 0.0 0.5", &emap, 1.0).unwrap();
    assert_eq!(atom.atomic_number, 2);
    assert_relative_eq!(atom.coordinates[2], 0.5, max_relative = 1e-12);
    assert!(emap.get("Xx").is_none());
}

#[test]
fn test_molecule_nuclear_repulsion() {
    let mol = Molecule::from_xyz_str(H2_XYZ, DistanceUnit::Angstrom).unwrap();
    // 1/R with R = 0.735 Å.
    assert_relative_eq!(
        mol.nuclear_repulsion_energy(),
        1.0 / (0.735 * ANGSTROM_TO_BOHR),
        max_relative = 1e-12
    );

    let mol_bohr = Molecule::from_xyz_str("2\n\nH 0.0 0.0 0.0\nH 0.0 0.0 1.4\n", DistanceUnit::Bohr)
        .unwrap();
    assert_relative_eq!(mol_bohr.nuclear_repulsion_energy(), 1.0 / 1.4, max_relative = 1e-12);
}

#[test]
fn test_molecule_charge_multiplicity() {
    let mol = Molecule::from_xyz_str(H2_XYZ, DistanceUnit::Angstrom)
        .unwrap()
        .with_charge_and_multiplicity(1, 2);
    assert_eq!(mol.n_electrons().unwrap(), 1);
    assert_eq!(mol.n_alpha_beta().unwrap(), (1, 0));

    let bad = Molecule::from_xyz_str(H2_XYZ, DistanceUnit::Angstrom)
        .unwrap()
        .with_charge_and_multiplicity(0, 2);
    assert!(bad.n_alpha_beta().is_err());

    let zero = Molecule::from_xyz_str(H2_XYZ, DistanceUnit::Angstrom)
        .unwrap()
        .with_charge_and_multiplicity(0, 0);
    assert!(zero.n_alpha_beta().is_err());
}

#[test]
fn test_molecule_malformed_xyz() {
    assert!(Molecule::from_xyz_str("3\n\nH 0.0 0.0 0.0\n", DistanceUnit::Angstrom).is_err());
    assert!(Molecule::from_xyz_str("1\n\nXx 0.0 0.0 0.0\n", DistanceUnit::Angstrom).is_err());
}
