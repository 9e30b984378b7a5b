use approx::assert_relative_eq;
use nalgebra::Point3;

use crate::auxiliary::molecule::{DistanceUnit, Molecule};
use crate::basis::{build_basis, ContractedGaussian};

#[test]
fn test_basis_contracted_normalisation() {
    let cgto = ContractedGaussian::new(
        &[3.425250914, 0.6239137298, 0.1688554040],
        &[0.1543289673, 0.5353281423, 0.4446345422],
        Point3::origin(),
    );
    let mut s = 0.0;
    for (&alpha, &da) in cgto.exponents.iter().zip(cgto.coefficients.iter()) {
        for (&beta, &db) in cgto.exponents.iter().zip(cgto.coefficients.iter()) {
            s += da * db * (std::f64::consts::PI / (alpha + beta)).powf(1.5);
        }
    }
    assert_relative_eq!(s, 1.0, max_relative = 1e-12);
}

#[test]
fn test_basis_build_h2() {
    let mol = Molecule::from_xyz_str("2\n\nH 0.0 0.0 0.0\nH 0.0 0.0 1.4\n", DistanceUnit::Bohr)
        .unwrap();
    let basis = build_basis(&mol, "STO-3G").unwrap();
    assert_eq!(basis.len(), 2);
    assert_eq!(basis[0].exponents.len(), 3);
    assert_relative_eq!(basis[1].center[2], 1.4, max_relative = 1e-12);
}

#[test]
fn test_basis_unsupported_element() {
    let mol = Molecule::from_xyz_str("1\n\nC 0.0 0.0 0.0\n", DistanceUnit::Bohr).unwrap();
    assert!(build_basis(&mol, "sto-3g").is_err());
    let mol_h = Molecule::from_xyz_str("1\n\nH 0.0 0.0 0.0\n", DistanceUnit::Bohr).unwrap();
    assert!(build_basis(&mol_h, "cc-pvdz").is_err());
}
