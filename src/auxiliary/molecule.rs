//! Molecular geometries.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{self, ensure, format_err, Context};
use serde::{Deserialize, Serialize};

use crate::auxiliary::atom::{Atom, ElementMap, ANGSTROM_TO_BOHR};

#[cfg(test)]
#[path = "molecule_tests.rs"]
mod molecule_tests;

/// An enumerated type for the distance units of input coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DistanceUnit {
    /// Variant for coordinates specified in Ångström.
    #[default]
    Angstrom,

    /// Variant for coordinates specified in Bohr.
    Bohr,
}

impl DistanceUnit {
    /// Returns the factor converting coordinates in this unit to Bohr.
    pub fn to_bohr_factor(&self) -> f64 {
        match self {
            DistanceUnit::Angstrom => ANGSTROM_TO_BOHR,
            DistanceUnit::Bohr => 1.0,
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceUnit::Angstrom => write!(f, "Ångström"),
            DistanceUnit::Bohr => write!(f, "Bohr"),
        }
    }
}

/// A structure containing the atoms constituting a molecule.
///
/// Coordinates are always stored in Bohr.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Molecule {
    /// The atoms constituting this molecule.
    pub atoms: Vec<Atom>,

    /// The total molecular charge.
    pub charge: i32,

    /// The spin multiplicity, $`2S + 1`$.
    pub multiplicity: u32,
}

impl Molecule {
    /// Parses an `xyz` file to construct a neutral singlet molecule.
    ///
    /// # Arguments
    ///
    /// * `filename` - The `xyz` file to be parsed.
    /// * `unit` - The distance unit of the coordinates in the file.
    ///
    /// # Returns
    ///
    /// The parsed [`Molecule`] structure.
    pub fn from_xyz<P: AsRef<Path>>(
        filename: P,
        unit: DistanceUnit,
    ) -> Result<Molecule, anyhow::Error> {
        let contents = fs::read_to_string(&filename).with_context(|| {
            format!("Unable to read file {}", filename.as_ref().display())
        })?;
        Self::from_xyz_str(&contents, unit)
    }

    /// Parses the contents of an `xyz` file to construct a neutral singlet molecule.
    pub fn from_xyz_str(contents: &str, unit: DistanceUnit) -> Result<Molecule, anyhow::Error> {
        let emap = ElementMap::new();
        let factor = unit.to_bohr_factor();
        let mut lines = contents.lines();
        let n_atoms = lines
            .next()
            .ok_or_else(|| format_err!("Empty `xyz` contents."))?
            .trim()
            .parse::<usize>()
            .with_context(|| "Unable to parse the atom count in the `xyz` contents.")?;
        lines.next(); // comment line
        let atoms = lines
            .filter(|line| !line.trim().is_empty())
            .map(|line| Atom::from_xyz_line(line, &emap, factor))
            .collect::<Result<Vec<_>, _>>()?;
        ensure!(
            atoms.len() == n_atoms,
            "Expected {n_atoms} atoms, got {} instead.",
            atoms.len()
        );
        Ok(Molecule {
            atoms,
            charge: 0,
            multiplicity: 1,
        })
    }

    /// Constructs a molecule directly from a vector of atoms.
    pub fn from_atoms(atoms: Vec<Atom>, charge: i32, multiplicity: u32) -> Molecule {
        Molecule {
            atoms,
            charge,
            multiplicity,
        }
    }

    /// Returns a copy of this molecule with the specified charge and multiplicity.
    pub fn with_charge_and_multiplicity(mut self, charge: i32, multiplicity: u32) -> Molecule {
        self.charge = charge;
        self.multiplicity = multiplicity;
        self
    }

    /// The number of electrons in this molecule.
    pub fn n_electrons(&self) -> Result<usize, anyhow::Error> {
        let n_protons = self
            .atoms
            .iter()
            .map(|atom| i32::try_from(atom.atomic_number).expect("Atomic number out of range."))
            .sum::<i32>();
        usize::try_from(n_protons - self.charge)
            .map_err(|_| format_err!("Charge {} leaves no electrons.", self.charge))
    }

    /// The numbers of α and β electrons implied by the charge and multiplicity.
    pub fn n_alpha_beta(&self) -> Result<(usize, usize), anyhow::Error> {
        let n_electrons = self.n_electrons()?;
        ensure!(
            self.multiplicity >= 1,
            "Invalid multiplicity {}.",
            self.multiplicity
        );
        let excess = usize::try_from(self.multiplicity - 1)
            .map_err(|_| format_err!("Invalid multiplicity {}.", self.multiplicity))?;
        ensure!(
            n_electrons >= excess && (n_electrons - excess) % 2 == 0,
            "Charge {} and multiplicity {} are inconsistent with {} electrons.",
            self.charge,
            self.multiplicity,
            n_electrons
        );
        let n_beta = (n_electrons - excess) / 2;
        Ok((n_beta + excess, n_beta))
    }

    /// Calculates the nuclear repulsion energy of this molecule in Hartree.
    pub fn nuclear_repulsion_energy(&self) -> f64 {
        let mut e_nuc = 0.0;
        for (i, atom_i) in self.atoms.iter().enumerate() {
            for atom_j in self.atoms.iter().skip(i + 1) {
                let r = (atom_i.coordinates - atom_j.coordinates).norm();
                e_nuc += f64::from(atom_i.atomic_number) * f64::from(atom_j.atomic_number) / r;
            }
        }
        e_nuc
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "┈".repeat(48))?;
        writeln!(f, " {:<3} {:>14} {:>14} {:>14}", "", "x (Bohr)", "y (Bohr)", "z (Bohr)")?;
        writeln!(f, "{}", "┈".repeat(48))?;
        for atom in self.atoms.iter() {
            writeln!(f, " {atom}")?;
        }
        writeln!(f, "{}", "┈".repeat(48))?;
        writeln!(f, " Charge: {:+}  Multiplicity: {}", self.charge, self.multiplicity)?;
        Ok(())
    }
}
