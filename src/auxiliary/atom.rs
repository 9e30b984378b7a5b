//! Atoms and element look-up.

use std::collections::HashMap;
use std::fmt;

use anyhow::{self, format_err, Context};
use nalgebra::Point3;
use periodic_table;
use serde::{Deserialize, Serialize};

/// Conversion factor from Ångström to Bohr.
pub const ANGSTROM_TO_BOHR: f64 = 1.8897259886;

/// A structure storing a look-up of element symbols to give atomic numbers and atomic masses.
pub struct ElementMap<'a> {
    /// A [`HashMap`] from a symbol string to a tuple of atomic number and atomic mass.
    map: HashMap<&'a str, (u32, f64)>,
}

impl Default for ElementMap<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementMap<'static> {
    /// Creates a new [`ElementMap`] for all elements in the periodic table.
    #[must_use]
    pub fn new() -> ElementMap<'static> {
        let mut map = HashMap::new();
        let elements = periodic_table::periodic_table();
        for element in elements {
            let mass = parse_atomic_mass(element.atomic_mass);
            map.insert(element.symbol, (element.atomic_number, mass));
        }
        ElementMap { map }
    }
}

impl<'a> ElementMap<'a> {
    /// Looks up an element symbol, returning its atomic number and atomic mass.
    pub fn get(&self, symbol: &str) -> Option<&(u32, f64)> {
        self.map.get(symbol)
    }
}

/// An auxiliary function that parses the atomic mass string in the format of
/// [`periodic_table`] to a single float value.
fn parse_atomic_mass(mass_str: &str) -> f64 {
    let mass = mass_str.replace(&['(', ')', '[', ']'][..], "");
    mass.parse::<f64>()
        .unwrap_or_else(|_| panic!("Unable to parse atomic mass string {mass}."))
}

/// A structure representing an atom.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Atom {
    /// The element symbol of the atom.
    pub symbol: String,

    /// The atomic number of the atom.
    pub atomic_number: u32,

    /// The atomic mass of the atom.
    pub atomic_mass: f64,

    /// The position of the atom in Bohr.
    pub coordinates: Point3<f64>,
}

impl Atom {
    /// Parses an atom line in an `xyz` file to construct an [`Atom`].
    ///
    /// # Arguments
    ///
    /// * `line` - A line in an `xyz` file containing an element symbol and three Cartesian
    /// coordinates.
    /// * `emap` - A hash map between atomic symbols and atomic numbers and masses.
    /// * `unit_factor` - A factor converting the coordinates in `line` to Bohr.
    ///
    /// # Returns
    ///
    /// The parsed [`Atom`] structure.
    pub fn from_xyz_line(
        line: &str,
        emap: &ElementMap,
        unit_factor: f64,
    ) -> Result<Atom, anyhow::Error> {
        let split = line.split_whitespace().collect::<Vec<_>>();
        if split.len() != 4 {
            return Err(format_err!("Malformed `xyz` atom line: `{line}`."));
        }
        let symbol = split[0].to_string();
        let &(atomic_number, atomic_mass) = emap
            .get(symbol.as_str())
            .ok_or_else(|| format_err!("Unknown element symbol `{symbol}`."))?;
        let coordinates = Point3::new(
            split[1]
                .parse::<f64>()
                .with_context(|| format!("Unable to parse coordinate `{}`.", split[1]))?
                * unit_factor,
            split[2]
                .parse::<f64>()
                .with_context(|| format!("Unable to parse coordinate `{}`.", split[2]))?
                * unit_factor,
            split[3]
                .parse::<f64>()
                .with_context(|| format!("Unable to parse coordinate `{}`.", split[3]))?
                * unit_factor,
        );
        Ok(Atom {
            symbol,
            atomic_number,
            atomic_mass,
            coordinates,
        })
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<3} {:+14.8} {:+14.8} {:+14.8}",
            self.symbol, self.coordinates[0], self.coordinates[1], self.coordinates[2]
        )
    }
}
