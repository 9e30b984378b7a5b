//! Interface to `FCIDUMP` integral files produced by external electronic structure programs.
//!
//! The format follows Knowles and Handy (*Computer Physics Communications* **54**, 75 (1989)):
//! a Fortran namelist header carrying at least `NORB`, `NELEC` and `MS2`, followed by records
//! of the form `value i j k l` with one-based orbital indices. Records with `k = l = 0` are
//! one-body integrals, records with only `i` non-zero are orbital energies (ignored), the
//! record with all indices zero is the core energy, and all others are chemist-notation
//! two-body integrals $`(ij|kl)`$ to which the full eight-fold permutational symmetry is
//! applied.

use std::fs;
use std::path::Path;

use anyhow::{self, bail, ensure, format_err, Context};
use lazy_static::lazy_static;
use ndarray::{Array2, Array4};
use regex::Regex;

use crate::integrals::MolecularIntegrals;


lazy_static! {
    static ref HEADER_FIELD_RE: Regex =
        Regex::new(r"(?i)\b(NORB|NELEC|MS2)\s*=\s*(-?\d+)").expect("Invalid regex pattern.");
}

/// Reads an `FCIDUMP` file into a set of molecular integrals.
///
/// # Arguments
///
/// * `path` - The `FCIDUMP` file to be read.
///
/// # Returns
///
/// The parsed [`MolecularIntegrals`] over spatial orbitals in chemist notation.
///
/// # Errors
///
/// Errors if the header is incomplete, an index lies outside `1..=NORB`, or a record is
/// malformed.
pub fn read_fcidump<P: AsRef<Path>>(path: P) -> Result<MolecularIntegrals, anyhow::Error> {
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Unable to read file {}.", path.as_ref().display()))?;
    parse_fcidump(&contents)
}

/// Parses the contents of an `FCIDUMP` file.
pub fn parse_fcidump(contents: &str) -> Result<MolecularIntegrals, anyhow::Error> {
    let header_end = contents
        .lines()
        .position(|line| {
            let trimmed = line.trim().to_uppercase();
            trimmed.contains("&END") || trimmed == "/" || trimmed.ends_with('/')
        })
        .ok_or_else(|| format_err!("No header terminator (`&END` or `/`) found."))?;
    let header = contents
        .lines()
        .take(header_end + 1)
        .collect::<Vec<_>>()
        .join(" ");

    let mut n_orbitals = None;
    let mut n_electrons = None;
    let mut ms2 = None;
    for captures in HEADER_FIELD_RE.captures_iter(&header) {
        let value = captures[2]
            .parse::<i64>()
            .with_context(|| format!("Unable to parse header value `{}`.", &captures[2]))?;
        match captures[1].to_uppercase().as_str() {
            "NORB" => n_orbitals = Some(value),
            "NELEC" => n_electrons = Some(value),
            "MS2" => ms2 = Some(value),
            _ => {}
        }
    }
    let n_orbitals = usize::try_from(
        n_orbitals.ok_or_else(|| format_err!("`NORB` not found in the header."))?,
    )
    .map_err(|_| format_err!("`NORB` must be positive."))?;
    let n_electrons = usize::try_from(
        n_electrons.ok_or_else(|| format_err!("`NELEC` not found in the header."))?,
    )
    .map_err(|_| format_err!("`NELEC` must be non-negative."))?;
    // MS2 is required by the format but only validated here, since the closed-shell treatment
    // downstream fixes the spin projection.
    let _ = ms2.ok_or_else(|| format_err!("`MS2` not found in the header."))?;
    ensure!(
        n_electrons <= 2 * n_orbitals,
        "NELEC = {n_electrons} exceeds the {} spin-orbitals of NORB = {n_orbitals}.",
        2 * n_orbitals
    );

    let mut one_body = Array2::<f64>::zeros((n_orbitals, n_orbitals));
    let mut two_body = Array4::<f64>::zeros((n_orbitals, n_orbitals, n_orbitals, n_orbitals));
    let mut core_energy = 0.0;

    for (line_no, line) in contents.lines().enumerate().skip(header_end + 1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let value = fields
            .next()
            .ok_or_else(|| format_err!("Empty record on line {}.", line_no + 1))?
            .replace(['D', 'd'], "E")
            .parse::<f64>()
            .with_context(|| format!("Unable to parse the value on line {}.", line_no + 1))?;
        let indices = fields
            .map(|field| {
                field
                    .parse::<usize>()
                    .with_context(|| format!("Unable to parse an index on line {}.", line_no + 1))
            })
            .collect::<Result<Vec<_>, _>>()?;
        ensure!(
            indices.len() == 4,
            "Expected four indices on line {}, got {}.",
            line_no + 1,
            indices.len()
        );
        let (i, j, k, l) = (indices[0], indices[1], indices[2], indices[3]);
        for (label, index) in [("i", i), ("j", j), ("k", k), ("l", l)] {
            ensure!(
                index <= n_orbitals,
                "Index {label} = {index} exceeds NORB = {n_orbitals} on line {}.",
                line_no + 1
            );
        }

        match (i, j, k, l) {
            (0, 0, 0, 0) => core_energy = value,
            // Orbital-energy records are carried by some programs but are redundant here.
            (i, 0, 0, 0) if i > 0 => {}
            (i, j, 0, 0) if i > 0 && j > 0 => {
                one_body[(i - 1, j - 1)] = value;
                one_body[(j - 1, i - 1)] = value;
            }
            (i, j, k, l) if i > 0 && j > 0 && k > 0 && l > 0 => {
                let (i, j, k, l) = (i - 1, j - 1, k - 1, l - 1);
                for (p, q, r, s) in [
                    (i, j, k, l),
                    (j, i, k, l),
                    (i, j, l, k),
                    (j, i, l, k),
                    (k, l, i, j),
                    (l, k, i, j),
                    (k, l, j, i),
                    (l, k, j, i),
                ] {
                    two_body[(p, q, r, s)] = value;
                }
            }
            _ => bail!("Malformed index pattern on line {}.", line_no + 1),
        }
    }

    Ok(MolecularIntegrals {
        one_body,
        two_body,
        core_energy,
        n_electrons,
    })
}
