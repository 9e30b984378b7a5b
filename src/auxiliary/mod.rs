//! Auxiliary structures and functions for geometry specification.

pub mod atom;
pub mod molecule;
