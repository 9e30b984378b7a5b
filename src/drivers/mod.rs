//! Drivers to carry out QFerm functionalities.

use anyhow;
use serde::{Deserialize, Serialize};

pub mod exact_eigensolver;
pub mod hamiltonian;
pub mod vqe;

// ==================
// Struct definitions
// ==================

/// A serialisable record of a ground-state estimate, common to all solver drivers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroundStateRecord {
    /// The name of the solver that produced this estimate.
    pub method: String,

    /// The electronic ground-state energy, with any particle-hole shift restored.
    pub electronic_energy: f64,

    /// The total ground-state energy, including the core energy.
    pub total_energy: f64,
}

// =================
// Trait definitions
// =================

/// Trait defining behaviours of `QFerm` drivers.
pub trait QFermDriver {
    /// The type of the parameter structure controlling the driver.
    type Params;

    /// The type of the successful outcome when executing the driver.
    type Outcome;

    /// Executes the driver and stores the result internally.
    fn run(&mut self) -> Result<(), anyhow::Error>;

    /// Returns the result of the driver execution.
    fn result(&self) -> Result<&Self::Outcome, anyhow::Error>;
}
