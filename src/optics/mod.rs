// src/optics/mod.rs

//! Cavity quantum electrodynamics: dense operators on truncated Fock
//! spaces, atom-cavity Hamiltonians, ground-state sweeps and the Wigner
//! function of a single mode.

pub mod hamiltonian;
pub mod operator;
pub mod state;
pub mod sweep;
pub mod wigner;

pub use hamiltonian::{AtomCavityOperators, CouplingModel};
pub use operator::Operator;
pub use state::{DensityMatrix, Ket};
pub use sweep::{SweepConfig, SweepResult, compute, linspace};
pub use wigner::{WignerGrid, wigner};
