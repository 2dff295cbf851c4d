// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod qubit;
pub mod state;

// Re-export public types for convenient access via `qprimer::core::TypeName`
pub use error::QprimerError;
pub use qubit::GridQubit;
pub use state::StateVector;

pub mod constants;
pub use constants::tolerances::{AMPLITUDE_TOLERANCE, NORM_TOLERANCE};
