// src/demos/mod.rs

//! The two demonstrations as library procedures: sampling a bit-flip circuit
//! and the atom-cavity ground-state study.

pub mod bit_flip;
pub mod groundstate;

pub use bit_flip::{BitFlipConfig, BitFlipReport, bit_flip_circuit, run_bit_flip};
pub use groundstate::{GroundStateReport, run_groundstate};
