// src/lib.rs

//! `qprimer` - Single-qubit circuit sampling and atom-cavity ground states
//!
//! Two small quantum studies share this crate: a grid-qubit circuit model
//! with an exact state-vector sampler, and a truncated Fock-space toolkit
//! for the ground state of a cavity coupled to a two-level atom, plotted as
//! occupation curves and a Wigner surface.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod validation;
pub mod optics;
pub mod plotting;
pub mod demos;
pub mod telemetry;

// Re-export the most common types for easier top-level use
pub use core::{GridQubit, QprimerError, StateVector};
pub use operations::{Gate, Operation, measure};
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{RunResult, SimulationResult, Simulator};
pub use optics::{DensityMatrix, Ket, Operator, SweepConfig, SweepResult};
pub use validation::{check_hermitian, check_normalization, check_unit_trace};

// Example 1: Bit flip and measurement
// Flipping a fresh qubit and measuring it always reads 1.
/// ```
/// use qprimer::{CircuitBuilder, Gate, GridQubit, Simulator, measure};
///
/// let q0 = GridQubit::new(0, 0);
/// let circuit = CircuitBuilder::new()
///     .add_op(Gate::X.on(q0))
///     .add_op(measure(&[q0], "m"))
///     .build()?;
///
/// assert_eq!(circuit.to_string(), "(0, 0): ───X───M('m')───");
///
/// let result = Simulator::new().run(&circuit, 10)?;
/// assert_eq!(result.to_string(), "m=1111111111");
/// assert_eq!(result.histogram("m")?.get(&1), Some(&10));
/// # Ok::<(), qprimer::QprimerError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Bell pair
// H then CNOT leaves the two qubits perfectly correlated.
/// ```
/// use qprimer::{CircuitBuilder, Gate, GridQubit, Simulator, measure};
///
/// let q0 = GridQubit::new(0, 0);
/// let q1 = GridQubit::new(0, 1);
/// let circuit = CircuitBuilder::new()
///     .add_op(Gate::H.on(q0))
///     .add_op(Gate::X.controlled(q0, q1))
///     .add_op(measure(&[q0, q1], "bell"))
///     .build()?;
///
/// let result = Simulator::with_seed(42).run(&circuit, 200)?;
/// let histogram = result.histogram("bell")?;
/// // Only |00⟩ (0) and |11⟩ (3) ever appear.
/// assert!(histogram.keys().all(|outcome| *outcome == 0 || *outcome == 3));
/// assert_eq!(histogram.values().sum::<usize>(), 200);
/// # Ok::<(), qprimer::QprimerError>(())
/// ```
#[doc(hidden)]
const _: () = ();

// Example 3: Atom-cavity ground state
/// ```
/// use qprimer::optics::{SweepConfig, compute, linspace};
///
/// let config = SweepConfig {
///     n: 8,
///     couplings: linspace(0.0, 1.0, 5),
///     ..SweepConfig::default()
/// };
/// let sweep = compute(&config)?;
/// assert_eq!(sweep.cavity_occupation().len(), 5);
/// assert!(sweep.cavity_occupation()[0].abs() < 1e-9);
/// # Ok::<(), qprimer::QprimerError>(())
/// ```
#[doc(hidden)]
const _: () = ();
