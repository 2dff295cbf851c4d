// src/operations/mod.rs

//! Gates and the operations that place them on qubits.
//!
//! A [`Gate`] is a fixed single-qubit unitary with a diagram symbol. An
//! [`Operation`] binds a gate (or a measurement) to concrete [`GridQubit`]s
//! so a circuit can order them.

use crate::core::GridQubit;
use num_complex::Complex;
use num_traits::{One, Zero};
use std::f64::consts::FRAC_1_SQRT_2;

/// A 2x2 complex matrix acting on one qubit, rows/columns ordered `|0⟩, |1⟩`.
pub type Matrix2 = [[Complex<f64>; 2]; 2];

/// Fixed single-qubit gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Identity.
    I,
    /// Bit flip (Pauli X, NOT).
    X,
    /// Pauli Y.
    Y,
    /// Phase flip (Pauli Z).
    Z,
    /// Hadamard.
    H,
    /// Quarter turn about Z, `diag(1, i)`.
    S,
    /// Inverse of [`Gate::S`].
    SDag,
    /// Eighth turn about Z, `diag(1, e^{iπ/4})`.
    T,
    /// Inverse of [`Gate::T`].
    TDag,
    /// Square root of X.
    SqrtX,
}

impl Gate {
    /// Symbol used in circuit diagrams.
    pub fn symbol(&self) -> &'static str {
        match self {
            Gate::I => "I",
            Gate::X => "X",
            Gate::Y => "Y",
            Gate::Z => "Z",
            Gate::H => "H",
            Gate::S => "S",
            Gate::SDag => "S^-1",
            Gate::T => "T",
            Gate::TDag => "T^-1",
            Gate::SqrtX => "X^0.5",
        }
    }

    /// The gate's unitary.
    pub fn matrix(&self) -> Matrix2 {
        let one = Complex::one();
        let zero = Complex::zero();
        let i = Complex::i();
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        match self {
            Gate::I => [[one, zero], [zero, one]],
            Gate::X => [[zero, one], [one, zero]],
            Gate::Y => [[zero, -i], [i, zero]],
            Gate::Z => [[one, zero], [zero, -one]],
            Gate::H => [[h, h], [h, -h]],
            Gate::S => [[one, zero], [zero, i]],
            Gate::SDag => [[one, zero], [zero, -i]],
            Gate::T => [[one, zero], [zero, Complex::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)]],
            Gate::TDag => [[one, zero], [zero, Complex::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2)]],
            Gate::SqrtX => [
                [Complex::new(0.5, 0.5), Complex::new(0.5, -0.5)],
                [Complex::new(0.5, -0.5), Complex::new(0.5, 0.5)],
            ],
        }
    }

    /// Places the gate on `target`.
    pub fn on(self, target: GridQubit) -> Operation {
        Operation::Gate { gate: self, target }
    }

    /// Places the gate on `target`, conditioned on `control` being `|1⟩`.
    pub fn controlled(self, control: GridQubit, target: GridQubit) -> Operation {
        Operation::Controlled { gate: self, control, target }
    }
}

/// `diag(1, e^{iθ})`.
pub fn phase_shift_matrix(theta: f64) -> Matrix2 {
    [
        [Complex::one(), Complex::zero()],
        [Complex::zero(), Complex::from_polar(1.0, theta)],
    ]
}

/// A step of a circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// A fixed gate applied to one qubit.
    Gate {
        gate: Gate,
        target: GridQubit,
    },

    /// Relative phase `e^{iθ}` on the `|1⟩` component of `target`.
    PhaseShift {
        target: GridQubit,
        /// Angle in radians.
        theta: f64,
    },

    /// `gate` applied to `target` only where `control` is `|1⟩`.
    Controlled {
        gate: Gate,
        control: GridQubit,
        target: GridQubit,
    },

    /// Computational-basis measurement of `targets` (in order), recorded
    /// under `key`. Collapses the measured qubits.
    Measure {
        targets: Vec<GridQubit>,
        key: String,
    },
}

impl Operation {
    /// Every qubit mentioned in the operation's parameters.
    pub fn involved_qubits(&self) -> Vec<GridQubit> {
        match self {
            Operation::Gate { target, .. } => vec![*target],
            Operation::PhaseShift { target, .. } => vec![*target],
            Operation::Controlled { control, target, .. } => vec![*control, *target],
            Operation::Measure { targets, .. } => targets.clone(),
        }
    }

    /// The measurement key, if this is a measurement.
    pub fn measurement_key(&self) -> Option<&str> {
        match self {
            Operation::Measure { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// Measures `targets` under `key`.
pub fn measure(targets: &[GridQubit], key: impl Into<String>) -> Operation {
    Operation::Measure {
        targets: targets.to_vec(),
        key: key.into(),
    }
}
