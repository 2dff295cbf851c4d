//! Error handling logic

use super::qubit::GridQubit;
use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QprimerError>;

/// Errors raised while building circuits, simulating them, or computing
/// and plotting atom-cavity ground states.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QprimerError {
    /// An operation is inconsistent with the circuit or the simulator state.
    #[error("Invalid Operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// An operation referenced a qubit the simulation does not know about.
    #[error("Unknown Qubit {qubit}: {message}")]
    UnknownQubit {
        /// The qubit that could not be resolved
        qubit: GridQubit,
        /// UnknownQubit failure message
        message: String,
    },

    /// Two measurements in one circuit share the same key.
    #[error("Duplicate measurement key '{key}'")]
    DuplicateMeasurementKey {
        /// The repeated key
        key: String,
    },

    /// A result lookup used a key no measurement recorded.
    #[error("Unknown measurement key '{key}'")]
    UnknownMeasurementKey {
        /// The key that was requested
        key: String,
    },

    /// A state lost normalisation (or a density matrix its unit trace).
    #[error("Incoherence Violation: {message}")]
    Incoherence {
        /// Incoherence failure message
        message: String,
    },

    /// Matrix or vector dimensions do not line up.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension encountered.
        actual: usize,
    },

    /// A configuration value is out of range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Reason why the parameter is invalid.
        reason: String,
    },

    /// The Hermitian eigensolver failed to converge or was handed a
    /// non-Hermitian operator.
    #[error("Diagonalization failed: {message}")]
    Diagonalization {
        /// Diagonalization failure message
        message: String,
    },

    /// General error encountered during the simulation process itself.
    #[error("Simulation Process Error: {message}")]
    SimulationError {
        /// SimulationError failure message
        message: String,
    },

    /// Rendering or encoding a plot failed.
    #[error("Plot Error: {message}")]
    Plot {
        /// Plot failure message
        message: String,
    },
}

impl QprimerError {
    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
