// src/validation/mod.rs

//! Consistency checks on states and operators.

use crate::core::{NORM_TOLERANCE, QprimerError, StateVector};
use nalgebra::DMatrix;
use num_complex::Complex64;

/// Checks that `Σ|c_k|² ≈ 1`.
///
/// # Returns
/// * `Ok(())` if normalized within `tolerance` (default [`NORM_TOLERANCE`]).
/// * `Err(QprimerError::Incoherence)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), QprimerError> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(QprimerError::Incoherence {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Largest `|M_ij - conj(M_ji)|` of a square matrix.
pub fn hermiticity_error(matrix: &DMatrix<Complex64>) -> f64 {
    let n = matrix.nrows();
    let mut worst: f64 = 0.0;
    for i in 0..n {
        for j in i..n {
            worst = worst.max((matrix[(i, j)] - matrix[(j, i)].conj()).norm());
        }
    }
    worst
}

/// Checks that `matrix` is square and Hermitian within `tolerance`
/// (default [`NORM_TOLERANCE`], scaled by the largest element magnitude).
pub fn check_hermitian(matrix: &DMatrix<Complex64>, tolerance: Option<f64>) -> Result<(), QprimerError> {
    if !matrix.is_square() {
        return Err(QprimerError::dimension_mismatch(matrix.nrows(), matrix.ncols()));
    }
    let scale = matrix.iter().map(|c| c.norm()).fold(1.0, f64::max);
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE) * scale;
    let error = hermiticity_error(matrix);
    if error > effective_tolerance {
        return Err(QprimerError::Diagonalization {
            message: format!("Operator is not Hermitian (max deviation {:.3e})", error),
        });
    }
    Ok(())
}

/// Checks that a density matrix has unit trace.
pub fn check_unit_trace(matrix: &DMatrix<Complex64>, tolerance: Option<f64>) -> Result<(), QprimerError> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let trace = matrix.trace();
    if (trace.re - 1.0).abs() > effective_tolerance || trace.im.abs() > effective_tolerance {
        return Err(QprimerError::Incoherence {
            message: format!("Density matrix trace is {} (expected 1)", trace),
        });
    }
    Ok(())
}
