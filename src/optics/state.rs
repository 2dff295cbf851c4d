// src/optics/state.rs

use crate::core::{NORM_TOLERANCE, QprimerError};
use crate::validation::check_unit_trace;
use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;

/// A pure state on a (possibly composite) Hilbert space.
#[derive(Debug, Clone, PartialEq)]
pub struct Ket {
    vector: DVector<Complex64>,
    dims: Vec<usize>,
}

impl Ket {
    /// Wraps an amplitude vector whose length equals the product of `dims`.
    pub fn from_vector(vector: DVector<Complex64>, dims: Vec<usize>) -> Result<Self, QprimerError> {
        let expected: usize = dims.iter().product();
        if dims.is_empty() || expected != vector.len() {
            return Err(QprimerError::dimension_mismatch(expected, vector.len()));
        }
        Ok(Self { vector, dims })
    }

    /// Basis state `|k⟩` of an `n`-dimensional space.
    pub fn basis(n: usize, k: usize) -> Result<Self, QprimerError> {
        if k >= n {
            return Err(QprimerError::invalid_parameter("k", format!("basis index {} out of range for dimension {}", k, n)));
        }
        let mut vector = DVector::<Complex64>::zeros(n);
        vector[k] = Complex64::new(1.0, 0.0);
        Ok(Self { vector, dims: vec![n] })
    }

    pub fn vector(&self) -> &DVector<Complex64> {
        &self.vector
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn dim(&self) -> usize {
        self.vector.len()
    }

    pub fn norm(&self) -> f64 {
        self.vector.norm()
    }

    /// `|ψ⟩⟨ψ|`.
    pub fn to_density_matrix(&self) -> DensityMatrix {
        DensityMatrix {
            matrix: &self.vector * self.vector.adjoint(),
            dims: self.dims.clone(),
        }
    }
}

/// A density matrix with subsystem dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityMatrix {
    matrix: DMatrix<Complex64>,
    dims: Vec<usize>,
}

impl DensityMatrix {
    /// Wraps a unit-trace square matrix whose size equals the product of `dims`.
    pub fn from_matrix(matrix: DMatrix<Complex64>, dims: Vec<usize>) -> Result<Self, QprimerError> {
        let expected: usize = dims.iter().product();
        if !matrix.is_square() || dims.is_empty() || expected != matrix.nrows() {
            return Err(QprimerError::dimension_mismatch(expected, matrix.nrows()));
        }
        check_unit_trace(&matrix, None)?;
        Ok(Self { matrix, dims })
    }

    pub fn matrix(&self) -> &DMatrix<Complex64> {
        &self.matrix
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// `Tr(ρ²)`; 1 for pure states.
    pub fn purity(&self) -> f64 {
        (&self.matrix * &self.matrix).trace().re
    }

    /// Reduced state of subsystem `keep`, tracing out every other subsystem.
    pub fn ptrace(&self, keep: usize) -> Result<DensityMatrix, QprimerError> {
        let keep_dim = *self.dims.get(keep).ok_or_else(|| {
            QprimerError::invalid_parameter("keep", format!("subsystem {} out of range for dims {:?}", keep, self.dims))
        })?;
        // Strides of each subsystem in the flattened index, last subsystem fastest.
        let mut strides = vec![1usize; self.dims.len()];
        for s in (0..self.dims.len().saturating_sub(1)).rev() {
            strides[s] = strides[s + 1] * self.dims[s + 1];
        }
        let keep_stride = strides[keep];

        let mut reduced = DMatrix::<Complex64>::zeros(keep_dim, keep_dim);
        let n = self.dim();
        for i in 0..n {
            let i_keep = (i / keep_stride) % keep_dim;
            let i_rest = i - i_keep * keep_stride;
            for j in 0..n {
                let j_keep = (j / keep_stride) % keep_dim;
                if j - j_keep * keep_stride == i_rest {
                    reduced[(i_keep, j_keep)] += self.matrix[(i, j)];
                }
            }
        }
        check_unit_trace(&reduced, Some(NORM_TOLERANCE * n as f64))?;
        Ok(DensityMatrix {
            matrix: reduced,
            dims: vec![keep_dim],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn product_ket(cavity: usize, n: usize, atom: usize) -> Ket {
        let mut vector = DVector::<Complex64>::zeros(2 * n);
        vector[cavity * 2 + atom] = Complex64::new(1.0, 0.0);
        Ket::from_vector(vector, vec![n, 2]).unwrap()
    }

    #[test]
    fn test_ptrace_of_product_state() -> Result<(), QprimerError> {
        let rho = product_ket(2, 4, 1).to_density_matrix();
        let cavity = rho.ptrace(0)?;
        assert_eq!(cavity.dims(), &[4]);
        assert_abs_diff_eq!(cavity.matrix()[(2, 2)].re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cavity.purity(), 1.0, epsilon = 1e-12);

        let atom = rho.ptrace(1)?;
        assert_abs_diff_eq!(atom.matrix()[(1, 1)].re, 1.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_ptrace_of_entangled_state_is_mixed() -> Result<(), QprimerError> {
        // (|0,1⟩ + |1,0⟩)/√2 on a 2-level cavity and the atom
        let mut vector = DVector::<Complex64>::zeros(4);
        vector[1] = Complex64::new(FRAC_1_SQRT_2, 0.0);
        vector[2] = Complex64::new(FRAC_1_SQRT_2, 0.0);
        let rho = Ket::from_vector(vector, vec![2, 2])?.to_density_matrix();
        let cavity = rho.ptrace(0)?;
        assert_abs_diff_eq!(cavity.matrix()[(0, 0)].re, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(cavity.matrix()[(1, 1)].re, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(cavity.matrix()[(0, 1)].norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cavity.purity(), 0.5, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_ptrace_out_of_range() {
        let rho = product_ket(0, 2, 0).to_density_matrix();
        assert!(matches!(rho.ptrace(2), Err(QprimerError::InvalidParameter { .. })));
    }

    #[test]
    fn test_basis_bounds() {
        assert!(Ket::basis(3, 2).is_ok());
        assert!(Ket::basis(3, 3).is_err());
    }
}
