// src/optics/operator.rs

use super::state::Ket;
use crate::core::QprimerError;
use crate::validation::check_hermitian;
use nalgebra::{DMatrix, SymmetricEigen};
use num_complex::Complex64;
use std::ops::{Add, Mul};

/// Iteration cap handed to the Hermitian eigensolver.
const MAX_EIGEN_ITERATIONS: usize = 100_000;

/// A dense operator on a (possibly composite) Hilbert space.
///
/// `dims` lists the subsystem dimensions in tensor order; their product is
/// the matrix size. Arithmetic between operators follows nalgebra and panics
/// on mismatched shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    matrix: DMatrix<Complex64>,
    dims: Vec<usize>,
}

impl Operator {
    /// Wraps a square matrix whose size equals the product of `dims`.
    pub fn from_matrix(matrix: DMatrix<Complex64>, dims: Vec<usize>) -> Result<Self, QprimerError> {
        if !matrix.is_square() {
            return Err(QprimerError::dimension_mismatch(matrix.nrows(), matrix.ncols()));
        }
        let expected: usize = dims.iter().product();
        if dims.is_empty() || expected != matrix.nrows() {
            return Err(QprimerError::dimension_mismatch(expected, matrix.nrows()));
        }
        Ok(Self { matrix, dims })
    }

    /// Annihilation operator on an `n`-level truncated mode:
    /// `a|k⟩ = √k |k−1⟩`.
    pub fn destroy(n: usize) -> Result<Self, QprimerError> {
        if n == 0 {
            return Err(QprimerError::invalid_parameter("n", "space dimension must be at least 1"));
        }
        let mut matrix = DMatrix::<Complex64>::zeros(n, n);
        for k in 1..n {
            matrix[(k - 1, k)] = Complex64::new((k as f64).sqrt(), 0.0);
        }
        Ok(Self { matrix, dims: vec![n] })
    }

    /// Identity on an `n`-dimensional space.
    pub fn identity(n: usize) -> Result<Self, QprimerError> {
        if n == 0 {
            return Err(QprimerError::invalid_parameter("n", "space dimension must be at least 1"));
        }
        Ok(Self {
            matrix: DMatrix::identity(n, n),
            dims: vec![n],
        })
    }

    /// Tensor (Kronecker) product, first operator outermost.
    pub fn tensor(ops: &[&Operator]) -> Result<Self, QprimerError> {
        let (first, rest) = ops.split_first().ok_or_else(|| {
            QprimerError::invalid_parameter("ops", "tensor product needs at least one operator")
        })?;
        let mut matrix = first.matrix.clone();
        let mut dims = first.dims.clone();
        for op in rest {
            matrix = matrix.kronecker(&op.matrix);
            dims.extend_from_slice(&op.dims);
        }
        Ok(Self { matrix, dims })
    }

    /// Hermitian conjugate.
    pub fn dag(&self) -> Self {
        Self {
            matrix: self.matrix.adjoint(),
            dims: self.dims.clone(),
        }
    }

    pub fn matrix(&self) -> &DMatrix<Complex64> {
        &self.matrix
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Size of the full space.
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// `⟨ψ|A|ψ⟩`, real part. Meaningful for Hermitian `A`.
    pub fn expect(&self, ket: &Ket) -> Result<f64, QprimerError> {
        if ket.dim() != self.dim() {
            return Err(QprimerError::dimension_mismatch(self.dim(), ket.dim()));
        }
        let applied = &self.matrix * ket.vector();
        Ok(ket.vector().dotc(&applied).re)
    }

    /// Eigenvalues and normalised eigenvectors, sorted by ascending energy.
    /// The operator must be Hermitian.
    pub fn eigenstates(&self) -> Result<Vec<(f64, Ket)>, QprimerError> {
        check_hermitian(&self.matrix, None)?;
        let eigen = SymmetricEigen::try_new(self.matrix.clone(), f64::EPSILON, MAX_EIGEN_ITERATIONS)
            .ok_or_else(|| QprimerError::Diagonalization {
                message: format!("eigensolver did not converge for a {}x{} operator", self.dim(), self.dim()),
            })?;

        let mut order: Vec<usize> = (0..eigen.eigenvalues.len()).collect();
        order.sort_by(|&i, &j| eigen.eigenvalues[i].total_cmp(&eigen.eigenvalues[j]));

        order
            .into_iter()
            .map(|i| {
                let vector = eigen.eigenvectors.column(i).into_owned();
                Ok((eigen.eigenvalues[i], Ket::from_vector(vector, self.dims.clone())?))
            })
            .collect()
    }

    /// Lowest eigenvalue and its eigenvector.
    pub fn groundstate(&self) -> Result<(f64, Ket), QprimerError> {
        self.eigenstates()?.into_iter().next().ok_or_else(|| QprimerError::Diagonalization {
            message: "operator has no eigenstates".to_string(),
        })
    }
}

impl Add<&Operator> for &Operator {
    type Output = Operator;

    fn add(self, rhs: &Operator) -> Operator {
        debug_assert_eq!(self.dims, rhs.dims);
        Operator {
            matrix: &self.matrix + &rhs.matrix,
            dims: self.dims.clone(),
        }
    }
}

impl Add for Operator {
    type Output = Operator;

    fn add(self, rhs: Operator) -> Operator {
        &self + &rhs
    }
}

impl Mul<&Operator> for &Operator {
    type Output = Operator;

    fn mul(self, rhs: &Operator) -> Operator {
        debug_assert_eq!(self.dims, rhs.dims);
        Operator {
            matrix: &self.matrix * &rhs.matrix,
            dims: self.dims.clone(),
        }
    }
}

impl Mul<&Operator> for f64 {
    type Output = Operator;

    fn mul(self, rhs: &Operator) -> Operator {
        Operator {
            matrix: &rhs.matrix * Complex64::new(self, 0.0),
            dims: rhs.dims.clone(),
        }
    }
}
