// src/optics/wigner.rs

//! Wigner quasi-probability distribution of a single-mode state.
//!
//! Convention: `x = (a + a†)/√2`, `p = -i(a − a†)/√2`, so the vacuum is
//! `W(x, p) = e^{−x²−p²}/π` and `W(0, 0) = 1/π`.
//!
//! The grid is filled with the iterative Laguerre recursion: with
//! `A = (x + ip)/√2`, `W_0 = e^{−2|A|²}/π`, the functions `W_{mn}` for
//! `n > m` follow from `W_{m,n−1}` and `W_{m−1,n}`, and
//! `W = Σ_m ρ_mm W_mm + 2 Σ_{m<n} Re(ρ_mn W_mn)`.

use super::state::DensityMatrix;
use super::sweep::linspace;
use crate::core::QprimerError;
use nalgebra::DMatrix;
use num_complex::Complex64;
use std::f64::consts::{PI, SQRT_2};

/// Square phase-space grid `[min, max]²` sampled at `points` per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WignerGrid {
    pub min: f64,
    pub max: f64,
    pub points: usize,
}

impl Default for WignerGrid {
    fn default() -> Self {
        Self {
            min: -7.5,
            max: 7.5,
            points: 100,
        }
    }
}

impl WignerGrid {
    /// Sample positions along either axis.
    pub fn axis(&self) -> Vec<f64> {
        linspace(self.min, self.max, self.points)
    }
}

/// Evaluates the Wigner function of the single-mode state `rho` at every
/// `(xvec[col], yvec[row])`. The result has `yvec.len()` rows and
/// `xvec.len()` columns.
pub fn wigner(rho: &DensityMatrix, xvec: &[f64], yvec: &[f64]) -> Result<DMatrix<f64>, QprimerError> {
    if rho.dims().len() != 1 {
        return Err(QprimerError::invalid_parameter(
            "rho",
            format!("Wigner function needs a single-mode state, got dims {:?}", rho.dims()),
        ));
    }
    let g = SQRT_2;
    let m_dim = rho.dim();
    let rows = yvec.len();
    let cols = xvec.len();
    let r = rho.matrix();

    let a = DMatrix::from_fn(rows, cols, |i, j| Complex64::new(xvec[j], yvec[i]) * (0.5 * g));
    let a_conj = a.map(|c| c.conj());
    let a2 = &a * Complex64::new(2.0, 0.0);
    let a2_conj = &a_conj * Complex64::new(2.0, 0.0);

    let w0 = a.map(|c| Complex64::new((-2.0 * c.norm_sqr()).exp() / PI, 0.0));
    let mut w_list: Vec<DMatrix<Complex64>> = vec![DMatrix::zeros(rows, cols); m_dim];
    w_list[0] = w0;

    let mut w = w_list[0].map(|c| c.re * r[(0, 0)].re);
    for n in 1..m_dim {
        w_list[n] = w_list[n - 1].component_mul(&a2) / Complex64::new((n as f64).sqrt(), 0.0);
        w += w_list[n].map(|c| 2.0 * (r[(0, n)] * c).re);
    }

    for m in 1..m_dim {
        let sqrt_m = (m as f64).sqrt();
        let mut temp = w_list[m].clone();
        w_list[m] = (a2_conj.component_mul(&temp) - &w_list[m - 1] * Complex64::new(sqrt_m, 0.0))
            / Complex64::new(sqrt_m, 0.0);
        w += w_list[m].map(|c| (r[(m, m)] * c).re);

        for n in m + 1..m_dim {
            let next = (a2.component_mul(&w_list[n - 1]) - &temp * Complex64::new(sqrt_m, 0.0))
                / Complex64::new((n as f64).sqrt(), 0.0);
            temp = std::mem::replace(&mut w_list[n], next);
            w += w_list[n].map(|c| 2.0 * (r[(m, n)] * c).re);
        }
    }

    Ok(w * (0.5 * g * g))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::state::Ket;
    use approx::assert_abs_diff_eq;

    fn fock_density(n: usize, k: usize) -> DensityMatrix {
        Ket::basis(n, k).unwrap().to_density_matrix()
    }

    #[test]
    fn test_vacuum_peak() -> Result<(), QprimerError> {
        let w = wigner(&fock_density(5, 0), &[0.0, 1.0], &[0.0])?;
        assert_abs_diff_eq!(w[(0, 0)], 1.0 / PI, epsilon = 1e-12);
        assert_abs_diff_eq!(w[(0, 1)], (-1.0f64).exp() / PI, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_single_photon_is_negative_at_origin() -> Result<(), QprimerError> {
        let w = wigner(&fock_density(5, 1), &[0.0], &[0.0])?;
        assert_abs_diff_eq!(w[(0, 0)], -1.0 / PI, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_vacuum_integrates_to_one() -> Result<(), QprimerError> {
        let grid = WignerGrid::default();
        let axis = grid.axis();
        let step = axis[1] - axis[0];
        let w = wigner(&fock_density(3, 0), &axis, &axis)?;
        assert_eq!(w.shape(), (100, 100));
        assert_abs_diff_eq!(w.sum() * step * step, 1.0, epsilon = 1e-3);
        Ok(())
    }

    #[test]
    fn test_orientation_rows_are_y() -> Result<(), QprimerError> {
        // Off-diagonal (|0⟩ + |1⟩)/√2 shifts the distribution along x only.
        let mut rho = DMatrix::<Complex64>::zeros(2, 2);
        for i in 0..2 {
            for j in 0..2 {
                rho[(i, j)] = Complex64::new(0.5, 0.0);
            }
        }
        let rho = DensityMatrix::from_matrix(rho, vec![2])?;
        let w = wigner(&rho, &[-1.0, 1.0], &[0.0])?;
        assert!(w[(0, 1)] > w[(0, 0)]);
        let w_t = wigner(&rho, &[0.0], &[-1.0, 1.0])?;
        assert_abs_diff_eq!(w_t[(0, 0)], w_t[(1, 0)], epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_rejects_composite_state() {
        let mut vector = nalgebra::DVector::<Complex64>::zeros(4);
        vector[0] = Complex64::new(1.0, 0.0);
        let rho = Ket::from_vector(vector, vec![2, 2]).unwrap().to_density_matrix();
        assert!(matches!(wigner(&rho, &[0.0], &[0.0]), Err(QprimerError::InvalidParameter { .. })));
    }
}
