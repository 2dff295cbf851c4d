// src/optics/hamiltonian.rs

//! Atom-cavity (Rabi / Jaynes-Cummings) Hamiltonians.

use super::operator::Operator;
use crate::core::QprimerError;

/// Form of the atom-cavity coupling term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CouplingModel {
    /// Rotating-wave approximation: `g (a†σ₋ + a σ₋†)`.
    RotatingWave,
    /// Full dipole coupling: `g (a† + a)(σ₋ + σ₋†)`.
    Full,
}

impl CouplingModel {
    pub fn from_rwa(use_rwa: bool) -> Self {
        if use_rwa { CouplingModel::RotatingWave } else { CouplingModel::Full }
    }
}

/// Ladder and number operators of a cavity truncated to `n` Fock states
/// coupled to a two-level atom, on the space `cavity ⊗ atom`.
#[derive(Debug, Clone)]
pub struct AtomCavityOperators {
    n: usize,
    a: Operator,
    a_dag: Operator,
    sm: Operator,
    sm_dag: Operator,
    nc: Operator,
    na: Operator,
}

impl AtomCavityOperators {
    /// Builds `a = destroy(n) ⊗ I₂`, `σ₋ = I_n ⊗ destroy(2)` and the number
    /// operators `n_c = a†a`, `n_a = σ₋†σ₋`.
    pub fn new(n: usize) -> Result<Self, QprimerError> {
        if n == 0 {
            return Err(QprimerError::invalid_parameter("N", "cavity needs at least one Fock state"));
        }
        let a = Operator::tensor(&[&Operator::destroy(n)?, &Operator::identity(2)?])?;
        let sm = Operator::tensor(&[&Operator::identity(n)?, &Operator::destroy(2)?])?;
        let a_dag = a.dag();
        let sm_dag = sm.dag();
        let nc = &a_dag * &a;
        let na = &sm_dag * &sm;
        Ok(Self { n, a, a_dag, sm, sm_dag, nc, na })
    }

    /// Number of cavity Fock states.
    pub fn fock_cutoff(&self) -> usize {
        self.n
    }

    /// Cavity photon number `a†a`.
    pub fn cavity_number(&self) -> &Operator {
        &self.nc
    }

    /// Atom excitation number `σ₋†σ₋`.
    pub fn atom_number(&self) -> &Operator {
        &self.na
    }

    pub fn cavity_destroy(&self) -> &Operator {
        &self.a
    }

    pub fn atom_destroy(&self) -> &Operator {
        &self.sm
    }

    /// `H = wc·n_c + wa·n_a + g·V`, with `V` chosen by `model`.
    pub fn hamiltonian(&self, wc: f64, wa: f64, g: f64, model: CouplingModel) -> Operator {
        let coupling = match model {
            CouplingModel::RotatingWave => &(&self.a_dag * &self.sm) + &(&self.a * &self.sm_dag),
            CouplingModel::Full => &(&self.a_dag + &self.a) * &(&self.sm + &self.sm_dag),
        };
        wc * &self.nc + wa * &self.na + g * &coupling
    }
}
