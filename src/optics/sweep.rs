// src/optics/sweep.rs

//! Ground state of the atom-cavity system over a sweep of coupling strengths.

use super::hamiltonian::{AtomCavityOperators, CouplingModel};
use super::state::DensityMatrix;
use crate::core::QprimerError;
use std::f64::consts::TAU;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// `num` evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Parameters of a ground-state sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// Cavity frequency.
    pub wc: f64,
    /// Atom frequency.
    pub wa: f64,
    /// Number of cavity Fock states.
    pub n: usize,
    /// Use the rotating-wave coupling instead of the full dipole coupling.
    pub use_rwa: bool,
    /// Coupling strengths, in sweep order.
    pub couplings: Vec<f64>,
}

impl Default for SweepConfig {
    /// Resonant cavity and atom at `2π`, 20 Fock states, full coupling,
    /// 50 couplings over `[0, 2.5]·2π`.
    fn default() -> Self {
        Self {
            wc: TAU,
            wa: TAU,
            n: 20,
            use_rwa: false,
            couplings: linspace(0.0, 2.5, 50).into_iter().map(|g| g * TAU).collect(),
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<(), QprimerError> {
        if self.n == 0 {
            return Err(QprimerError::invalid_parameter("n", "cavity needs at least one Fock state"));
        }
        if !self.wc.is_finite() {
            return Err(QprimerError::invalid_parameter("wc", "must be finite"));
        }
        if !self.wa.is_finite() {
            return Err(QprimerError::invalid_parameter("wa", "must be finite"));
        }
        if self.couplings.is_empty() {
            return Err(QprimerError::invalid_parameter("couplings", "sweep needs at least one coupling strength"));
        }
        if let Some(g) = self.couplings.iter().find(|g| !g.is_finite()) {
            return Err(QprimerError::invalid_parameter("couplings", format!("non-finite coupling {}", g)));
        }
        Ok(())
    }

    pub fn coupling_model(&self) -> CouplingModel {
        CouplingModel::from_rwa(self.use_rwa)
    }
}

/// Occupation numbers of the ground state at every sweep point.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    couplings: Vec<f64>,
    cavity_occupation: Vec<f64>,
    atom_excitation: Vec<f64>,
    final_ground_state: DensityMatrix,
    elapsed: Duration,
}

impl SweepResult {
    pub fn couplings(&self) -> &[f64] {
        &self.couplings
    }

    /// `⟨a†a⟩` of the ground state, one entry per coupling.
    pub fn cavity_occupation(&self) -> &[f64] {
        &self.cavity_occupation
    }

    /// `⟨σ₋†σ₋⟩` of the ground state, one entry per coupling.
    pub fn atom_excitation(&self) -> &[f64] {
        &self.atom_excitation
    }

    /// `|ψ⟩⟨ψ|` of the ground state at the last coupling of the sweep.
    pub fn final_ground_state(&self) -> &DensityMatrix {
        &self.final_ground_state
    }

    /// Wall-clock time spent in the sweep.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Diagonalises the Hamiltonian at each coupling in `config` and records the
/// cavity and atom occupation of its ground state.
pub fn compute(config: &SweepConfig) -> Result<SweepResult, QprimerError> {
    config.validate()?;
    let start = Instant::now();

    let ops = AtomCavityOperators::new(config.n)?;
    let model = config.coupling_model();
    let mut cavity_occupation = Vec::with_capacity(config.couplings.len());
    let mut atom_excitation = Vec::with_capacity(config.couplings.len());
    let mut last_ground = None;

    for (idx, &g) in config.couplings.iter().enumerate() {
        let h = ops.hamiltonian(config.wc, config.wa, g, model);
        let (energy, ground) = h.groundstate()?;
        let nc = ops.cavity_number().expect(&ground)?;
        let na = ops.atom_number().expect(&ground)?;
        debug!(idx, g, energy, nc, na, "ground state");
        cavity_occupation.push(nc);
        atom_excitation.push(na);
        last_ground = Some(ground);
    }

    let final_ground_state = last_ground
        .map(|ket| ket.to_density_matrix())
        .ok_or_else(|| QprimerError::invalid_parameter("couplings", "sweep needs at least one coupling strength"))?;
    let elapsed = start.elapsed();
    info!(
        points = config.couplings.len(),
        n = config.n,
        ?model,
        elapsed_ms = elapsed.as_secs_f64() * 1e3,
        "ground-state sweep finished"
    );

    Ok(SweepResult {
        couplings: config.couplings.clone(),
        cavity_occupation,
        atom_excitation,
        final_ground_state,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(-7.5, 7.5, 100);
        assert_eq!(xs.len(), 100);
        assert_abs_diff_eq!(xs[0], -7.5);
        assert_abs_diff_eq!(xs[99], 7.5, epsilon = 1e-12);
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
        assert!(linspace(1.0, 2.0, 0).is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = SweepConfig::default();
        assert_eq!(config.couplings.len(), 50);
        assert_abs_diff_eq!(config.couplings[0], 0.0);
        assert_abs_diff_eq!(config.couplings[49], 2.5 * TAU, epsilon = 1e-12);
        assert_eq!(config.coupling_model(), CouplingModel::Full);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        let empty = SweepConfig { couplings: Vec::new(), ..SweepConfig::default() };
        assert!(matches!(compute(&empty), Err(QprimerError::InvalidParameter { .. })));

        let no_fock = SweepConfig { n: 0, ..SweepConfig::default() };
        assert!(matches!(no_fock.validate(), Err(QprimerError::InvalidParameter { .. })));

        let nan = SweepConfig { couplings: vec![0.0, f64::NAN], ..SweepConfig::default() };
        assert!(matches!(nan.validate(), Err(QprimerError::InvalidParameter { .. })));
    }

    #[test]
    fn test_small_sweep_lengths_match() -> Result<(), QprimerError> {
        let config = SweepConfig {
            n: 6,
            couplings: linspace(0.0, 1.0, 4),
            ..SweepConfig::default()
        };
        let result = compute(&config)?;
        assert_eq!(result.cavity_occupation().len(), 4);
        assert_eq!(result.atom_excitation().len(), 4);
        assert_eq!(result.final_ground_state().dims(), &[6, 2]);
        Ok(())
    }
}
