// src/demos/groundstate.rs

use crate::core::QprimerError;
use crate::optics::{SweepConfig, SweepResult, WignerGrid, compute, wigner};
use crate::plotting::{OCCUPATION_PLOT_FILE, WIGNER_PLOT_FILE, plot_occupations, plot_wigner_surface};
use nalgebra::DMatrix;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything the ground-state study produced.
#[derive(Debug, Clone)]
pub struct GroundStateReport {
    pub sweep: SweepResult,
    /// Wigner function of the cavity at the last coupling, rows along `p`.
    pub wigner: DMatrix<f64>,
    pub occupation_plot: PathBuf,
    pub wigner_plot: PathBuf,
}

/// Runs the coupling sweep, traces the atom out of the last ground state,
/// evaluates the cavity's Wigner function on `grid` and writes both plots
/// into `out_dir`, replacing existing files.
pub fn run_groundstate(config: &SweepConfig, grid: &WignerGrid, out_dir: &Path) -> Result<GroundStateReport, QprimerError> {
    let sweep = compute(config)?;

    let cavity = sweep.final_ground_state().ptrace(0)?;
    let axis = grid.axis();
    let w = wigner(&cavity, &axis, &axis)?;
    info!(
        purity = cavity.purity(),
        w_min = w.min(),
        w_max = w.max(),
        "cavity Wigner function evaluated"
    );

    let occupation_plot = out_dir.join(OCCUPATION_PLOT_FILE);
    let wigner_plot = out_dir.join(WIGNER_PLOT_FILE);
    plot_occupations(&occupation_plot, &sweep)?;
    plot_wigner_surface(&wigner_plot, &axis, &axis, &w)?;

    Ok(GroundStateReport {
        sweep,
        wigner: w,
        occupation_plot,
        wigner_plot,
    })
}
