// tests/groundstate_tests.rs

use qprimer::QprimerError;
use qprimer::demos::run_groundstate;
use qprimer::optics::{SweepConfig, WignerGrid, compute, linspace, wigner};
use qprimer::plotting::{OCCUPATION_PLOT_FILE, WIGNER_PLOT_FILE};

use approx::assert_abs_diff_eq;
use std::f64::consts::{PI, TAU};

#[test]
fn test_default_sweep_occupations() -> Result<(), QprimerError> {
    let sweep = compute(&SweepConfig::default())?;
    assert_eq!(sweep.couplings().len(), 50);
    assert_eq!(sweep.cavity_occupation().len(), 50);
    assert_eq!(sweep.atom_excitation().len(), 50);

    for (&nc, &na) in sweep.cavity_occupation().iter().zip(sweep.atom_excitation()) {
        assert!(nc >= -1e-9, "negative cavity occupation {}", nc);
        assert!(na >= -1e-9, "negative atom excitation {}", na);
        assert!(na <= 1.0 + 1e-9);
    }

    // Uncoupled: ground state is the empty cavity with the atom down.
    assert_abs_diff_eq!(sweep.cavity_occupation()[0], 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(sweep.atom_excitation()[0], 0.0, epsilon = 1e-9);

    // Ultra-strong coupling dresses the ground state with photons.
    assert!(sweep.cavity_occupation()[49] > 1.0);
    assert_eq!(sweep.final_ground_state().dims(), &[20, 2]);
    assert_abs_diff_eq!(sweep.final_ground_state().purity(), 1.0, epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_rwa_and_full_coupling_differ() -> Result<(), QprimerError> {
    let full = compute(&SweepConfig::default())?;
    let rwa = compute(&SweepConfig {
        use_rwa: true,
        ..SweepConfig::default()
    })?;

    assert_abs_diff_eq!(rwa.cavity_occupation()[0], 0.0, epsilon = 1e-9);
    let difference: f64 = full
        .cavity_occupation()
        .iter()
        .zip(rwa.cavity_occupation())
        .map(|(a, b)| (a - b).abs())
        .sum();
    assert!(difference > 1e-3, "curves coincide (difference {})", difference);

    // Below g = w the RWA ground state stays |0, g⟩.
    for (g, &nc) in rwa.couplings().iter().zip(rwa.cavity_occupation()) {
        if *g < 0.9 * TAU {
            assert_abs_diff_eq!(nc, 0.0, epsilon = 1e-9);
        }
    }
    Ok(())
}

#[test]
fn test_cavity_wigner_at_weak_coupling_is_vacuum_like() -> Result<(), QprimerError> {
    let config = SweepConfig {
        n: 10,
        couplings: linspace(0.0, 0.0, 1),
        ..SweepConfig::default()
    };
    let sweep = compute(&config)?;
    let cavity = sweep.final_ground_state().ptrace(0)?;
    assert_eq!(cavity.dims(), &[10]);
    let w = wigner(&cavity, &[0.0], &[0.0])?;
    assert_abs_diff_eq!(w[(0, 0)], 1.0 / PI, epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_end_to_end_writes_both_plots() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let report = run_groundstate(&SweepConfig::default(), &WignerGrid::default(), dir.path())?;

    assert_eq!(report.occupation_plot, dir.path().join(OCCUPATION_PLOT_FILE));
    assert_eq!(report.wigner_plot, dir.path().join(WIGNER_PLOT_FILE));
    assert!(std::fs::metadata(&report.occupation_plot)?.len() > 0);
    assert!(std::fs::metadata(&report.wigner_plot)?.len() > 0);
    assert_eq!(report.wigner.shape(), (100, 100));

    // A second run overwrites in place.
    run_groundstate(&SweepConfig::default(), &WignerGrid::default(), dir.path())?;
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 2);
    Ok(())
}

#[test]
fn test_invalid_sweep_is_rejected() {
    let config = SweepConfig {
        wc: f64::INFINITY,
        ..SweepConfig::default()
    };
    assert!(matches!(compute(&config), Err(QprimerError::InvalidParameter { .. })));
}
