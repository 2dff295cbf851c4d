// tests/simulation_tests.rs

use qprimer::demos::{BitFlipConfig, run_bit_flip};
use qprimer::{Circuit, CircuitBuilder, Gate, GridQubit, Operation, QprimerError, Simulator, measure};

use approx::assert_abs_diff_eq;
use std::f64::consts::PI;

// Helper for the grid qubit on row 0
fn q(col: i32) -> GridQubit {
    GridQubit::new(0, col)
}

// Number of repetitions that read `outcome` for `key`
fn count(result: &qprimer::RunResult, key: &str, outcome: u64) -> usize {
    result.histogram(key).map(|h| h.get(&outcome).copied().unwrap_or(0)).unwrap_or(0)
}

#[test]
fn test_empty_circuit() -> Result<(), QprimerError> {
    let circuit = Circuit::new();
    let result = Simulator::new().run(&circuit, 5)?;
    assert_eq!(result.keys().count(), 0);
    assert_eq!(circuit.to_string(), "");
    Ok(())
}

#[test]
fn test_bit_flip_demo_tally() -> Result<(), QprimerError> {
    // Two independent unseeded runs: the flip is deterministic.
    for _ in 0..2 {
        let report = run_bit_flip(&BitFlipConfig::default(), &Simulator::new())?;
        let histogram = report.result.histogram("m")?;
        assert_eq!(histogram.values().sum::<usize>(), 10);
        assert!(histogram.keys().all(|outcome| *outcome <= 1));
        assert_eq!(histogram.get(&1), Some(&10));
        assert_eq!(report.result.measurements("m")?.len(), 10);
    }
    Ok(())
}

#[test]
fn test_unflipped_qubit_reads_zero() -> Result<(), QprimerError> {
    let circuit = CircuitBuilder::new().add_op(measure(&[q(0)], "m")).build()?;
    let result = Simulator::new().run(&circuit, 20)?;
    assert_eq!(count(&result, "m", 0), 20);
    Ok(())
}

#[test]
fn test_identity_and_double_flip() -> Result<(), QprimerError> {
    let circuit = CircuitBuilder::new()
        .add_op(Gate::I.on(q(0)))
        .add_op(Gate::X.on(q(0)))
        .add_op(Gate::X.on(q(0)))
        .add_op(measure(&[q(0)], "m"))
        .build()?;
    let result = Simulator::new().run(&circuit, 8)?;
    assert_eq!(count(&result, "m", 0), 8);
    Ok(())
}

#[test]
fn test_phase_shift_leaves_populations() -> Result<(), QprimerError> {
    let circuit = CircuitBuilder::new()
        .add_op(Gate::X.on(q(0)))
        .add_op(Operation::PhaseShift { target: q(0), theta: PI / 3.0 })
        .build()?;
    let result = Simulator::new().simulate(&circuit)?;
    let amp = result.final_state().vector()[1];
    assert_abs_diff_eq!(amp.norm(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(amp.arg(), PI / 3.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_hadamard_gives_both_outcomes() -> Result<(), QprimerError> {
    let circuit = CircuitBuilder::new()
        .add_op(Gate::H.on(q(0)))
        .add_op(measure(&[q(0)], "m"))
        .build()?;
    let result = Simulator::with_seed(2024).run(&circuit, 1000)?;
    let zeros = count(&result, "m", 0);
    let ones = count(&result, "m", 1);
    assert_eq!(zeros + ones, 1000);
    assert!(zeros > 400 && ones > 400, "zeros={} ones={}", zeros, ones);
    Ok(())
}

#[test]
fn test_seeded_runs_are_reproducible() -> Result<(), QprimerError> {
    let circuit = CircuitBuilder::new()
        .add_op(Gate::H.on(q(0)))
        .add_op(Gate::H.on(q(1)))
        .add_op(measure(&[q(0), q(1)], "m"))
        .build()?;
    let first = Simulator::with_seed(11).run(&circuit, 50)?;
    let second = Simulator::with_seed(11).run(&circuit, 50)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_controlled_x_control_zero() -> Result<(), QprimerError> {
    let circuit = CircuitBuilder::new()
        .add_op(Gate::X.controlled(q(0), q(1)))
        .add_op(measure(&[q(0), q(1)], "m"))
        .build()?;
    let result = Simulator::new().run(&circuit, 10)?;
    assert_eq!(count(&result, "m", 0b00), 10);
    Ok(())
}

#[test]
fn test_controlled_x_control_one() -> Result<(), QprimerError> {
    let circuit = CircuitBuilder::new()
        .add_op(Gate::X.on(q(0)))
        .add_op(Gate::X.controlled(q(0), q(1)))
        .add_op(measure(&[q(0), q(1)], "m"))
        .build()?;
    let result = Simulator::new().run(&circuit, 10)?;
    assert_eq!(count(&result, "m", 0b11), 10);
    assert_eq!(result.to_string(), "m=1111111111, 1111111111");
    Ok(())
}

#[test]
fn test_controlled_diagram() -> Result<(), QprimerError> {
    let circuit = CircuitBuilder::new()
        .add_op(Gate::X.controlled(q(0), q(1)))
        .build()?;
    let expected = "(0, 0): ───@───\n           │\n(0, 1): ───X───";
    assert_eq!(circuit.to_string(), expected);
    Ok(())
}

#[test]
fn test_unknown_key_errors() -> Result<(), QprimerError> {
    let circuit = CircuitBuilder::new().add_op(measure(&[q(0)], "m")).build()?;
    let result = Simulator::new().run(&circuit, 1)?;
    assert_eq!(
        result.histogram("z"),
        Err(QprimerError::UnknownMeasurementKey { key: "z".to_string() })
    );
    Ok(())
}

#[test]
fn test_duplicate_key_rejected() {
    let built = CircuitBuilder::new()
        .add_op(measure(&[q(0)], "m"))
        .add_op(measure(&[q(1)], "m"))
        .build();
    assert_eq!(built.unwrap_err(), QprimerError::DuplicateMeasurementKey { key: "m".to_string() });
}

#[test]
fn test_self_controlled_gate_rejected() {
    let built = CircuitBuilder::new().add_op(Gate::X.controlled(q(0), q(0))).build();
    assert!(matches!(built, Err(QprimerError::InvalidOperation { .. })));
}
