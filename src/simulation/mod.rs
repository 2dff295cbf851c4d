// src/simulation/mod.rs

//! Exact (noise-free) execution of [`Circuit`]s.
//! This module contains the `Simulator` entry point and the internal
//! `SimulationEngine` that evolves the state vector.

mod results;
pub(crate) mod engine;

pub use results::{RunResult, SimulationResult};

use crate::circuits::Circuit;
use crate::core::QprimerError;
use crate::operations::Operation;
use engine::SimulationEngine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Samples circuits on an exact state-vector simulator.
///
/// Measurement outcomes follow the Born rule. Without a seed the random
/// source is drawn from the OS, so two runs of a circuit with random
/// outcomes generally differ; [`Simulator::with_seed`] makes them repeatable.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    seed: Option<u64>,
}

impl Simulator {
    /// Creates an unseeded simulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator whose measurement sampling is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Executes `circuit` `repetitions` times from `|0…0⟩` and collects the
    /// measurement records of every repetition.
    ///
    /// # Returns
    /// * `Ok(RunResult)` with one record per repetition under each key.
    /// * `Err(QprimerError)` if the circuit is malformed or the state loses
    ///   normalisation.
    pub fn run(&self, circuit: &Circuit, repetitions: usize) -> Result<RunResult, QprimerError> {
        circuit.validate()?;
        let mut result = RunResult::new(repetitions);
        if circuit.is_empty() {
            return Ok(result);
        }
        for op in circuit.operations() {
            if let Operation::Measure { targets, key } = op {
                result.register_key(key, targets);
            }
        }

        let mut engine = SimulationEngine::init(circuit.qubits())?;
        let mut rng = self.rng();
        debug!(
            qubits = circuit.qubits().len(),
            operations = circuit.len(),
            repetitions,
            "sampling circuit"
        );

        for repetition in 0..repetitions {
            if repetition > 0 {
                engine.reset();
            }
            execute(&mut engine, circuit, &mut rng, &mut result)?;
        }
        Ok(result)
    }

    /// Executes `circuit` once and returns the final state together with
    /// the single-shot measurement record.
    pub fn simulate(&self, circuit: &Circuit) -> Result<SimulationResult, QprimerError> {
        circuit.validate()?;
        let mut measurements = RunResult::new(1);
        for op in circuit.operations() {
            if let Operation::Measure { targets, key } = op {
                measurements.register_key(key, targets);
            }
        }

        let mut engine = SimulationEngine::init(circuit.qubits())?;
        let mut rng = self.rng();
        execute(&mut engine, circuit, &mut rng, &mut measurements)?;

        Ok(SimulationResult {
            final_state: engine.state().clone(),
            measurements,
            qubit_order: circuit.qubits().iter().copied().collect(),
        })
    }
}

/// One pass through the circuit's operations.
fn execute<R: Rng + ?Sized>(
    engine: &mut SimulationEngine,
    circuit: &Circuit,
    rng: &mut R,
    result: &mut RunResult,
) -> Result<(), QprimerError> {
    for op in circuit.operations() {
        match op {
            Operation::Measure { targets, key } => {
                let bits = engine.measure(targets, rng)?;
                result.record(key, bits);
            }
            _ => engine.apply_operation(op)?,
        }
    }
    Ok(())
}
