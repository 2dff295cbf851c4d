// src/demos/bit_flip.rs

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::{GridQubit, QprimerError};
use crate::operations::{Gate, measure};
use crate::simulation::{RunResult, Simulator};
use tracing::debug;

/// Qubit, repetition count and measurement key of the bit-flip demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitFlipConfig {
    pub qubit: GridQubit,
    pub repetitions: usize,
    pub key: String,
}

impl Default for BitFlipConfig {
    fn default() -> Self {
        Self {
            qubit: GridQubit::new(0, 0),
            repetitions: 10,
            key: "m".to_string(),
        }
    }
}

/// The circuit that was sampled and its measurement record.
#[derive(Debug, Clone)]
pub struct BitFlipReport {
    pub circuit: Circuit,
    pub result: RunResult,
}

/// `X` on `qubit`, then a measurement under `key`.
pub fn bit_flip_circuit(qubit: GridQubit, key: &str) -> Result<Circuit, QprimerError> {
    CircuitBuilder::new()
        .add_op(Gate::X.on(qubit))
        .add_op(measure(&[qubit], key))
        .build()
}

/// Builds the bit-flip circuit from `config` and samples it
/// `config.repetitions` times on `simulator`.
pub fn run_bit_flip(config: &BitFlipConfig, simulator: &Simulator) -> Result<BitFlipReport, QprimerError> {
    let circuit = bit_flip_circuit(config.qubit, &config.key)?;
    let result = simulator.run(&circuit, config.repetitions)?;
    let histogram = result.histogram(&config.key)?;
    debug!(key = %config.key, ?histogram, "bit-flip tally");
    Ok(BitFlipReport { circuit, result })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report() -> Result<(), QprimerError> {
        let report = run_bit_flip(&BitFlipConfig::default(), &Simulator::with_seed(7))?;
        assert_eq!(report.circuit.to_string(), "(0, 0): ───X───M('m')───");
        assert_eq!(report.result.to_string(), "m=1111111111");
        let histogram = report.result.histogram("m")?;
        assert_eq!(histogram.get(&1), Some(&10));
        assert_eq!(histogram.len(), 1);
        Ok(())
    }

    #[test]
    fn test_empty_key_rejected() {
        let config = BitFlipConfig {
            key: String::new(),
            ..BitFlipConfig::default()
        };
        assert!(run_bit_flip(&config, &Simulator::new()).is_err());
    }
}
