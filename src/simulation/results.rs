// src/simulation/results.rs
use crate::core::{GridQubit, QprimerError, StateVector};
use std::collections::BTreeMap;
use std::fmt;

/// Measurement records collected over a number of repetitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    repetitions: usize,
    /// Measured qubits per key, in measurement order.
    qubits: BTreeMap<String, Vec<GridQubit>>,
    /// One bit vector per repetition, per key.
    records: BTreeMap<String, Vec<Vec<u8>>>,
}

impl RunResult {
    pub(crate) fn new(repetitions: usize) -> Self {
        Self {
            repetitions,
            qubits: BTreeMap::new(),
            records: BTreeMap::new(),
        }
    }

    /// Declares `key` so it appears even when no repetition ran.
    pub(crate) fn register_key(&mut self, key: &str, targets: &[GridQubit]) {
        let capacity = self.repetitions;
        self.qubits.insert(key.to_string(), targets.to_vec());
        self.records.entry(key.to_string()).or_insert_with(|| Vec::with_capacity(capacity));
    }

    pub(crate) fn record(&mut self, key: &str, bits: Vec<u8>) {
        self.records.entry(key.to_string()).or_default().push(bits);
    }

    /// Number of times the circuit was executed.
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Measurement keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Qubits measured under `key`, in the order their bits are stored.
    pub fn qubits(&self, key: &str) -> Result<&[GridQubit], QprimerError> {
        self.qubits
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| QprimerError::UnknownMeasurementKey { key: key.to_string() })
    }

    /// Raw records for `key`: one bit vector per repetition.
    pub fn measurements(&self, key: &str) -> Result<&[Vec<u8>], QprimerError> {
        self.records
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| QprimerError::UnknownMeasurementKey { key: key.to_string() })
    }

    /// Counts of each outcome for `key`, the bits read as a big-endian integer.
    ///
    /// Outcomes must fit a `u64`: keys measuring more than 64 qubits are an
    /// `InvalidOperation` error.
    pub fn histogram(&self, key: &str) -> Result<BTreeMap<u64, usize>, QprimerError> {
        let width = self.qubits(key)?.len();
        if width > u64::BITS as usize {
            return Err(QprimerError::InvalidOperation {
                message: format!(
                    "histogram of '{}' needs {} bits per outcome, at most {} fit",
                    key,
                    width,
                    u64::BITS
                ),
            });
        }
        let mut counts = BTreeMap::new();
        for bits in self.measurements(key)? {
            let value = bits.iter().fold(0u64, |acc, b| (acc << 1) | u64::from(*b));
            *counts.entry(value).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, records) in &self.records {
            if !first {
                writeln!(f)?;
            }
            first = false;

            let width = self.qubits.get(key).map_or(0, Vec::len);
            let columns: Vec<String> = (0..width)
                .map(|i| records.iter().map(|bits| if bits[i] == 1 { '1' } else { '0' }).collect())
                .collect();
            write!(f, "{}={}", key, columns.join(", "))?;
        }
        Ok(())
    }
}

/// Outcome of a single pass through a circuit: the final state plus the
/// one-shot measurement record.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub(crate) final_state: StateVector,
    pub(crate) measurements: RunResult,
    pub(crate) qubit_order: Vec<GridQubit>,
}

impl SimulationResult {
    /// State after the last operation (measurements collapse it).
    pub fn final_state(&self) -> &StateVector {
        &self.final_state
    }

    pub fn measurements(&self) -> &RunResult {
        &self.measurements
    }

    /// Qubit order of the state vector, most significant first.
    pub fn qubit_order(&self) -> &[GridQubit] {
        &self.qubit_order
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "measurements: {}", self.measurements)?;
        let order: Vec<String> = self.qubit_order.iter().map(ToString::to_string).collect();
        write!(f, "output vector ({}): {}", order.join(", "), self.final_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_one_column_per_qubit() {
        let q0 = GridQubit::new(0, 0);
        let q1 = GridQubit::new(0, 1);
        let mut result = RunResult::new(3);
        result.register_key("m", &[q0, q1]);
        result.record("m", vec![1, 0]);
        result.record("m", vec![1, 1]);
        result.record("m", vec![0, 1]);
        assert_eq!(result.to_string(), "m=110, 011");
    }

    #[test]
    fn test_histogram_reads_big_endian() -> Result<(), QprimerError> {
        let q0 = GridQubit::new(0, 0);
        let q1 = GridQubit::new(0, 1);
        let mut result = RunResult::new(3);
        result.register_key("m", &[q0, q1]);
        result.record("m", vec![1, 0]);
        result.record("m", vec![1, 0]);
        result.record("m", vec![0, 1]);
        let histogram = result.histogram("m")?;
        assert_eq!(histogram.get(&2), Some(&2));
        assert_eq!(histogram.get(&1), Some(&1));
        Ok(())
    }

    #[test]
    fn test_histogram_rejects_outcomes_wider_than_u64() -> Result<(), QprimerError> {
        let wide: Vec<GridQubit> = (0..65).map(|col| GridQubit::new(0, col)).collect();
        let mut result = RunResult::new(1);
        result.register_key("wide", &wide);
        result.record("wide", vec![1; 65]);
        assert!(matches!(
            result.histogram("wide"),
            Err(QprimerError::InvalidOperation { .. })
        ));

        result.register_key("full", &wide[..64]);
        result.record("full", vec![1; 64]);
        assert_eq!(result.histogram("full")?.get(&u64::MAX), Some(&1));
        Ok(())
    }

    #[test]
    fn test_unknown_key() {
        let result = RunResult::new(1);
        assert_eq!(
            result.histogram("z").unwrap_err(),
            QprimerError::UnknownMeasurementKey { key: "z".to_string() }
        );
    }

    #[test]
    fn test_zero_repetitions_keeps_key() -> Result<(), QprimerError> {
        let mut result = RunResult::new(0);
        result.register_key("m", &[GridQubit::new(0, 0)]);
        assert!(result.histogram("m")?.is_empty());
        assert_eq!(result.to_string(), "m=");
        Ok(())
    }
}
