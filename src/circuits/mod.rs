// src/circuits/mod.rs

//! Ordered sequences of [`Operation`]s and their text diagrams.

use crate::core::{GridQubit, QprimerError};
use crate::operations::Operation;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

/// An ordered list of operations together with the qubits they touch.
///
/// The order of `operations` is the execution order; `qubits` is kept sorted
/// so diagrams and state-vector layouts are deterministic.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    qubits: BTreeSet<GridQubit>,
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self {
            qubits: BTreeSet::new(),
            operations: Vec::new(),
        }
    }

    /// Appends `op`, registering every qubit it mentions.
    pub fn add_operation(&mut self, op: Operation) {
        for qubit in op.involved_qubits() {
            self.qubits.insert(qubit);
        }
        self.operations.push(op);
    }

    /// Appends every operation from `ops` in order.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// The qubits involved in this circuit, sorted.
    pub fn qubits(&self) -> &BTreeSet<GridQubit> {
        &self.qubits
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Measurement keys in circuit order.
    pub fn measurement_keys(&self) -> Vec<&str> {
        self.operations.iter().filter_map(Operation::measurement_key).collect()
    }

    /// Checks the structural rules the simulator relies on:
    /// measurement keys are non-empty and unique, a measurement lists each
    /// qubit at most once and at least one, and a controlled gate has
    /// distinct control and target.
    pub fn validate(&self) -> Result<(), QprimerError> {
        let mut seen_keys = HashSet::new();
        for op in &self.operations {
            match op {
                Operation::Measure { targets, key } => {
                    if key.is_empty() {
                        return Err(QprimerError::InvalidOperation {
                            message: "Measurement key cannot be empty".to_string(),
                        });
                    }
                    if targets.is_empty() {
                        return Err(QprimerError::InvalidOperation {
                            message: format!("Measurement '{}' has no target qubits", key),
                        });
                    }
                    if !seen_keys.insert(key.as_str()) {
                        return Err(QprimerError::DuplicateMeasurementKey { key: key.clone() });
                    }
                    let unique: HashSet<_> = targets.iter().collect();
                    if unique.len() != targets.len() {
                        return Err(QprimerError::InvalidOperation {
                            message: format!("Measurement '{}' lists the same qubit twice", key),
                        });
                    }
                }
                Operation::Controlled { control, target, .. } if control == target => {
                    return Err(QprimerError::InvalidOperation {
                        message: format!("Control and target cannot both be {}", control),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Method-chaining constructor for [`Circuit`].
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self { circuit: Circuit::new() }
    }

    /// Appends one operation.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Appends every operation from `ops`.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Validates and returns the circuit.
    pub fn build(self) -> Result<Circuit, QprimerError> {
        self.circuit.validate()?;
        Ok(self.circuit)
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Diagram
//-------------------------------------------------------------------------

const WIRE: &str = "───";
const H_WIRE: char = '─';
const V_WIRE: char = '│';

/// Symbols placed by one operation: per-row cell text plus the row span
/// that needs vertical connectors.
fn operation_cells(op: &Operation, rows: &BTreeMap<GridQubit, usize>) -> (Vec<(usize, String)>, Option<(usize, usize)>) {
    let mut cells = Vec::new();
    match op {
        Operation::Gate { gate, target } => {
            if let Some(&r) = rows.get(target) {
                cells.push((r, gate.symbol().to_string()));
            }
        }
        Operation::PhaseShift { target, theta } => {
            if let Some(&r) = rows.get(target) {
                cells.push((r, format!("P({:.3})", theta)));
            }
        }
        Operation::Controlled { gate, control, target } => {
            if let (Some(&rc), Some(&rt)) = (rows.get(control), rows.get(target)) {
                cells.push((rc, "@".to_string()));
                cells.push((rt, gate.symbol().to_string()));
            }
        }
        Operation::Measure { targets, key } => {
            for (i, qubit) in targets.iter().enumerate() {
                if let Some(&r) = rows.get(qubit) {
                    let symbol = if i == 0 { format!("M('{}')", key) } else { "M".to_string() };
                    cells.push((r, symbol));
                }
            }
        }
    }
    let span = if cells.len() > 1 {
        let lo = cells.iter().map(|(r, _)| *r).min().unwrap_or(0);
        let hi = cells.iter().map(|(r, _)| *r).max().unwrap_or(0);
        Some((lo, hi))
    } else {
        None
    };
    (cells, span)
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return Ok(());
        }

        let qubits: Vec<GridQubit> = self.qubits.iter().copied().collect();
        let rows: BTreeMap<GridQubit, usize> = qubits.iter().enumerate().map(|(i, q)| (*q, i)).collect();
        let num_rows = qubits.len();
        let labels: Vec<String> = qubits.iter().map(|q| format!("{}: ", q)).collect();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        // lines[2 * r] is qubit row r, lines[2 * r + 1] the connector row below it
        let mut lines: Vec<String> = Vec::with_capacity(2 * num_rows);
        for (r, label) in labels.iter().enumerate() {
            lines.push(format!("{:<width$}", label, width = label_width));
            if r + 1 < num_rows {
                lines.push(" ".repeat(label_width));
            }
        }

        for op in &self.operations {
            let (cells, span) = operation_cells(op, &rows);
            let width = cells.iter().map(|(_, s)| s.chars().count()).max().unwrap_or(1);
            for r in 0..num_rows {
                let cell = cells.iter().find(|(row, _)| *row == r).map(|(_, s)| s.as_str());
                let line = &mut lines[2 * r];
                line.push_str(WIRE);
                match cell {
                    Some(symbol) => {
                        line.push_str(symbol);
                        let pad = width - symbol.chars().count();
                        line.extend(std::iter::repeat_n(H_WIRE, pad));
                    }
                    None => line.extend(std::iter::repeat_n(H_WIRE, width)),
                }

                if r + 1 < num_rows {
                    let connected = span.is_some_and(|(lo, hi)| r >= lo && r < hi);
                    let connector = &mut lines[2 * r + 1];
                    connector.push_str("   ");
                    connector.push(if connected { V_WIRE } else { ' ' });
                    connector.extend(std::iter::repeat_n(' ', width - 1));
                }
            }
        }

        for r in 0..num_rows {
            lines[2 * r].push_str(WIRE);
        }

        let rendered: Vec<&str> = lines.iter().map(|l| l.trim_end()).collect();
        write!(f, "{}", rendered.join("\n"))
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
