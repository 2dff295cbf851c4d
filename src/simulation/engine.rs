// src/simulation/engine.rs
use crate::core::{GridQubit, QprimerError, StateVector};
use crate::operations::{Matrix2, Operation, phase_shift_matrix};
use crate::validation::check_normalization;
use num_complex::Complex;
use num_traits::{One, Zero};
use rand::Rng;
use std::collections::{BTreeSet, HashMap};

/// Exact state-vector evolution for a fixed set of qubits.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    /// Maps each qubit to its position (0..n-1) in sorted qubit order.
    qubit_indices: HashMap<GridQubit, usize>,
    /// The `2^n` amplitudes of the whole register.
    state: StateVector,
    num_qubits: usize,
}

impl SimulationEngine {
    /// Initializes the engine in `|0…0⟩` for the given qubits.
    pub(crate) fn init(qubits: &BTreeSet<GridQubit>) -> Result<Self, QprimerError> {
        let num_qubits = qubits.len();
        let state = StateVector::zero_state(num_qubits).ok_or_else(|| QprimerError::SimulationError {
            message: format!("{} qubits overflow the state vector dimension", num_qubits),
        })?;

        // BTreeSet iteration is sorted, so index assignment is deterministic.
        let qubit_indices = qubits.iter().enumerate().map(|(index, q)| (*q, index)).collect();

        Ok(Self {
            qubit_indices,
            state,
            num_qubits,
        })
    }

    /// Returns the register to `|0…0⟩`.
    pub(crate) fn reset(&mut self) {
        let amplitudes = self.state.vector_mut();
        amplitudes.fill(Complex::zero());
        amplitudes[0] = Complex::one();
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, amplitudes: Vec<Complex<f64>>) -> Result<(), QprimerError> {
        if amplitudes.len() != self.state.dim() {
            return Err(QprimerError::dimension_mismatch(self.state.dim(), amplitudes.len()));
        }
        self.state = StateVector::new(amplitudes, self.num_qubits);
        Ok(())
    }

    /// Applies a unitary operation. Measurements go through [`Self::measure`].
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), QprimerError> {
        match op {
            Operation::Gate { gate, target } => {
                let bit = self.bit_position(target)?;
                self.apply_single_qubit_gate(bit, &gate.matrix());
            }
            Operation::PhaseShift { target, theta } => {
                let bit = self.bit_position(target)?;
                self.apply_single_qubit_gate(bit, &phase_shift_matrix(*theta));
            }
            Operation::Controlled { gate, control, target } => {
                let control_bit = self.bit_position(control)?;
                let target_bit = self.bit_position(target)?;
                if control_bit == target_bit {
                    return Err(QprimerError::InvalidOperation {
                        message: "Control and target qubits cannot be the same for controlled operation".to_string(),
                    });
                }
                self.apply_controlled_gate(control_bit, target_bit, &gate.matrix());
            }
            Operation::Measure { .. } => {
                return Err(QprimerError::InvalidOperation {
                    message: "Measure operation should not be passed directly to apply_operation".to_string(),
                });
            }
        }
        check_normalization(&self.state, None)
    }

    /// Measures `targets` one after another in the computational basis,
    /// collapsing the state after each. Returns the bits in target order.
    pub(crate) fn measure<R: Rng + ?Sized>(&mut self, targets: &[GridQubit], rng: &mut R) -> Result<Vec<u8>, QprimerError> {
        let mut bits = Vec::with_capacity(targets.len());
        for target in targets {
            let bit = self.bit_position(target)?;
            let p_one = self.state.probability_one(bit);
            let outcome = rng.random::<f64>() < p_one;
            self.state.collapse(bit, outcome);
            bits.push(u8::from(outcome));
        }
        check_normalization(&self.state, None)?;
        Ok(bits)
    }

    /// Bit position (from the right) that stores `qubit` in a basis index.
    fn bit_position(&self, qubit: &GridQubit) -> Result<usize, QprimerError> {
        self.qubit_indices
            .get(qubit)
            .map(|idx| self.num_qubits - 1 - idx)
            .ok_or_else(|| QprimerError::UnknownQubit {
                qubit: *qubit,
                message: "qubit not found in simulation context".to_string(),
            })
    }

    /// Applies a 2x2 matrix to the qubit stored at bit `k`.
    fn apply_single_qubit_gate(&mut self, k: usize, matrix: &Matrix2) {
        let k_mask = 1usize << k;
        let amplitudes = self.state.vector_mut();

        // Visit each pair of basis states differing only at bit k once.
        for i0 in 0..amplitudes.len() {
            if i0 & k_mask != 0 {
                continue;
            }
            let i1 = i0 | k_mask;
            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }

    /// Applies `matrix` to bit `target` on the subspace where bit `control` is 1.
    fn apply_controlled_gate(&mut self, control: usize, target: usize, matrix: &Matrix2) {
        let c_mask = 1usize << control;
        let t_mask = 1usize << target;
        let amplitudes = self.state.vector_mut();

        for i0 in 0..amplitudes.len() {
            if i0 & c_mask == 0 || i0 & t_mask != 0 {
                continue;
            }
            let i1 = i0 | t_mask;
            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }
}
