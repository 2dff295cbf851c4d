// src/core/state.rs

use super::constants::tolerances::AMPLITUDE_TOLERANCE;
use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// Amplitudes of an `n`-qubit register over the `2^n` computational basis
/// states. Basis index bit `n - 1 - i` holds qubit `i`, so the first qubit
/// is the most significant bit.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// Wraps an amplitude vector. The caller guarantees `len == 2^num_qubits`.
    pub(crate) fn new(amplitudes: Vec<Complex<f64>>, num_qubits: usize) -> Self {
        debug_assert_eq!(amplitudes.len(), 1usize << num_qubits);
        Self { amplitudes, num_qubits }
    }

    /// The `|0…0⟩` state of `num_qubits` qubits, or `None` if `2^num_qubits`
    /// overflows `usize`.
    pub(crate) fn zero_state(num_qubits: usize) -> Option<Self> {
        let dim = u32::try_from(num_qubits).ok().and_then(|n| 1usize.checked_shl(n))?;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Some(Self { amplitudes, num_qubits })
    }

    /// Read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states (`2^n`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// `Σ|c_k|²`.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Born-rule probabilities of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Probability that the qubit stored at `bit_pos` reads 1.
    pub(crate) fn probability_one(&self, bit_pos: usize) -> f64 {
        let mask = 1usize << bit_pos;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(k, _)| k & mask != 0)
            .map(|(_, c)| c.norm_sqr())
            .sum()
    }

    /// Projects the qubit at `bit_pos` onto `outcome` and renormalises.
    /// Returns the probability of the branch that was kept.
    pub(crate) fn collapse(&mut self, bit_pos: usize, outcome: bool) -> f64 {
        let mask = 1usize << bit_pos;
        let mut kept = 0.0;
        for (k, amp) in self.amplitudes.iter_mut().enumerate() {
            if (k & mask != 0) != outcome {
                *amp = Complex::zero();
            } else {
                kept += amp.norm_sqr();
            }
        }
        if kept > AMPLITUDE_TOLERANCE {
            let scale = 1.0 / kept.sqrt();
            for amp in self.amplitudes.iter_mut() {
                *amp *= scale;
            }
        }
        kept
    }

    /// Basis label of index `k`, most significant qubit first (e.g. `|01⟩`).
    pub fn basis_label(&self, k: usize) -> String {
        let bits: String = (0..self.num_qubits)
            .rev()
            .map(|pos| if (k >> pos) & 1 == 1 { '1' } else { '0' })
            .collect();
        format!("|{}⟩", bits)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (k, amp) in self.amplitudes.iter().enumerate() {
            if amp.norm_sqr() <= AMPLITUDE_TOLERANCE {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            write!(f, "({:.4}){}", amp, self.basis_label(k))?;
            first = false;
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}
