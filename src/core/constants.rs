//! Numeric constants shared by the simulators.

/// Tolerances used when comparing floating-point amplitudes and norms.
pub mod tolerances {
    /// Allowed deviation of `Σ|c_k|²` (or a trace) from 1.0.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Squared amplitudes below this are treated as zero.
    pub const AMPLITUDE_TOLERANCE: f64 = 1e-12;
}
