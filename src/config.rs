#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Relative tolerance applied to floating point capacities unless configured otherwise.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Solver settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// On each edge, residuals and flows at or below
    /// `relative_tolerance * max(declared capacity, 1)` count as zero. Infinite
    /// capacities use a scale of 1. Ignored for integer capacities.
    pub relative_tolerance: f64,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Negative or NaN tolerances fall back to exact comparison.
    pub fn with_relative_tolerance(mut self, relative_tolerance: f64) -> Self {
        self.relative_tolerance = relative_tolerance.max(0.0);
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
        }
    }
}
