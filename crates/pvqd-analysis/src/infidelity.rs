//! Trajectory infidelity.
//!
//! Per time step the overlap deficit is `1 − tr(A† B)²`. The steps are
//! folded into a single scalar either by the compounding rule the published
//! figures were produced with, or by a plain Riemann sum.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::pauli::Matrix2;

/// Time step of the reference data set.
pub const DEFAULT_DT: f64 = 0.05;

/// How per-step deficits are folded into one number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accumulation {
    /// `sum = (sum + step) * dt` at every step.
    ///
    /// Earlier steps are damped by a further factor of `dt` each iteration,
    /// so the result is dominated by the last few samples.
    #[default]
    Compounding,
    /// `dt * Σ step`.
    Riemann,
}

impl fmt::Display for Accumulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accumulation::Compounding => write!(f, "compounding"),
            Accumulation::Riemann => write!(f, "riemann"),
        }
    }
}

impl FromStr for Accumulation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compounding" => Ok(Accumulation::Compounding),
            "riemann" => Ok(Accumulation::Riemann),
            other => Err(format!(
                "Unknown accumulation '{other}'. Available: compounding, riemann"
            )),
        }
    }
}

/// Parameters of the infidelity fold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfidelityConfig {
    /// Time-step width.
    pub dt: f64,
    /// Fold rule.
    pub accumulation: Accumulation,
}

impl Default for InfidelityConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            accumulation: Accumulation::default(),
        }
    }
}

/// Overlap deficit of a single step: `Re(1 − tr(a† b)²)`.
pub fn step_infidelity(a: &Matrix2, b: &Matrix2) -> f64 {
    let overlap = a.dagger().mul(b).trace();
    1.0 - (overlap * overlap).re
}

/// Fold the per-step deficits of two trajectories.
///
/// Steps are paired in order; the longer trajectory is cut to the length of
/// the shorter one. Two empty trajectories give 0.
pub fn infidelity(a: &[Matrix2], b: &[Matrix2], config: &InfidelityConfig) -> f64 {
    let steps = a.iter().zip(b).map(|(x, y)| step_infidelity(x, y));
    match config.accumulation {
        Accumulation::Compounding => steps.fold(0.0, |sum, step| (sum + step) * config.dt),
        Accumulation::Riemann => steps.sum::<f64>() * config.dt,
    }
}
