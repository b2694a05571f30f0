//! Density-matrix reconstruction from Pauli expectations.
//!
//! A single-qubit state is fixed by its Bloch vector:
//!
//!   ρ = (I + ⟨σx⟩·σx + ⟨σy⟩·σy + ⟨σz⟩·σz) / 2

use crate::pauli::Matrix2;
use crate::record::{ApproxRecord, ExactRecord};

/// A time-ordered sequence of reconstructed states.
pub type Trajectory = Vec<Matrix2>;

/// Build the density matrix for one Bloch vector.
pub fn density_from_expectations(sx: f64, sy: f64, sz: f64) -> Matrix2 {
    Matrix2::identity()
        .add(&Matrix2::pauli_x().scale(sx))
        .add(&Matrix2::pauli_y().scale(sy))
        .add(&Matrix2::pauli_z().scale(sz))
        .scale(0.5)
}

/// Reconstruct every sample of the exact reference.
pub fn exact_trajectory(record: &ExactRecord) -> Trajectory {
    build(&record.sx, &record.sy, &record.sz, record.len())
}

/// Reconstruct a pVQD run, dropping its final sample.
///
/// The runs store one state past the last compared time step; a record with
/// N samples yields N−1 matrices.
pub fn approx_trajectory(record: &ApproxRecord) -> Trajectory {
    let n = record.len().saturating_sub(1);
    build(&record.sx, &record.sy, &record.sz, n)
}

fn build(sx: &[f64], sy: &[f64], sz: &[f64], n: usize) -> Trajectory {
    sx.iter()
        .zip(sy)
        .zip(sz)
        .take(n)
        .map(|((&x, &y), &z)| density_from_expectations(x, y, z))
        .collect()
}
