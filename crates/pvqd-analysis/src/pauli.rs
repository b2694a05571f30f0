//! 2x2 complex matrices and the single-qubit Pauli basis.
//!
//! Every reconstructed state lives in the real span of {I, σx, σy, σz}, so a
//! fixed-size row-major array is all the linear algebra this crate needs.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Default tolerance for approximate comparisons.
pub const EPSILON: f64 = 1e-12;

/// A 2x2 complex matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Matrix2 {
    /// Create a matrix from its four entries.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// The identity matrix.
    pub fn identity() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
        )
    }

    /// Pauli-X.
    pub fn pauli_x() -> Self {
        Self::new(
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
        )
    }

    /// Pauli-Y.
    pub fn pauli_y() -> Self {
        Self::new(
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, -1.0),
            Complex64::new(0.0, 1.0),
            Complex64::new(0.0, 0.0),
        )
    }

    /// Pauli-Z.
    pub fn pauli_z() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(-1.0, 0.0),
        )
    }

    /// Multiply every entry by a real factor.
    pub fn scale(&self, factor: f64) -> Self {
        let [a, b, c, d] = self.data;
        Self::new(a * factor, b * factor, c * factor, d * factor)
    }

    /// Entry-wise sum.
    pub fn add(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a + e, b + f, c + g, d + h)
    }

    /// Matrix product: self * other.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> Complex64 {
        self.data[0] + self.data[3]
    }

    /// True if `self` equals its conjugate transpose within `tol`.
    pub fn is_hermitian(&self, tol: f64) -> bool {
        self.approx_eq(&self.dagger(), tol)
    }

    /// Entry-wise comparison within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(x, y)| (x - y).norm() <= tol)
    }
}

impl std::ops::Add for Matrix2 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn add(self, rhs: Self) -> Self::Output {
        Matrix2::add(&self, &rhs)
    }
}

impl std::ops::Mul for Matrix2 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn mul(self, rhs: Self) -> Self::Output {
        Matrix2::mul(&self, &rhs)
    }
}
