//! `pvqd-analysis`: shot-noise analysis of pVQD time-evolution runs.
//!
//! Loads the exact reference trajectory and a set of pVQD runs taken at
//! different shot counts, reconstructs the single-qubit density matrix at
//! every time step and folds the step-wise overlap deficit into one
//! infidelity number per run.
//!
//! ```text
//! [JSON records] -> record -> state (ρ per step) -> infidelity -> series
//!                                                         |
//!                                                         v
//!                                                   report (JSON)
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use pvqd_analysis::infidelity::{infidelity, InfidelityConfig};
//! use pvqd_analysis::state::density_from_expectations;
//!
//! let mixed = density_from_expectations(0.0, 0.0, 0.0);
//! let trajectory = vec![mixed, mixed];
//! let value = infidelity(&trajectory, &trajectory, &InfidelityConfig::default());
//! assert!((value - 0.039375).abs() < 1e-12);
//! ```

pub mod config;
pub mod error;
pub mod infidelity;
pub mod pauli;
pub mod record;
pub mod report;
pub mod state;
pub mod study;
pub mod synthetic;

pub use config::{RunSpec, StudyConfig};
pub use error::{AnalysisError, AnalysisResult};
pub use infidelity::{Accumulation, InfidelityConfig};
pub use pauli::Matrix2;
pub use record::{ApproxRecord, ExactRecord, Observable};
pub use report::InfidelityReport;
pub use state::Trajectory;
pub use study::{Run, SeriesPoint, Study};
pub use synthetic::SyntheticStudy;
