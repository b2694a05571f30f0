//! Trajectory records as written by the simulation runs.
//!
//! Each record is a JSON object of named, equally long arrays indexed by
//! time sample. The exact reference carries bare `Sx`/`Sy`/`Sz`; the pVQD
//! runs carry the qubit-0 expectations (`Sx_0`, ...) together with their
//! shot-noise error bars and per-step optimizer diagnostics.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AnalysisError, AnalysisResult};

/// Spin axis of a single-qubit Pauli observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Observable {
    /// σx.
    X,
    /// σy.
    Y,
    /// σz.
    Z,
}

impl Observable {
    /// Short label used in chart axes and tables.
    pub fn label(self) -> &'static str {
        match self {
            Observable::X => "Sx",
            Observable::Y => "Sy",
            Observable::Z => "Sz",
        }
    }
}

/// Exact reference trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExactRecord {
    /// Sample times.
    pub times: Vec<f64>,
    /// ⟨σx⟩ per sample.
    #[serde(rename = "Sx")]
    pub sx: Vec<f64>,
    /// ⟨σy⟩ per sample.
    #[serde(rename = "Sy")]
    pub sy: Vec<f64>,
    /// ⟨σz⟩ per sample.
    #[serde(rename = "Sz")]
    pub sz: Vec<f64>,
}

impl ExactRecord {
    /// Parse an exact record from JSON text.
    pub fn from_json(source: &str, origin: &str) -> AnalysisResult<Self> {
        let record: Self = serde_json::from_str(source).map_err(|e| AnalysisError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        record.validate()?;
        Ok(record)
    }

    /// Read and parse an exact record file.
    pub fn from_file(path: &Path) -> AnalysisResult<Self> {
        let source = read_record(path)?;
        Self::from_json(&source, &path.display().to_string())
    }

    /// Check that every array has as many entries as `times`.
    pub fn validate(&self) -> AnalysisResult<()> {
        let n = self.times.len();
        check_len("Sx", n, self.sx.len())?;
        check_len("Sy", n, self.sy.len())?;
        check_len("Sz", n, self.sz.len())
    }

    /// Number of time samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True if the record holds no samples.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Expectation values along one axis.
    pub fn expectation(&self, axis: Observable) -> &[f64] {
        match axis {
            Observable::X => &self.sx,
            Observable::Y => &self.sy,
            Observable::Z => &self.sz,
        }
    }
}

/// Trajectory estimated by a pVQD run at a fixed shot count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproxRecord {
    /// Sample times.
    pub times: Vec<f64>,
    /// ⟨σx⟩ of qubit 0 per sample.
    #[serde(rename = "Sx_0")]
    pub sx: Vec<f64>,
    /// ⟨σy⟩ of qubit 0 per sample.
    #[serde(rename = "Sy_0")]
    pub sy: Vec<f64>,
    /// ⟨σz⟩ of qubit 0 per sample.
    #[serde(rename = "Sz_0")]
    pub sz: Vec<f64>,
    /// Shot-noise error bar on ⟨σx⟩.
    #[serde(rename = "err_Sx_0")]
    pub err_sx: Vec<f64>,
    /// Shot-noise error bar on ⟨σy⟩; older runs did not record it.
    #[serde(rename = "err_Sy_0", default)]
    pub err_sy: Vec<f64>,
    /// Shot-noise error bar on ⟨σz⟩.
    #[serde(rename = "err_Sz_0")]
    pub err_sz: Vec<f64>,
    /// Optimizer iterations spent on each time step.
    pub iter_number: Vec<f64>,
    /// Step fidelity before optimization.
    #[serde(rename = "init_F")]
    pub init_f: Vec<f64>,
    /// Step fidelity after optimization.
    #[serde(rename = "final_F")]
    pub final_f: Vec<f64>,
}

impl ApproxRecord {
    /// Parse a pVQD record from JSON text.
    pub fn from_json(source: &str, origin: &str) -> AnalysisResult<Self> {
        let record: Self = serde_json::from_str(source).map_err(|e| AnalysisError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        record.validate()?;
        Ok(record)
    }

    /// Read and parse a pVQD record file.
    pub fn from_file(path: &Path) -> AnalysisResult<Self> {
        let source = read_record(path)?;
        Self::from_json(&source, &path.display().to_string())
    }

    /// Check that every array has as many entries as `times`.
    ///
    /// `err_Sy_0` is only checked when present. The optimizer diagnostics
    /// (`iter_number`, `init_F`, `final_F`) are recorded once per step and
    /// may be one entry short.
    pub fn validate(&self) -> AnalysisResult<()> {
        let n = self.times.len();
        check_len("Sx_0", n, self.sx.len())?;
        check_len("Sy_0", n, self.sy.len())?;
        check_len("Sz_0", n, self.sz.len())?;
        check_len("err_Sx_0", n, self.err_sx.len())?;
        if !self.err_sy.is_empty() {
            check_len("err_Sy_0", n, self.err_sy.len())?;
        }
        check_len("err_Sz_0", n, self.err_sz.len())?;
        check_step_len("iter_number", n, self.iter_number.len())?;
        check_step_len("init_F", n, self.init_f.len())?;
        check_step_len("final_F", n, self.final_f.len())
    }

    /// Number of time samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True if the record holds no samples.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Expectation values along one axis.
    pub fn expectation(&self, axis: Observable) -> &[f64] {
        match axis {
            Observable::X => &self.sx,
            Observable::Y => &self.sy,
            Observable::Z => &self.sz,
        }
    }

    /// Error bars along one axis, or `None` if the run did not record them.
    pub fn error(&self, axis: Observable) -> Option<&[f64]> {
        let errors = match axis {
            Observable::X => &self.err_sx,
            Observable::Y => &self.err_sy,
            Observable::Z => &self.err_sz,
        };
        if errors.is_empty() && !self.is_empty() {
            None
        } else {
            Some(errors)
        }
    }

    /// Total optimizer iterations over the whole run.
    pub fn total_iterations(&self) -> f64 {
        self.iter_number.iter().sum()
    }
}

fn read_record(path: &Path) -> AnalysisResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| AnalysisError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

fn check_len(field: &'static str, expected: usize, found: usize) -> AnalysisResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(AnalysisError::LengthMismatch {
            field,
            expected,
            found,
        })
    }
}

fn check_step_len(field: &'static str, samples: usize, found: usize) -> AnalysisResult<()> {
    if found + 1 == samples {
        Ok(())
    } else {
        check_len(field, samples, found)
    }
}
