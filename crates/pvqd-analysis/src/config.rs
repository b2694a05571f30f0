//! Study configuration.
//!
//! A study names the data directory, the exact reference file and the pVQD
//! runs to compare against it. Configuration is resolved as:
//!
//! 1. YAML file, when one is given (otherwise built-in defaults)
//! 2. Environment overrides (`PVQD_` prefix)
//! 3. Validation

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{AnalysisError, AnalysisResult};
use crate::infidelity::{Accumulation, DEFAULT_DT, InfidelityConfig};

/// Shot counts of the reference data set.
pub const DEFAULT_SHOTS: [u32; 4] = [80, 800, 8000, 80000];

/// Measurement budget per shot in the reference data set.
pub const SAMPLES_PER_SHOT: f64 = 1250.0;

/// One pVQD run of the study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSpec {
    /// Shots per expectation value.
    pub shots: u32,
    /// Total samples spent by the run (x axis of the infidelity chart).
    #[serde(default)]
    pub samples: Option<f64>,
    /// File name relative to the data directory; defaults to
    /// `trial_results_shots_{shots}.dat`.
    #[serde(default)]
    pub file: Option<String>,
}

impl RunSpec {
    /// A run with the default file name and sample budget.
    pub fn new(shots: u32) -> Self {
        Self {
            shots,
            samples: None,
            file: None,
        }
    }

    /// Sample budget, falling back to `shots × 1250`.
    pub fn samples(&self) -> f64 {
        self.samples
            .unwrap_or_else(|| f64::from(self.shots) * SAMPLES_PER_SHOT)
    }

    /// File name of the run's record.
    pub fn file_name(&self) -> String {
        self.file
            .clone()
            .unwrap_or_else(|| format!("trial_results_shots_{}.dat", self.shots))
    }
}

/// Complete study configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Directory holding the record files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Exact reference file name, relative to `data_dir`.
    #[serde(default = "default_exact_file")]
    pub exact_file: String,

    /// pVQD runs, in increasing shot order.
    #[serde(default = "default_runs")]
    pub runs: Vec<RunSpec>,

    /// Time-step width used by the infidelity fold.
    #[serde(default = "default_dt")]
    pub dt: f64,

    /// Infidelity fold rule.
    #[serde(default)]
    pub accumulation: Accumulation,

    /// Number of leading samples shown in the time-series charts.
    #[serde(default = "default_window")]
    pub window: usize,

    /// Shot count of the run shown in the optimizer diagnostics chart.
    #[serde(default = "default_diagnostics_shots")]
    pub diagnostics_shots: u32,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_exact_file() -> String {
    "exact_result_J0.25_B1.dat".into()
}

fn default_runs() -> Vec<RunSpec> {
    DEFAULT_SHOTS.iter().map(|&s| RunSpec::new(s)).collect()
}

fn default_dt() -> f64 {
    DEFAULT_DT
}

fn default_window() -> usize {
    60
}

fn default_diagnostics_shots() -> u32 {
    800
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            exact_file: default_exact_file(),
            runs: default_runs(),
            dt: default_dt(),
            accumulation: Accumulation::default(),
            window: default_window(),
            diagnostics_shots: default_diagnostics_shots(),
        }
    }
}

impl StudyConfig {
    /// Parse a YAML configuration.
    pub fn from_yaml(source: &str) -> AnalysisResult<Self> {
        let config: StudyConfig =
            serde_yaml_ng::from_str(source).map_err(|e| AnalysisError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> AnalysisResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&contents)
    }

    /// Load the file (or defaults), then apply environment overrides.
    pub fn load(config_file: Option<&Path>) -> AnalysisResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.merge_env_with(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply `PVQD_*` overrides read through `lookup`.
    ///
    /// Only variables that are set override the current values; unparseable
    /// values are skipped with a warning.
    pub fn merge_env_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PVQD_DATA_DIR") {
            self.data_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("PVQD_DT") {
            match v.parse() {
                Ok(dt) => self.dt = dt,
                Err(_) => warn!("Ignoring PVQD_DT={v}: not a number"),
            }
        }
        if let Some(v) = lookup("PVQD_ACCUMULATION") {
            match v.parse() {
                Ok(mode) => self.accumulation = mode,
                Err(e) => warn!("Ignoring PVQD_ACCUMULATION: {e}"),
            }
        }
        if let Some(v) = lookup("PVQD_WINDOW") {
            match v.parse() {
                Ok(window) => self.window = window,
                Err(_) => warn!("Ignoring PVQD_WINDOW={v}: not a count"),
            }
        }
        self
    }

    /// Reject configurations the pipeline cannot run.
    pub fn validate(&self) -> AnalysisResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(AnalysisError::Config(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        if self.runs.is_empty() {
            return Err(AnalysisError::Config("at least one run is required".into()));
        }
        let mut seen = BTreeSet::new();
        for run in &self.runs {
            if !seen.insert(run.shots) {
                return Err(AnalysisError::Config(format!(
                    "duplicate run with {} shots",
                    run.shots
                )));
            }
        }
        if let Some(run) = self.runs.iter().find(|r| r.shots == 0) {
            return Err(AnalysisError::Config(format!(
                "run '{}' has zero shots",
                run.file_name()
            )));
        }
        Ok(())
    }

    /// Path of the exact reference record.
    pub fn exact_path(&self) -> PathBuf {
        self.data_dir.join(&self.exact_file)
    }

    /// Path of a run's record.
    pub fn run_path(&self, run: &RunSpec) -> PathBuf {
        self.data_dir.join(run.file_name())
    }

    /// Infidelity parameters of this study.
    pub fn infidelity(&self) -> InfidelityConfig {
        InfidelityConfig {
            dt: self.dt,
            accumulation: self.accumulation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_reference_data_set() {
        let config = StudyConfig::default();
        assert_eq!(config.runs.len(), 4);
        assert_eq!(config.exact_path(), Path::new("data/exact_result_J0.25_B1.dat"));
        assert_eq!(
            config.run_path(&config.runs[1]),
            Path::new("data/trial_results_shots_800.dat")
        );
        let samples: Vec<f64> = config.runs.iter().map(RunSpec::samples).collect();
        assert_eq!(samples, vec![1e5, 1e6, 1e7, 1e8]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial_override() {
        let yaml = r"
data_dir: /tmp/pvqd
accumulation: riemann
runs:
  - shots: 100
    samples: 5000
  - shots: 1000
    file: custom.json
";
        let config = StudyConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/pvqd"));
        assert_eq!(config.accumulation, Accumulation::Riemann);
        assert_eq!(config.dt, DEFAULT_DT);
        assert_eq!(config.window, 60);
        assert_eq!(config.runs[0].samples(), 5000.0);
        assert_eq!(config.runs[1].file_name(), "custom.json");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("PVQD_DATA_DIR", "/data/run7"),
            ("PVQD_DT", "0.1"),
            ("PVQD_ACCUMULATION", "riemann"),
            ("PVQD_WINDOW", "many"),
        ]
        .into_iter()
        .collect();
        let config = StudyConfig::default()
            .merge_env_with(|k| env.get(k).map(|v| (*v).to_string()));
        assert_eq!(config.data_dir, PathBuf::from("/data/run7"));
        assert_eq!(config.dt, 0.1);
        assert_eq!(config.accumulation, Accumulation::Riemann);
        // Unparseable value leaves the default in place.
        assert_eq!(config.window, 60);
    }

    #[test]
    fn test_validation_rejects_bad_dt() {
        let config = StudyConfig {
            dt: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AnalysisError::Config(_))));
    }

    #[test]
    fn test_validation_rejects_empty_runs() {
        let err = StudyConfig::from_yaml("runs: []").unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));
    }
}
