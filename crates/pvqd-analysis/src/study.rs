//! Eager loading of a study and the infidelity-vs-samples series.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{RunSpec, StudyConfig};
use crate::error::{AnalysisError, AnalysisResult};
use crate::infidelity::infidelity;
use crate::record::{ApproxRecord, ExactRecord};
use crate::state::{approx_trajectory, exact_trajectory};

/// A loaded pVQD run.
#[derive(Debug, Clone)]
pub struct Run {
    /// How the run was configured.
    pub spec: RunSpec,
    /// Parsed record.
    pub record: ApproxRecord,
}

/// One point of the infidelity-vs-samples series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Shots per expectation value.
    pub shots: u32,
    /// Total samples spent by the run.
    pub samples: f64,
    /// Folded infidelity against the exact trajectory.
    pub infidelity: f64,
}

/// The exact reference plus every configured run, fully loaded.
#[derive(Debug, Clone)]
pub struct Study {
    config: StudyConfig,
    exact: ExactRecord,
    runs: Vec<Run>,
}

impl Study {
    /// Load every record named by `config`.
    ///
    /// All files are read before anything is computed; the first failure
    /// aborts the load.
    pub fn load(config: &StudyConfig) -> AnalysisResult<Self> {
        let exact_path = config.exact_path();
        info!("Loading exact reference from {}", exact_path.display());
        let exact = ExactRecord::from_file(&exact_path)?;

        let mut runs = Vec::with_capacity(config.runs.len());
        for spec in &config.runs {
            let path = config.run_path(spec);
            debug!("Loading {}-shot run from {}", spec.shots, path.display());
            let record = ApproxRecord::from_file(&path)?;
            runs.push(Run {
                spec: spec.clone(),
                record,
            });
        }

        info!(
            "Loaded exact reference ({} samples) and {} runs",
            exact.len(),
            runs.len()
        );
        Ok(Self::from_records(config.clone(), exact, runs))
    }

    /// Assemble a study from records already in memory.
    pub fn from_records(config: StudyConfig, exact: ExactRecord, runs: Vec<Run>) -> Self {
        Self {
            config,
            exact,
            runs,
        }
    }

    /// Configuration the study was loaded with.
    pub fn config(&self) -> &StudyConfig {
        &self.config
    }

    /// Exact reference record.
    pub fn exact(&self) -> &ExactRecord {
        &self.exact
    }

    /// All runs, in configured order.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// The run with the given shot count.
    pub fn run(&self, shots: u32) -> AnalysisResult<&Run> {
        self.runs
            .iter()
            .find(|r| r.spec.shots == shots)
            .ok_or(AnalysisError::UnknownRun(shots))
    }

    /// Infidelity of every run against the exact trajectory.
    pub fn infidelity_series(&self) -> Vec<SeriesPoint> {
        let exact = exact_trajectory(&self.exact);
        let params = self.config.infidelity();

        self.runs
            .iter()
            .map(|run| {
                let approx = approx_trajectory(&run.record);
                let value = infidelity(&approx, &exact, &params);
                debug!(
                    "{} shots: {} steps compared, infidelity {value:.6e}",
                    run.spec.shots,
                    approx.len().min(exact.len()),
                );
                SeriesPoint {
                    shots: run.spec.shots,
                    samples: run.spec.samples(),
                    infidelity: value,
                }
            })
            .collect()
    }
}
