//! Infidelity report and its JSON export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AnalysisError, AnalysisResult};
use crate::infidelity::Accumulation;
use crate::study::{SeriesPoint, Study};

/// Current report schema.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Infidelity-vs-samples series with the parameters that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfidelityReport {
    /// Schema version for forward compatibility.
    pub schema_version: String,
    /// When the report was generated.
    pub timestamp: DateTime<Utc>,
    /// Directory the records were loaded from.
    pub data_dir: String,
    /// Time-step width.
    pub dt: f64,
    /// Fold rule.
    pub accumulation: Accumulation,
    /// One point per run.
    pub points: Vec<SeriesPoint>,
}

impl InfidelityReport {
    /// Compute the series of `study` and wrap it in a report.
    pub fn from_study(study: &Study) -> Self {
        let config = study.config();
        Self {
            schema_version: SCHEMA_VERSION.into(),
            timestamp: Utc::now(),
            data_dir: config.data_dir.display().to_string(),
            dt: config.dt,
            accumulation: config.accumulation,
            points: study.infidelity_series(),
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self, pretty: bool) -> AnalysisResult<String> {
        if pretty {
            serde_json::to_string_pretty(self).map_err(AnalysisError::from)
        } else {
            serde_json::to_string(self).map_err(AnalysisError::from)
        }
    }

    /// Write the pretty-printed report to `path`.
    pub fn to_file(&self, path: &Path) -> AnalysisResult<()> {
        let json = self.to_json(true)?;
        std::fs::write(path, json)
            .map_err(|e| AnalysisError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let report = InfidelityReport {
            schema_version: SCHEMA_VERSION.into(),
            timestamp: Utc::now(),
            data_dir: "data".into(),
            dt: 0.05,
            accumulation: Accumulation::Compounding,
            points: vec![SeriesPoint {
                shots: 80,
                samples: 1e5,
                infidelity: 1e-3,
            }],
        };
        let json = report.to_json(false).unwrap();
        assert!(json.contains("\"schema_version\":\"0.1.0\""));
        assert!(json.contains("\"accumulation\":\"compounding\""));
        assert!(json.contains("\"shots\":80"));
    }
}
