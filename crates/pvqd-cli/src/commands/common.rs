//! Shared helpers for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use pvqd_analysis::{Accumulation, Study, StudyConfig};

/// Resolve the study configuration from an optional YAML file, environment
/// overrides and command-line overrides (highest precedence).
pub fn resolve_config(
    config_file: Option<&str>,
    data_dir: Option<&str>,
    accumulation: Option<&str>,
) -> Result<StudyConfig> {
    let mut config = StudyConfig::load(config_file.map(Path::new))
        .with_context(|| match config_file {
            Some(path) => format!("Failed to load config: {path}"),
            None => "Invalid configuration from environment".to_string(),
        })?;

    if let Some(dir) = data_dir {
        config.data_dir = dir.into();
    }
    if let Some(mode) = accumulation {
        config.accumulation = mode.parse::<Accumulation>().map_err(anyhow::Error::msg)?;
    }
    Ok(config)
}

/// Load every record of the study behind a spinner.
pub fn load_study(config: &StudyConfig) -> Result<Study> {
    let spinner = spinner(&format!(
        "Loading {} records from {}",
        config.runs.len() + 1,
        config.data_dir.display()
    ));
    let study = Study::load(config);
    spinner.finish_and_clear();
    study.with_context(|| format!("Failed to load study from {}", config.data_dir.display()))
}

/// Spinner for short blocking steps.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb
}
