//! Synth command implementation.
//!
//! `pvqd synth --output <dir> [--steps N] [--seed S]` writes a synthetic
//! study in the record format the other commands read.

use console::style;

use pvqd_analysis::SyntheticStudy;

use super::common::resolve_config;

/// Execute the synth command.
pub fn execute(
    config_file: Option<&str>,
    output: &str,
    steps: usize,
    seed: u64,
) -> anyhow::Result<()> {
    if steps == 0 {
        anyhow::bail!("--steps must be at least 1");
    }
    let config = resolve_config(config_file, Some(output), None)?;

    SyntheticStudy::new(steps, config.dt).write_data_set(&config, seed)?;

    println!(
        "{} Wrote exact reference and {} runs ({} samples each) to {}",
        style("OK").green().bold(),
        config.runs.len(),
        steps,
        config.data_dir.display()
    );
    Ok(())
}
