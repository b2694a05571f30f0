//! Figures command implementation.
//!
//! `pvqd figures [--config <file>] [--data-dir <dir>] [--output <dir>] [--format png|svg]`
//!
//! Without `--output` the charts open in a window and nothing is written.

use console::style;
use tracing::debug;

use pvqd_plot::{ImageFormat, PlotConfig};

use super::common::{load_study, resolve_config, spinner};

/// Execute the figures command.
pub fn execute(
    config_file: Option<&str>,
    data_dir: Option<&str>,
    output: Option<&str>,
    format: &str,
    window: Option<usize>,
) -> anyhow::Result<()> {
    let mut config = resolve_config(config_file, data_dir, None)?;
    if let Some(window) = window {
        config.window = window;
    }
    let format: ImageFormat = format.parse().map_err(anyhow::Error::msg)?;

    let study = load_study(&config)?;

    let Some(output) = output else {
        debug!("No output directory given, showing charts on screen");
        pvqd_plot::show(&study)?;
        return Ok(());
    };

    let plot_config = PlotConfig {
        output_dir: output.into(),
        format,
        ..Default::default()
    };
    let pb = spinner("Rendering charts");
    let written = pvqd_plot::render_all(&study, &plot_config);
    pb.finish_and_clear();
    let written = written?;

    for path in &written {
        println!("{} {}", style("OK").green().bold(), path.display());
    }
    Ok(())
}
