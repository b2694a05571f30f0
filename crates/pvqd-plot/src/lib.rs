//! `pvqd-plot`: chart rendering for pVQD shot-noise studies.
//!
//! Three independent chart groups are drawn from a loaded
//! [`pvqd_analysis::Study`]:
//!
//! - **Infidelity vs. samples** (log-log), one point per run
//! - **Observables**: stacked Sx / Sz panels, exact curve against every run
//! - **Diagnostics**: optimizer iterations and step fidelity deficits of one
//!   run
//!
//! The charts are shown on screen by [`viewer::show`]. Every chart also
//! implements [`Figure`] and can be exported to PNG or SVG with
//! [`render_all`].

pub mod diagnostics_chart;
pub mod error;
pub mod infidelity_chart;
pub mod observables_chart;
pub mod style;
pub mod viewer;

pub use diagnostics_chart::DiagnosticsFigure;
pub use error::{PlotError, PlotResult};
pub use infidelity_chart::InfidelityFigure;
pub use observables_chart::ObservablesFigure;
pub use viewer::{ViewerData, show};

use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use pvqd_analysis::Study;

/// A chart that can be drawn on any plotters backend.
pub trait Figure {
    /// Draw the full chart onto `root`.
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>;
}

/// Output image format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Raster image via the bitmap backend.
    #[default]
    Png,
    /// Vector image.
    Svg,
}

impl ImageFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(format!("Unknown image format '{other}'. Available: png, svg")),
        }
    }
}

/// Where and how charts are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Directory receiving the images.
    pub output_dir: PathBuf,
    /// Image format.
    pub format: ImageFormat,
    /// Image size in pixels.
    pub size: (u32, u32),
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("target/plots"),
            format: ImageFormat::Png,
            size: (1200, 900),
        }
    }
}

impl PlotConfig {
    /// Output path of a chart called `stem`.
    pub fn path_for(&self, stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{stem}.{}", self.format.extension()))
    }
}

/// Render `figure` into a single image file.
pub fn render<F: Figure>(
    figure: &F,
    path: &Path,
    format: ImageFormat,
    size: (u32, u32),
) -> PlotResult<()> {
    style::register_fonts()?;
    match format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            figure.draw(&root).map_err(render_error)?;
            root.present().map_err(render_error)
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            figure.draw(&root).map_err(render_error)?;
            root.present().map_err(render_error)
        }
    }
}

fn render_error(e: impl fmt::Display) -> PlotError {
    PlotError::Render(e.to_string())
}

/// Render all three chart groups of `study`. Returns the written paths.
///
/// All three figures are prepared before anything is written, so a study
/// that cannot be charted leaves the output directory untouched.
pub fn render_all(study: &Study, config: &PlotConfig) -> PlotResult<Vec<PathBuf>> {
    let study_config = study.config();
    let series = study.infidelity_series();
    let infidelity = InfidelityFigure::new(&series)?;
    let observables = ObservablesFigure::new(study);
    let run = study.run(study_config.diagnostics_shots)?;
    let diagnostics = DiagnosticsFigure::new(run, study_config.window)?;

    std::fs::create_dir_all(&config.output_dir).map_err(|e| {
        PlotError::Io(format!(
            "Failed to create {}: {}",
            config.output_dir.display(),
            e
        ))
    })?;

    let targets = [
        config.path_for("infidelity_vs_samples"),
        config.path_for("observables"),
        config.path_for("diagnostics"),
    ];
    render(&infidelity, &targets[0], config.format, config.size)?;
    info!("Wrote {}", targets[0].display());
    render(&observables, &targets[1], config.format, config.size)?;
    info!("Wrote {}", targets[1].display());
    render(&diagnostics, &targets[2], config.format, config.size)?;
    info!("Wrote {}", targets[2].display());

    Ok(targets.to_vec())
}
