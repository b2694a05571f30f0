//! Error types for chart rendering.

use thiserror::Error;

/// Errors produced while rendering charts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlotError {
    /// The output directory could not be created.
    #[error("I/O error: {0}")]
    Io(String),

    /// The drawing backend failed.
    #[error("Render error: {0}")]
    Render(String),

    /// The on-screen viewer could not be opened or failed while running.
    #[error("Viewer error: {0}")]
    Viewer(String),

    /// A chart has nothing drawable (e.g. no positive values on a log axis).
    #[error("Nothing to draw for {0}")]
    EmptySeries(&'static str),

    /// The study does not contain what the chart needs.
    #[error("Analysis error: {0}")]
    Analysis(#[from] pvqd_analysis::AnalysisError),
}

/// Result type for rendering operations.
pub type PlotResult<T> = Result<T, PlotError>;
