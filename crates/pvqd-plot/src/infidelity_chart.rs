//! Log-log chart of infidelity against sample count.

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::warn;

use pvqd_analysis::SeriesPoint;

use crate::Figure;
use crate::error::{PlotError, PlotResult};
use crate::style::{FONT_FAMILY, MARKER_SIZE, log_bounds};

/// Infidelity vs. samples, one point per run.
pub struct InfidelityFigure {
    points: Vec<(f64, f64)>,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl InfidelityFigure {
    /// Prepare the chart. Points that cannot sit on a log axis are dropped.
    pub fn new(series: &[SeriesPoint]) -> PlotResult<Self> {
        let points = loglog_points(series);
        if points.len() < series.len() {
            warn!(
                "Skipping {} non-positive point(s) on the log-log infidelity chart",
                series.len() - points.len()
            );
        }
        let x_range = log_bounds(points.iter().map(|p| p.0))
            .ok_or(PlotError::EmptySeries("infidelity vs. samples"))?;
        let y_range = log_bounds(points.iter().map(|p| p.1))
            .ok_or(PlotError::EmptySeries("infidelity vs. samples"))?;
        Ok(Self {
            points,
            x_range,
            y_range,
        })
    }

    /// Points that will be drawn, as (samples, infidelity).
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}

impl Figure for InfidelityFigure {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(root)
            .caption("Infidelity vs. samples", (FONT_FAMILY, 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(
                (self.x_range.0..self.x_range.1).log_scale(),
                (self.y_range.0..self.y_range.1).log_scale(),
            )?;

        chart
            .configure_mesh()
            .x_desc("Samples")
            .y_desc("Delta_F(T)")
            .x_label_formatter(&|x| format!("{x:.0e}"))
            .y_label_formatter(&|y| format!("{y:.0e}"))
            .draw()?;

        chart.draw_series(LineSeries::new(self.points.clone(), &BLUE))?;
        chart.draw_series(
            self.points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), MARKER_SIZE, BLUE.filled())),
        )?;
        Ok(())
    }
}

fn loglog_points(series: &[SeriesPoint]) -> Vec<(f64, f64)> {
    series
        .iter()
        .filter(|p| p.samples > 0.0 && p.infidelity > 0.0 && p.infidelity.is_finite())
        .map(|p| (p.samples, p.infidelity))
        .collect()
}
