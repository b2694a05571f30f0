//! Stacked time-series panels of Pauli expectations.
//!
//! Each panel overlays the exact trajectory (dashed black) with every run as
//! error-barred markers. A shared legend strip sits above the panels.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use pvqd_analysis::{Observable, Study};

use crate::Figure;
use crate::style::{
    CAP_WIDTH, LegendEntry, MARKER_SIZE, draw_legend_strip, linear_bounds, run_color, run_label,
};

/// Fixed y range of the expectation panels.
const Y_RANGE: (f64, f64) = (-1.1, 1.1);

/// Height of the legend strip in pixels.
const LEGEND_HEIGHT: u32 = 70;

/// Observables shown top to bottom.
pub const PANEL_AXES: [Observable; 2] = [Observable::X, Observable::Z];

/// Expectation values vs. time for the exact reference and every run.
pub struct ObservablesFigure<'a> {
    study: &'a Study,
    window: usize,
}

impl<'a> ObservablesFigure<'a> {
    /// Sx and Sz panels over the study's configured window.
    pub fn new(study: &'a Study) -> Self {
        Self {
            study,
            window: study.config().window,
        }
    }

    fn time_range(&self) -> (f64, f64) {
        let exact = self.study.exact().times.iter().take(self.window);
        let runs = self
            .study
            .runs()
            .iter()
            .flat_map(|r| r.record.times.iter().take(self.window));
        linear_bounds(exact.chain(runs).copied())
    }

    fn legend(&self) -> Vec<LegendEntry> {
        let mut entries = vec![LegendEntry::Line {
            label: "Exact".into(),
            color: BLACK,
        }];
        entries.extend(self.study.runs().iter().enumerate().map(|(i, run)| {
            LegendEntry::Marker {
                label: run_label(run.spec.shots),
                color: run_color(i),
            }
        }));
        entries
    }
}

impl Figure for ObservablesFigure<'_> {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;
        let (legend_area, body) = root.split_vertically(LEGEND_HEIGHT);
        draw_legend_strip(&legend_area, &self.legend(), 2)?;

        let (t_lo, t_hi) = self.time_range();
        let panels = body.split_evenly((2, 1));
        let last = panels.len() - 1;

        for (i, (panel, &axis)) in panels.iter().zip(PANEL_AXES.iter()).enumerate() {
            let mut chart = ChartBuilder::on(panel)
                .margin(10)
                .x_label_area_size(if i == last { 40 } else { 20 })
                .y_label_area_size(60)
                .build_cartesian_2d(t_lo..t_hi, Y_RANGE.0..Y_RANGE.1)?;

            chart
                .configure_mesh()
                .x_desc(if i == last { "t" } else { "" })
                .y_desc(format!("<{}>_1", axis.label()))
                .draw()?;

            chart.draw_series(DashedLineSeries::new(
                exact_points(self.study, axis, self.window),
                6,
                4,
                BLACK.stroke_width(1),
            ))?;

            for (k, run) in self.study.runs().iter().enumerate() {
                let color = run_color(k);
                let points = windowed_points(
                    &run.record.times,
                    run.record.expectation(axis),
                    run.record.error(axis),
                    self.window,
                );
                chart.draw_series(points.iter().map(|&(t, v, e)| {
                    ErrorBar::new_vertical(t, v - e, v, v + e, color.stroke_width(1), CAP_WIDTH)
                }))?;
                chart.draw_series(
                    points
                        .iter()
                        .map(|&(t, v, _)| Circle::new((t, v), MARKER_SIZE, color.filled())),
                )?;
            }
        }
        Ok(())
    }
}

/// Exact `(t, value)` pairs of one axis over the first `window` samples.
pub(crate) fn exact_points(study: &Study, axis: Observable, window: usize) -> Vec<(f64, f64)> {
    let exact = study.exact();
    exact
        .times
        .iter()
        .zip(exact.expectation(axis))
        .take(window)
        .map(|(&t, &v)| (t, v))
        .collect()
}

/// Zip times, values and (optional) error bars, keeping the first `window`
/// samples. Missing error bars draw as zero-height.
pub(crate) fn windowed_points(
    times: &[f64],
    values: &[f64],
    errors: Option<&[f64]>,
    window: usize,
) -> Vec<(f64, f64, f64)> {
    times
        .iter()
        .zip(values)
        .enumerate()
        .take(window)
        .map(|(i, (&t, &v))| {
            let e = errors.and_then(|errs| errs.get(i)).copied().unwrap_or(0.0);
            (t, v, e.abs())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windowed_points_truncates() {
        let times = [0.0, 0.1, 0.2, 0.3];
        let values = [1.0, 0.9, 0.8, 0.7];
        let errors = [0.01, -0.02, 0.03, 0.04];
        let points = windowed_points(&times, &values, Some(&errors), 2);
        assert_eq!(points, vec![(0.0, 1.0, 0.01), (0.1, 0.9, 0.02)]);
    }

    #[test]
    fn test_windowed_points_without_errors() {
        let points = windowed_points(&[0.0, 0.1], &[0.5, 0.4], None, 60);
        assert_eq!(points, vec![(0.0, 0.5, 0.0), (0.1, 0.4, 0.0)]);
    }
}
