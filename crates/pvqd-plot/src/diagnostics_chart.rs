//! Optimizer diagnostics of one run: iterations per step and step fidelity
//! deficits before and after optimization.

use plotters::coord::Shift;
use plotters::prelude::*;

use pvqd_analysis::Run;

use crate::Figure;
use crate::error::{PlotError, PlotResult};
use crate::style::{FONT_FAMILY, MARKER_SIZE, linear_bounds, log_bounds};

/// Two stacked panels for a single run.
pub struct DiagnosticsFigure<'a> {
    run: &'a Run,
    window: usize,
    deficit_range: (f64, f64),
}

impl<'a> DiagnosticsFigure<'a> {
    /// Prepare the chart for the first `window` samples of `run`.
    pub fn new(run: &'a Run, window: usize) -> PlotResult<Self> {
        let (before, after) = deficits(run, window);
        let deficit_range = log_bounds(before.iter().chain(&after).map(|p| p.1))
            .ok_or(PlotError::EmptySeries("optimizer infidelity"))?;
        Ok(Self {
            run,
            window,
            deficit_range,
        })
    }
}

impl Figure for DiagnosticsFigure<'_> {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;
        let record = &self.run.record;
        let panels = root.split_evenly((2, 1));

        let iterations: Vec<(f64, f64)> = record
            .times
            .iter()
            .zip(&record.iter_number)
            .take(self.window)
            .map(|(&t, &n)| (t, n))
            .collect();
        let (t_lo, t_hi) = linear_bounds(iterations.iter().map(|p| p.0));
        let (_, n_hi) = linear_bounds(iterations.iter().map(|p| p.1));

        let mut top = ChartBuilder::on(&panels[0])
            .caption(
                format!("Optimizer diagnostics | {} shots", self.run.spec.shots),
                (FONT_FAMILY, 20),
            )
            .margin(10)
            .x_label_area_size(20)
            .y_label_area_size(60)
            .build_cartesian_2d(t_lo..t_hi, 0.0..n_hi.max(1.0))?;
        top.configure_mesh()
            .y_desc("Optimization steps")
            .draw()?;
        top.draw_series(
            iterations
                .iter()
                .map(|&(t, n)| Circle::new((t, n), MARKER_SIZE, BLUE.filled())),
        )?;

        let (before, after) = deficits(self.run, self.window);
        let mut bottom = ChartBuilder::on(&panels[1])
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(
                t_lo..t_hi,
                (self.deficit_range.0..self.deficit_range.1).log_scale(),
            )?;
        bottom
            .configure_mesh()
            .x_desc("t")
            .y_desc("Infidelity")
            .y_label_formatter(&|y| format!("{y:.0e}"))
            .draw()?;
        bottom
            .draw_series(
                before
                    .iter()
                    .map(|&(t, d)| Circle::new((t, d), MARKER_SIZE, BLUE.filled())),
            )?
            .label("1 - F before optimization")
            .legend(|(x, y)| Circle::new((x, y), 3, BLUE.filled()));
        bottom
            .draw_series(
                after
                    .iter()
                    .map(|&(t, d)| Circle::new((t, d), MARKER_SIZE, RED.filled())),
            )?
            .label("1 - F after optimization")
            .legend(|(x, y)| Circle::new((x, y), 3, RED.filled()));
        bottom
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    }
}

/// `1 − init_F` and `1 − final_F` over the window, keeping only values a log
/// axis can show.
pub(crate) fn deficits(run: &Run, window: usize) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let record = &run.record;
    let series = |fidelities: &[f64]| -> Vec<(f64, f64)> {
        record
            .times
            .iter()
            .zip(fidelities)
            .take(window)
            .map(|(&t, &f)| (t, 1.0 - f))
            .filter(|&(_, d)| d > 0.0 && d.is_finite())
            .collect()
    };
    (series(&record.init_f), series(&record.final_f))
}
