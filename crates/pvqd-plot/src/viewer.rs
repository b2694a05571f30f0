//! On-screen chart windows.
//!
//! [`show`] opens one native window with a tab per chart group: infidelity
//! vs. samples, the observable panels and the optimizer diagnostics. Nothing
//! is written to disk. The series are prepared up front as [`ViewerData`],
//! so everything the window draws can be checked without a display.

use eframe::egui::{self, Color32};
use egui_plot::{Corner, Legend, Line, LineStyle, MarkerShape, Plot, Points};
use plotters::style::RGBColor;
use tracing::info;

use pvqd_analysis::{Observable, Study};

use crate::diagnostics_chart::deficits;
use crate::error::{PlotError, PlotResult};
use crate::infidelity_chart::InfidelityFigure;
use crate::observables_chart::{PANEL_AXES, exact_points, windowed_points};
use crate::style::{run_color, run_label};

const WINDOW_SIZE: [f32; 2] = [1200.0, 900.0];

/// Markers of one run on an observable panel.
#[derive(Debug, Clone)]
pub struct RunMarkers {
    pub label: String,
    pub color: Color32,
    /// `[t, value]` per sample.
    pub points: Vec<[f64; 2]>,
    /// Vertical error bar per sample, bottom then top.
    pub bars: Vec<[[f64; 2]; 2]>,
}

/// One observable panel: the exact curve and every run.
#[derive(Debug, Clone)]
pub struct ObservablePanel {
    pub axis: Observable,
    pub exact: Vec<[f64; 2]>,
    pub runs: Vec<RunMarkers>,
}

/// Optimizer diagnostics of the configured run.
#[derive(Debug, Clone)]
pub struct DiagnosticsPanels {
    pub shots: u32,
    /// `[t, iterations]` per step.
    pub iterations: Vec<[f64; 2]>,
    /// `[t, log10(1 - init_F)]`.
    pub before: Vec<[f64; 2]>,
    /// `[t, log10(1 - final_F)]`.
    pub after: Vec<[f64; 2]>,
}

/// Everything the viewer draws, in plot coordinates.
///
/// Log axes are stored as log10 values since egui_plot axes are linear.
#[derive(Debug, Clone)]
pub struct ViewerData {
    pub title: String,
    /// `[log10(samples), log10(infidelity)]` per run.
    pub infidelity: Vec<[f64; 2]>,
    pub observables: Vec<ObservablePanel>,
    pub diagnostics: DiagnosticsPanels,
}

impl ViewerData {
    /// Prepare all three chart groups. Fails on the same conditions as the
    /// file export: an empty log-log series, an unknown diagnostics run or
    /// no drawable fidelity deficits.
    pub fn from_study(study: &Study) -> PlotResult<Self> {
        let config = study.config();
        let window = config.window;

        let infidelity = InfidelityFigure::new(&study.infidelity_series())?
            .points()
            .iter()
            .map(|&(s, f)| [s.log10(), f.log10()])
            .collect();

        let observables = PANEL_AXES
            .iter()
            .map(|&axis| observable_panel(study, axis, window))
            .collect();

        let run = study.run(config.diagnostics_shots)?;
        let (before, after) = deficits(run, window);
        if before.is_empty() && after.is_empty() {
            return Err(PlotError::EmptySeries("optimizer infidelity"));
        }
        let record = &run.record;
        let diagnostics = DiagnosticsPanels {
            shots: run.spec.shots,
            iterations: record
                .times
                .iter()
                .zip(&record.iter_number)
                .take(window)
                .map(|(&t, &n)| [t, n])
                .collect(),
            before: log10_points(&before),
            after: log10_points(&after),
        };

        Ok(Self {
            title: format!("pVQD shot-noise study | {}", config.data_dir.display()),
            infidelity,
            observables,
            diagnostics,
        })
    }
}

fn observable_panel(study: &Study, axis: Observable, window: usize) -> ObservablePanel {
    let runs = study
        .runs()
        .iter()
        .enumerate()
        .map(|(i, run)| {
            let samples = windowed_points(
                &run.record.times,
                run.record.expectation(axis),
                run.record.error(axis),
                window,
            );
            RunMarkers {
                label: run_label(run.spec.shots),
                color: egui_color(run_color(i)),
                points: samples.iter().map(|&(t, v, _)| [t, v]).collect(),
                bars: samples
                    .iter()
                    .map(|&(t, v, e)| [[t, v - e], [t, v + e]])
                    .collect(),
            }
        })
        .collect();
    ObservablePanel {
        axis,
        exact: exact_points(study, axis, window)
            .into_iter()
            .map(|(t, v)| [t, v])
            .collect(),
        runs,
    }
}

fn log10_points(points: &[(f64, f64)]) -> Vec<[f64; 2]> {
    points.iter().map(|&(t, d)| [t, d.log10()]).collect()
}

/// The exported charts' palette, for egui.
pub fn egui_color(color: RGBColor) -> Color32 {
    Color32::from_rgb(color.0, color.1, color.2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Infidelity,
    Observables,
    Diagnostics,
}

/// The chart window.
pub struct StudyViewer {
    data: ViewerData,
    tab: Tab,
}

impl StudyViewer {
    pub fn new(cc: &eframe::CreationContext<'_>, data: ViewerData) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self {
            data,
            tab: Tab::Infidelity,
        }
    }

    fn infidelity_ui(&self, ui: &mut egui::Ui) {
        Plot::new("infidelity_vs_samples")
            .x_axis_label("Samples")
            .y_axis_label("Infidelity")
            .x_axis_formatter(|mark, _| format!("{:.0e}", 10f64.powf(mark.value)))
            .y_axis_formatter(|mark, _| format!("{:.0e}", 10f64.powf(mark.value)))
            .label_formatter(|_, value| {
                format!(
                    "samples = {:.3e}\ninfidelity = {:.3e}",
                    10f64.powf(value.x),
                    10f64.powf(value.y)
                )
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(self.data.infidelity.clone())
                        .color(Color32::BLACK)
                        .width(1.0),
                );
                plot_ui.points(
                    Points::new(self.data.infidelity.clone())
                        .color(Color32::BLACK)
                        .radius(4.0)
                        .shape(MarkerShape::Circle),
                );
            });
    }

    fn observables_ui(&self, ui: &mut egui::Ui) {
        let panels = self.data.observables.len().max(1) as f32;
        let height = (ui.available_height() - ui.spacing().item_spacing.y * panels) / panels;
        for panel in &self.data.observables {
            Plot::new(("observable", panel.axis.label()))
                .height(height)
                .x_axis_label("t")
                .y_axis_label(format!("<{}>_1", panel.axis.label()))
                .include_y(-1.1)
                .include_y(1.1)
                .legend(Legend::default().position(Corner::RightTop))
                .show(ui, |plot_ui| {
                    plot_ui.line(
                        Line::new(panel.exact.clone())
                            .color(Color32::BLACK)
                            .width(1.0)
                            .style(LineStyle::dashed_loose())
                            .name("Exact"),
                    );
                    for run in &panel.runs {
                        for bar in &run.bars {
                            plot_ui.line(Line::new(bar.to_vec()).color(run.color).width(1.0));
                        }
                        plot_ui.points(
                            Points::new(run.points.clone())
                                .color(run.color)
                                .radius(3.0)
                                .shape(MarkerShape::Circle)
                                .name(&run.label),
                        );
                    }
                });
        }
    }

    fn diagnostics_ui(&self, ui: &mut egui::Ui) {
        let diagnostics = &self.data.diagnostics;
        let height = (ui.available_height() - ui.spacing().item_spacing.y * 2.0) / 2.0;
        ui.label(format!("Optimizer diagnostics | {} shots", diagnostics.shots));
        Plot::new("diagnostics_iterations")
            .height(height)
            .y_axis_label("Optimization steps")
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(diagnostics.iterations.clone())
                        .color(Color32::BLUE)
                        .radius(3.0),
                );
            });
        Plot::new("diagnostics_deficits")
            .height(height)
            .x_axis_label("t")
            .y_axis_label("Infidelity")
            .y_axis_formatter(|mark, _| format!("{:.0e}", 10f64.powf(mark.value)))
            .legend(Legend::default().position(Corner::RightTop))
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(diagnostics.before.clone())
                        .color(Color32::BLUE)
                        .radius(3.0)
                        .name("1 - F before optimization"),
                );
                plot_ui.points(
                    Points::new(diagnostics.after.clone())
                        .color(Color32::RED)
                        .radius(3.0)
                        .name("1 - F after optimization"),
                );
            });
    }
}

impl eframe::App for StudyViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Infidelity, "Infidelity vs. samples");
                ui.selectable_value(&mut self.tab, Tab::Observables, "Observables");
                ui.selectable_value(&mut self.tab, Tab::Diagnostics, "Optimizer diagnostics");
            });
        });
        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Infidelity => self.infidelity_ui(ui),
            Tab::Observables => self.observables_ui(ui),
            Tab::Diagnostics => self.diagnostics_ui(ui),
        });
    }
}

/// Show the study's charts on screen. Blocks until the window is closed.
pub fn show(study: &Study) -> PlotResult<()> {
    let data = ViewerData::from_study(study)?;
    info!("Opening chart window for {} run(s)", study.runs().len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_title(data.title.clone()),
        ..Default::default()
    };
    eframe::run_native(
        "pvqd",
        options,
        Box::new(move |cc| Ok(Box::new(StudyViewer::new(cc, data)))),
    )
    .map_err(|e| PlotError::Viewer(e.to_string()))
}
