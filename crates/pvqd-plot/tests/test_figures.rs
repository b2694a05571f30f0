//! Chart preparation and drawing against a synthetic study.
//!
//! Figures are drawn into in-memory SVG and bitmap buffers with the bundled
//! font, so no system fonts or display are needed.

use plotters::prelude::*;

use pvqd_analysis::synthetic::SyntheticStudy;
use pvqd_analysis::{AnalysisError, Observable, Study, StudyConfig};
use pvqd_plot::style::register_fonts;
use pvqd_plot::{
    DiagnosticsFigure, Figure, ImageFormat, InfidelityFigure, ObservablesFigure, PlotConfig,
    PlotError, ViewerData, render_all,
};

fn synthetic_study(dir: &std::path::Path, diagnostics_shots: u32) -> Study {
    let config = StudyConfig {
        data_dir: dir.to_path_buf(),
        diagnostics_shots,
        ..Default::default()
    };
    SyntheticStudy::new(80, config.dt)
        .write_data_set(&config, 11)
        .unwrap();
    Study::load(&config).unwrap()
}

#[test]
fn infidelity_figure_keeps_every_run() {
    let dir = tempfile::tempdir().unwrap();
    let study = synthetic_study(dir.path(), 800);
    let series = study.infidelity_series();
    let figure = InfidelityFigure::new(&series).unwrap();
    let xs: Vec<f64> = figure.points().iter().map(|p| p.0).collect();
    assert_eq!(xs, vec![1e5, 1e6, 1e7, 1e8]);
}

#[test]
fn diagnostics_figure_prepares_for_configured_run() {
    let dir = tempfile::tempdir().unwrap();
    let study = synthetic_study(dir.path(), 800);
    let run = study.run(800).unwrap();
    assert!(DiagnosticsFigure::new(run, study.config().window).is_ok());
}

#[test]
fn unknown_diagnostics_run_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let study = synthetic_study(dir.path(), 1234);
    let out = dir.path().join("plots");
    let config = PlotConfig {
        output_dir: out.clone(),
        ..Default::default()
    };

    let err = render_all(&study, &config).unwrap_err();
    assert!(matches!(
        err,
        PlotError::Analysis(AnalysisError::UnknownRun(1234))
    ));
    assert!(!out.exists());
}

fn draw_svg(figure: &impl Figure) -> String {
    register_fonts().unwrap();
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (1200, 900)).into_drawing_area();
        figure.draw(&root).unwrap();
        root.present().unwrap();
    }
    svg
}

#[test]
fn infidelity_figure_draws_to_svg() {
    let dir = tempfile::tempdir().unwrap();
    let study = synthetic_study(dir.path(), 800);
    let figure = InfidelityFigure::new(&study.infidelity_series()).unwrap();
    let svg = draw_svg(&figure);
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Infidelity vs. samples"));
    assert!(svg.contains("<circle"));
}

#[test]
fn observables_figure_draws_every_run() {
    let dir = tempfile::tempdir().unwrap();
    let study = synthetic_study(dir.path(), 800);
    let svg = draw_svg(&ObservablesFigure::new(&study));
    assert!(svg.contains("Sx"));
    assert!(svg.contains("Sz"));
    assert!(svg.contains("pVQD: 80000 shots"));
    // 4 runs x 2 panels x 60 samples, plus legend markers
    assert!(svg.matches("<circle").count() >= 4 * 2 * 60);
}

#[test]
fn diagnostics_figure_draws_to_svg() {
    let dir = tempfile::tempdir().unwrap();
    let study = synthetic_study(dir.path(), 800);
    let run = study.run(800).unwrap();
    let figure = DiagnosticsFigure::new(run, study.config().window).unwrap();
    let svg = draw_svg(&figure);
    assert!(svg.contains("Optimizer diagnostics | 800 shots"));
    assert!(svg.contains("1 - F after optimization"));
}

#[test]
fn infidelity_figure_draws_to_bitmap() {
    register_fonts().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let study = synthetic_study(dir.path(), 800);
    let figure = InfidelityFigure::new(&study.infidelity_series()).unwrap();

    let (w, h) = (400u32, 300u32);
    let mut buf = vec![0u8; (w * h * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        figure.draw(&root).unwrap();
        root.present().unwrap();
    }
    assert!(buf.iter().any(|&b| b == 255));
    assert!(buf.chunks(3).any(|px| px != [255, 255, 255]));
}

#[test]
fn render_all_writes_three_files() {
    for format in [ImageFormat::Svg, ImageFormat::Png] {
        let dir = tempfile::tempdir().unwrap();
        let study = synthetic_study(dir.path(), 800);
        let config = PlotConfig {
            output_dir: dir.path().join("plots"),
            format,
            size: (600, 450),
        };

        let written = render_all(&study, &config).unwrap();
        assert_eq!(written.len(), 3);
        for stem in ["infidelity_vs_samples", "observables", "diagnostics"] {
            let path = config.path_for(stem);
            assert!(written.contains(&path));
            let meta = std::fs::metadata(&path).unwrap();
            assert!(meta.len() > 0, "{} is empty", path.display());
        }
    }
}

#[test]
fn viewer_data_covers_every_chart_group() {
    let dir = tempfile::tempdir().unwrap();
    let study = synthetic_study(dir.path(), 800);
    let data = ViewerData::from_study(&study).unwrap();

    assert_eq!(data.infidelity.len(), 4);
    assert!((data.infidelity[0][0] - 5.0).abs() < 1e-12);

    let axes: Vec<Observable> = data.observables.iter().map(|p| p.axis).collect();
    assert_eq!(axes, vec![Observable::X, Observable::Z]);
    for panel in &data.observables {
        assert_eq!(panel.exact.len(), 60);
        assert_eq!(panel.runs.len(), 4);
        for run in &panel.runs {
            assert_eq!(run.points.len(), run.bars.len());
            for (point, bar) in run.points.iter().zip(&run.bars) {
                assert!(bar[0][1] <= point[1] && point[1] <= bar[1][1]);
            }
        }
    }
    assert_eq!(data.observables[0].runs[3].label, "pVQD: 80000 shots");

    assert_eq!(data.diagnostics.shots, 800);
    assert!(!data.diagnostics.iterations.is_empty());
    assert!(data.diagnostics.after.iter().all(|p| p[1] < 0.0));
}

#[test]
fn viewer_data_rejects_unknown_diagnostics_run() {
    let dir = tempfile::tempdir().unwrap();
    let study = synthetic_study(dir.path(), 1234);
    let err = ViewerData::from_study(&study).unwrap_err();
    assert!(matches!(
        err,
        PlotError::Analysis(AnalysisError::UnknownRun(1234))
    ));
}
