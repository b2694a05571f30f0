//! Infidelity command implementation.
//!
//! `pvqd infidelity [--config <file>] [--accumulation compounding|riemann] [--format table|json] [--export <file>]`

use console::style;
use std::path::Path;

use pvqd_analysis::InfidelityReport;

use super::common::{load_study, resolve_config};

/// Execute the infidelity command.
pub fn execute(
    config_file: Option<&str>,
    data_dir: Option<&str>,
    accumulation: Option<&str>,
    format: &str,
    export: Option<&str>,
) -> anyhow::Result<()> {
    let config = resolve_config(config_file, data_dir, accumulation)?;
    let study = load_study(&config)?;
    let report = InfidelityReport::from_study(&study);

    if let Some(path) = export {
        report.to_file(Path::new(path))?;
        eprintln!("{} Report written to {}", style("OK").green().bold(), path);
    }

    match format.to_lowercase().as_str() {
        "json" => println!("{}", report.to_json(true)?),
        "table" => print_table(&report),
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }
    Ok(())
}

fn print_table(report: &InfidelityReport) {
    println!(
        "{}",
        style(format!(
            "Infidelity vs. samples (dt = {}, {})",
            report.dt, report.accumulation
        ))
        .bold()
        .underlined()
    );
    println!("  {:>8}  {:>12}  {:>14}", "shots", "samples", "infidelity");
    for point in &report.points {
        println!(
            "  {:>8}  {:>12.3e}  {:>14.6e}",
            point.shots, point.samples, point.infidelity
        );
    }
}
