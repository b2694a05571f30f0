//! Inspect command implementation.

use console::style;

use pvqd_analysis::state::{approx_trajectory, exact_trajectory};

use super::common::{load_study, resolve_config};

/// Execute the inspect command.
pub fn execute(config_file: Option<&str>, data_dir: Option<&str>) -> anyhow::Result<()> {
    let config = resolve_config(config_file, data_dir, None)?;
    let study = load_study(&config)?;

    let exact = study.exact();
    let span = |times: &[f64]| match (times.first(), times.last()) {
        (Some(a), Some(b)) => format!("t = {a:.3} .. {b:.3}"),
        _ => "empty".to_string(),
    };

    println!("{}", style("Study").bold().underlined());
    println!("  Data dir:     {}", config.data_dir.display());
    println!("  dt:           {} ({})", config.dt, config.accumulation);
    println!("  Window:       {} samples", config.window);
    println!();
    println!("{}", style("Exact reference").bold().underlined());
    println!(
        "  {}:  {} samples, {}, {} states",
        config.exact_file,
        exact.len(),
        span(&exact.times),
        exact_trajectory(exact).len()
    );
    println!();
    println!("{}", style("Runs").bold().underlined());
    for run in study.runs() {
        let record = &run.record;
        println!(
            "  {:>6} shots:  {} samples, {}, {} states, {} optimizer iterations",
            run.spec.shots,
            record.len(),
            span(&record.times),
            approx_trajectory(record).len(),
            record.total_iterations()
        );
    }
    Ok(())
}
