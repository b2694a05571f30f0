//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - shot-noise analysis of pVQD time evolution",
        style("pvqd").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  pvqd-analysis  Records, density matrices and infidelity");
    println!("  pvqd-plot      Chart rendering");
    println!("  pvqd-cli       Command-line interface");
}
