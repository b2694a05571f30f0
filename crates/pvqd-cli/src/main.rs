//! pVQD shot-noise study command-line interface.
//!
//! ```text
//!   exact_result_*.dat ─┐
//!                       ├─> pvqd infidelity ─> table / JSON report
//!   trial_results_*.dat ┘        │
//!                                └─> pvqd figures ─> PNG / SVG charts
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{figures, infidelity, inspect, synth, version};

/// pvqd - shot-noise analysis of projected variational quantum dynamics
#[derive(Parser)]
#[command(name = "pvqd")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the infidelity, observables and diagnostics charts on screen
    Figures {
        /// Study configuration file (YAML)
        #[arg(short, long, env = "PVQD_CONFIG")]
        config: Option<String>,

        /// Directory holding the result records
        #[arg(short, long)]
        data_dir: Option<String>,

        /// Write images to this directory instead of opening a window
        #[arg(short, long)]
        output: Option<String>,

        /// Image format for --output (png, svg)
        #[arg(short, long, default_value = "png")]
        format: String,

        /// Number of leading samples shown in the windowed charts
        #[arg(short, long)]
        window: Option<usize>,
    },

    /// Compute the accumulated infidelity of every run
    Infidelity {
        /// Study configuration file (YAML)
        #[arg(short, long, env = "PVQD_CONFIG")]
        config: Option<String>,

        /// Directory holding the result records
        #[arg(short, long)]
        data_dir: Option<String>,

        /// Accumulation rule (compounding, riemann)
        #[arg(short, long)]
        accumulation: Option<String>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Also write the JSON report to this file
        #[arg(short, long)]
        export: Option<String>,
    },

    /// Summarize the loaded records
    Inspect {
        /// Study configuration file (YAML)
        #[arg(short, long, env = "PVQD_CONFIG")]
        config: Option<String>,

        /// Directory holding the result records
        #[arg(short, long)]
        data_dir: Option<String>,
    },

    /// Write a synthetic study (exact reference plus noisy runs)
    Synth {
        /// Study configuration file (YAML); only its run list and file names are used
        #[arg(short, long, env = "PVQD_CONFIG")]
        config: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: String,

        /// Samples per trajectory
        #[arg(short, long, default_value = "200")]
        steps: usize,

        /// Random seed
        #[arg(long, default_value = "7")]
        seed: u64,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Figures {
            config,
            data_dir,
            output,
            format,
            window,
        } => figures::execute(
            config.as_deref(),
            data_dir.as_deref(),
            output.as_deref(),
            &format,
            window,
        ),

        Commands::Infidelity {
            config,
            data_dir,
            accumulation,
            format,
            export,
        } => infidelity::execute(
            config.as_deref(),
            data_dir.as_deref(),
            accumulation.as_deref(),
            &format,
            export.as_deref(),
        ),

        Commands::Inspect { config, data_dir } => {
            inspect::execute(config.as_deref(), data_dir.as_deref())
        }

        Commands::Synth {
            config,
            output,
            steps,
            seed,
        } => synth::execute(config.as_deref(), &output, steps, seed),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
