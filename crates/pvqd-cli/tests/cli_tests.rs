//! CLI command parsing and workflow tests.
//!
//! Tests cover argument parsing (via clap `try_parse_from`) and the
//! synth -> infidelity -> export workflow the commands drive.

// The CLI is a binary crate, so the workflow is exercised through the
// library crates it calls and clap parsing through a mirrored struct.

// ============================================================================
// Workflow tests
// ============================================================================

mod workflow {
    use pvqd_analysis::{
        Accumulation, InfidelityReport, Study, StudyConfig, SyntheticStudy,
    };

    /// Equivalent to commands::common::resolve_config without a config file.
    fn resolve_config(data_dir: &str, accumulation: Option<&str>) -> anyhow::Result<StudyConfig> {
        let mut config = StudyConfig::default();
        config.data_dir = data_dir.into();
        if let Some(mode) = accumulation {
            config.accumulation = mode.parse::<Accumulation>().map_err(anyhow::Error::msg)?;
        }
        Ok(config)
    }

    #[test]
    fn test_synth_then_infidelity() {
        let dir = tempfile::tempdir().unwrap();
        let config = resolve_config(dir.path().to_str().unwrap(), None).unwrap();
        SyntheticStudy::new(40, config.dt)
            .write_data_set(&config, 7)
            .unwrap();

        let study = Study::load(&config).unwrap();
        let report = InfidelityReport::from_study(&study);
        assert_eq!(report.points.len(), 4);
        assert_eq!(report.accumulation, Accumulation::Compounding);
        assert!(report.points.iter().all(|p| p.infidelity.is_finite()));
    }

    #[test]
    fn test_riemann_override() {
        let config = resolve_config("data", Some("riemann")).unwrap();
        assert_eq!(config.accumulation, Accumulation::Riemann);
    }

    #[test]
    fn test_unknown_accumulation_rejected() {
        let err = resolve_config("data", Some("trapezoid")).unwrap_err();
        assert!(err.to_string().contains("trapezoid"));
    }

    #[test]
    fn test_export_report_is_json() {
        let dir = tempfile::tempdir().unwrap();
        let config = resolve_config(dir.path().to_str().unwrap(), Some("riemann")).unwrap();
        SyntheticStudy::new(20, config.dt)
            .write_data_set(&config, 3)
            .unwrap();

        let study = Study::load(&config).unwrap();
        let out = dir.path().join("report.json");
        InfidelityReport::from_study(&study).to_file(&out).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["accumulation"], "riemann");
        assert_eq!(value["points"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_missing_data_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = resolve_config(dir.path().join("absent").to_str().unwrap(), None).unwrap();
        assert!(Study::load(&config).is_err());
    }
}

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use clap::{Parser, Subcommand};

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "pvqd")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Figures {
            #[arg(short, long)]
            config: Option<String>,
            #[arg(short, long)]
            data_dir: Option<String>,
            #[arg(short, long)]
            output: Option<String>,
            #[arg(short, long, default_value = "png")]
            format: String,
            #[arg(short, long)]
            window: Option<usize>,
        },
        Infidelity {
            #[arg(short, long)]
            config: Option<String>,
            #[arg(short, long)]
            data_dir: Option<String>,
            #[arg(short, long)]
            accumulation: Option<String>,
            #[arg(short, long, default_value = "table")]
            format: String,
            #[arg(short, long)]
            export: Option<String>,
        },
        Inspect {
            #[arg(short, long)]
            config: Option<String>,
            #[arg(short, long)]
            data_dir: Option<String>,
        },
        Synth {
            #[arg(short, long)]
            config: Option<String>,
            #[arg(short, long)]
            output: String,
            #[arg(short, long, default_value = "200")]
            steps: usize,
            #[arg(long, default_value = "7")]
            seed: u64,
        },
        Version,
    }

    #[test]
    fn test_figures_defaults() {
        let cli = TestCli::try_parse_from(["pvqd", "figures"]).unwrap();
        match cli.command {
            TestCommands::Figures {
                config,
                data_dir,
                output,
                format,
                window,
            } => {
                assert!(config.is_none());
                assert!(data_dir.is_none());
                assert!(output.is_none(), "charts open on screen by default");
                assert_eq!(format, "png");
                assert!(window.is_none());
            }
            _ => panic!("Expected Figures command"),
        }
    }

    #[test]
    fn test_figures_all_options() {
        let cli = TestCli::try_parse_from([
            "pvqd", "figures", "-c", "study.yaml", "-d", "data", "-o", "out", "-f", "svg", "-w",
            "30",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Figures {
                config,
                data_dir,
                output,
                format,
                window,
            } => {
                assert_eq!(config.as_deref(), Some("study.yaml"));
                assert_eq!(data_dir.as_deref(), Some("data"));
                assert_eq!(output.as_deref(), Some("out"));
                assert_eq!(format, "svg");
                assert_eq!(window, Some(30));
            }
            _ => panic!("Expected Figures command"),
        }
    }

    #[test]
    fn test_infidelity_options() {
        let cli = TestCli::try_parse_from([
            "pvqd",
            "infidelity",
            "--accumulation",
            "riemann",
            "--format",
            "json",
            "--export",
            "report.json",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Infidelity {
                accumulation,
                format,
                export,
                ..
            } => {
                assert_eq!(accumulation.as_deref(), Some("riemann"));
                assert_eq!(format, "json");
                assert_eq!(export.as_deref(), Some("report.json"));
            }
            _ => panic!("Expected Infidelity command"),
        }
    }

    #[test]
    fn test_infidelity_default_format() {
        let cli = TestCli::try_parse_from(["pvqd", "infidelity"]).unwrap();
        match cli.command {
            TestCommands::Infidelity { format, export, .. } => {
                assert_eq!(format, "table");
                assert!(export.is_none());
            }
            _ => panic!("Expected Infidelity command"),
        }
    }

    #[test]
    fn test_inspect_data_dir() {
        let cli = TestCli::try_parse_from(["pvqd", "inspect", "--data-dir", "runs"]).unwrap();
        match cli.command {
            TestCommands::Inspect { data_dir, .. } => {
                assert_eq!(data_dir.as_deref(), Some("runs"));
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_synth_defaults() {
        let cli = TestCli::try_parse_from(["pvqd", "synth", "-o", "data"]).unwrap();
        match cli.command {
            TestCommands::Synth {
                output,
                steps,
                seed,
                ..
            } => {
                assert_eq!(output, "data");
                assert_eq!(steps, 200);
                assert_eq!(seed, 7);
            }
            _ => panic!("Expected Synth command"),
        }
    }

    #[test]
    fn test_synth_requires_output() {
        let result = TestCli::try_parse_from(["pvqd", "synth"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_synth_rejects_bad_steps() {
        let result = TestCli::try_parse_from(["pvqd", "synth", "-o", "d", "--steps", "many"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_version_verbosity() {
        let cli = TestCli::try_parse_from(["pvqd", "-vv", "version"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, TestCommands::Version));
    }

    #[test]
    fn test_verbose_after_subcommand() {
        let cli = TestCli::try_parse_from(["pvqd", "version", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_no_subcommand_fails() {
        let result = TestCli::try_parse_from(["pvqd"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_subcommand_fails() {
        let result = TestCli::try_parse_from(["pvqd", "plot"]);
        assert!(result.is_err());
    }
}
