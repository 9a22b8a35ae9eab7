//! fabric-drift: drift detection for network fabric topologies
//!
//! Compares topology snapshots against stored baselines and reconciles a
//! desired topology against observed control-plane state.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use fabric_drift::{
    cli,
    config::{AppConfig, AppConfigBuilder, ConfigPreset, Validatable},
    drift::{FailurePolicy, Severity},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with input format info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nInput Formats:",
        "\n  Topology snapshots:       JSON, YAML",
        "\n  Control plane responses:  JSON, YAML (CRD-shaped list)",
        "\n\nOutput Formats:",
        "\n  summary, json"
    )
}

#[derive(Parser)]
#[command(name = "fabric-drift")]
#[command(author = "Binarly.io")]
#[command(version, long_version = build_long_version())]
#[command(about = "Drift detection for network fabric topologies", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No drift detected (or drift without --fail-on-drift)
    1  Drift detected with --fail-on-drift
    3  Error occurred

EXAMPLES:
    # Compare the current snapshot against its stored baseline
    fabric-drift check lab-fabric fabric.yaml --baseline-dir baselines/

    # Full comparison of two snapshot files
    fabric-drift report baseline.json current.json -o json > drift.json

    # Reconcile desired topology against captured control plane state
    fabric-drift live cluster-status.json --desired fabric.yaml --fail-on-drift")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start from a named preset (default, strict, ci) before applying the config file
    #[arg(long, global = true)]
    preset: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Output arguments shared by every detection command
#[derive(Parser)]
struct OutputArgs {
    /// Output format (auto resolves to summary)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 1 if drift is detected
    #[arg(long)]
    fail_on_drift: bool,
}

/// Arguments for the `check` subcommand
#[derive(Parser)]
struct CheckArgs {
    /// Id of the stored baseline to compare against
    snapshot_id: String,

    /// Path to the current topology snapshot
    current: PathBuf,

    /// Directory holding `<snapshot-id>.json|yaml|yml` baselines
    #[arg(long, env = "FABRIC_DRIFT_BASELINE_DIR")]
    baseline_dir: Option<PathBuf>,

    /// List each change after the summary lines
    #[arg(long)]
    details: bool,

    /// How a failed check is reported [default: fail-open]
    #[arg(long, value_enum)]
    on_failure: Option<FailurePolicy>,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the `report` subcommand
#[derive(Parser)]
struct ReportArgs {
    /// Path to the baseline snapshot
    baseline: PathBuf,

    /// Path to the current snapshot
    current: PathBuf,

    /// Maximum number of changes listed in summary output
    #[arg(long)]
    max_items: Option<usize>,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the `live` subcommand
#[derive(Parser)]
struct LiveArgs {
    /// Captured control plane status response (JSON or YAML)
    response: PathBuf,

    /// Desired topology snapshot (defaults to the stored baseline for --snapshot-id)
    #[arg(long)]
    desired: Option<PathBuf>,

    /// Id of the stored baseline used as desired state
    #[arg(long)]
    snapshot_id: Option<String>,

    /// Directory holding stored baselines
    #[arg(long, env = "FABRIC_DRIFT_BASELINE_DIR")]
    baseline_dir: Option<PathBuf>,

    /// Minimum severity to report
    #[arg(long, value_enum)]
    threshold: Option<Severity>,

    /// Report matched resources as in-sync findings
    #[arg(long)]
    include_healthy: bool,

    /// Timeout handed to the control plane client, in milliseconds
    #[arg(long)]
    api_timeout_ms: Option<u64>,

    /// How a failed detection is reported [default: surface-as-finding]
    #[arg(long, value_enum)]
    on_failure: Option<FailurePolicy>,

    /// Maximum number of findings listed in summary output
    #[arg(long)]
    max_items: Option<usize>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a snapshot against its stored baseline
    Check(CheckArgs),

    /// Compare two snapshot files and report per-category changes
    Report(ReportArgs),

    /// Reconcile desired topology against observed control plane state
    Live(LiveArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from preset + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .fabric-drift.yaml in the current directory
    Init,
    /// Print the JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Check(args) => {
            let mut builder = output_overrides(&cli, &args.output)
                .include_details(args.details)
                .baseline_dir(args.baseline_dir.clone());
            if let Some(policy) = args.on_failure {
                builder = builder.drift_failure_policy(policy);
            }
            let config = effective_config(&cli, &builder.build())?;
            cli::run_check(&args.snapshot_id, &args.current, &config)
        }

        Commands::Report(args) => {
            let overrides = output_overrides(&cli, &args.output).build();
            let config = effective_config(&cli, &overrides)?;
            cli::run_report(&args.baseline, &args.current, args.max_items, &config)
        }

        Commands::Live(args) => {
            let mut builder = output_overrides(&cli, &args.output)
                .include_healthy_resources(args.include_healthy)
                .baseline_dir(args.baseline_dir.clone());
            if let Some(id) = &args.snapshot_id {
                builder = builder.snapshot_id(id.clone());
            }
            if let Some(threshold) = args.threshold {
                builder = builder.severity_threshold(threshold);
            }
            if let Some(timeout) = args.api_timeout_ms {
                builder = builder.api_timeout_ms(timeout);
            }
            if let Some(policy) = args.on_failure {
                builder = builder.control_plane_failure_policy(policy);
            }
            let config = effective_config(&cli, &builder.build())?;
            cli::run_live(&args.response, args.desired.as_deref(), args.max_items, &config)
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "fabric-drift", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            run_config_action(action, cli.config.as_deref())?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

/// CLI overrides shared by every detection command.
fn output_overrides(cli: &Cli, output: &OutputArgs) -> AppConfigBuilder {
    AppConfig::builder()
        .output_format(output.output)
        .output_file(output.output_file.clone())
        .no_color(cli.no_color)
        .fail_on_drift(output.fail_on_drift)
        .quiet(cli.quiet)
}

/// Preset, then config file, then CLI flags. The result must validate.
fn effective_config(cli: &Cli, overrides: &AppConfig) -> Result<AppConfig> {
    let mut config = match &cli.preset {
        Some(name) => {
            let preset = ConfigPreset::from_name(name).with_context(|| {
                format!(
                    "Unknown preset: {name}. Valid options: {}",
                    ConfigPreset::all()
                        .iter()
                        .map(|p| p.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })?;
            AppConfig::from_preset(preset)
        }
        None => AppConfig::default(),
    };

    let (file_config, loaded_from) = fabric_drift::config::load_or_default(cli.config.as_deref());
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    config.merge(&file_config);
    config.merge(overrides);

    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("Invalid configuration:\n  {}", messages.join("\n  "));
    }
    Ok(config)
}

fn run_config_action(action: &ConfigAction, explicit: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = fabric_drift::config::load_or_default(explicit);
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                fabric_drift::config::user_config_dir().map(|p| p.display().to_string()),
                ::dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order, after the git root):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in fabric_drift::config::CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match fabric_drift::config::discover_config_file(explicit) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".fabric-drift.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = fabric_drift::config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
        ConfigAction::Schema { output } => {
            let schema = fabric_drift::config::generate_json_schema()
                .context("failed to generate config schema")?;
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_live_args_parse() {
        let cli = Cli::try_parse_from([
            "fabric-drift",
            "live",
            "status.json",
            "--threshold",
            "high",
            "--include-healthy",
        ])
        .unwrap();
        match cli.command {
            Commands::Live(args) => {
                assert_eq!(args.threshold, Some(Severity::High));
                assert!(args.include_healthy);
            }
            _ => panic!("expected live command"),
        }
    }

    #[test]
    fn test_check_on_failure_parse() {
        let cli = Cli::try_parse_from([
            "fabric-drift",
            "check",
            "lab",
            "current.json",
            "--on-failure",
            "surface-as-finding",
        ])
        .unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.on_failure, Some(FailurePolicy::SurfaceAsFinding));
            }
            _ => panic!("expected check command"),
        }
    }
}
