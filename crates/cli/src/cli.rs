//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Null Stream - Gursel-Tinto null stream pipeline for three-detector networks
#[derive(Parser, Debug)]
#[command(
    name = "nullstream",
    author,
    version,
    about = "Gravitational-wave null stream pipeline",
    long_about = "Builds a three-detector network from a scenario file, injects a \n\
                  polarized test signal, and forms the time-shifted Gursel-Tinto \n\
                  null stream that cancels any true gravitational-wave signal."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "NULLSTREAM_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "NULLSTREAM_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the null stream pipeline
    Run(RunArgs),

    /// Validate a scenario file without running
    Validate(ValidateArgs),

    /// Display scenario information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to scenario file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "scenario.toml",
        env = "NULLSTREAM_SCENARIO"
    )]
    pub config: PathBuf,

    /// Override segment duration in seconds from the scenario
    #[arg(long, env = "NULLSTREAM_DURATION")]
    pub duration: Option<f64>,

    /// Override sample rate in Hz from the scenario
    #[arg(long, env = "NULLSTREAM_SAMPLE_RATE")]
    pub sample_rate: Option<f64>,

    /// Override noise seed from the scenario
    #[arg(long, env = "NULLSTREAM_SEED")]
    pub seed: Option<u64>,

    /// Number of pipeline runs (seeds advance by one per run)
    #[arg(long, default_value = "1", env = "NULLSTREAM_RUNS")]
    pub runs: u64,

    /// Validate the scenario and exit without running the pipeline
    #[arg(long)]
    pub dry_run: bool,

    /// Write per-run results to a JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "NULLSTREAM_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to scenario file to validate
    #[arg(short, long, default_value = "scenario.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to scenario file
    #[arg(short, long, default_value = "scenario.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show detailed site geometry
    #[arg(long)]
    pub sites: bool,

    /// Show antenna responses and delays for the configured sky position
    #[arg(long)]
    pub sky: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
