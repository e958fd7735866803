//! CLI argument definitions for the `cdq` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cdq",
    version,
    about = "Customer data quality pipeline - profile, clean, validate and mask customer records",
    long_about = "Profile, clean, validate and mask a customer records CSV.\n\n\
                  Writes cleaned and masked tables, six text reports, and a JSON\n\
                  action log of every cell the pipeline changed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values (customer PII) in debug and trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline and write cleaned/masked tables and reports.
    Run(RunArgs),

    /// Profile a raw file: quality and PII reports only, no cleaning.
    Profile(ProfileArgs),

    /// Print the per-column rule table.
    Rules,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Customer records CSV.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory (default: <INPUT parent>/outputs).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Reference date for age checks, YYYY-MM-DD (default: today, UTC).
    #[arg(long = "as-of", value_name = "DATE")]
    pub as_of: Option<String>,

    /// Skip validating the raw table before cleaning.
    #[arg(long = "skip-pre-validation")]
    pub skip_pre_validation: bool,

    /// Rows shown before/after in the masked sample report.
    #[arg(long = "sample-rows", value_name = "N", default_value_t = 3)]
    pub sample_rows: usize,

    /// Run every stage and print the summary without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ProfileArgs {
    /// Customer records CSV.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory (default: <INPUT parent>/outputs).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Reference date for age checks, YYYY-MM-DD (default: today, UTC).
    #[arg(long = "as-of", value_name = "DATE")]
    pub as_of: Option<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
