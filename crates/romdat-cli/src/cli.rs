//! CLI argument definitions for the catalogue converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "romdat",
    version,
    about = "Convert a Mupen64Plus ROM catalogue to packed binary data",
    long_about = "Convert a line-oriented ROM catalogue (mupen64plus.ini) into a\n\
                  compact fixed-width binary record array plus a deduplicated\n\
                  cheat string table, suitable for embedding as read-only data."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a catalogue file to the packed outputs.
    Convert(ConvertArgs),

    /// List the catalogue keys the parser recognizes.
    Keys,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to the catalogue file.
    #[arg(value_name = "CATALOGUE")]
    pub catalogue: PathBuf,

    /// Output directory for generated files (default: <CATALOGUE dir>/out).
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Also write the filtered catalogue (filtered.ini) for round-trip checks.
    #[arg(long = "filtered-ini")]
    pub filtered_ini: bool,

    /// Write a JSON report of the run to this path.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Treat unknown catalogue keys as fatal instead of warnings.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Parse and transform without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
