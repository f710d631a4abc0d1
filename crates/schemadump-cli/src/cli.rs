//! CLI argument definitions for the schema dumper.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "schemadump",
    version,
    about = "Dump schema registry classes and enums to header-like text files",
    long_about = "Dump every class and enum of a schema registry snapshot to one text\n\
                  artifact per type, grouped by project under <OUTPUT>/schemas.\n\n\
                  Artifacts of types no longer present in the registry are removed."
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

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Dump a registry snapshot and synchronize the output tree.
    Dump(DumpArgs),

    /// List the scopes of a registry snapshot with class and enum counts.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct DumpArgs {
    /// Registry snapshot (JSON) exported by the host process.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Output directory; artifacts go to <DIR>/schemas.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Identifier list path (default: <DIR>/schema_identifiers.txt).
    #[arg(long = "identifiers-file", value_name = "PATH")]
    pub identifiers_file: Option<PathBuf>,

    /// Report stale artifacts without deleting them.
    #[arg(long = "no-prune")]
    pub no_prune: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Registry snapshot (JSON) exported by the host process.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,
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
