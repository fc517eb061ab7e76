//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use slog_core::Severity;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "slog")]
#[command(version, about = "Append to and inspect rotating slog files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ~/.slog/slog.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base log file path
    #[arg(short, long, env = "SLOG_FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Rotate once the file reaches this many megabytes
    #[arg(long, env = "SLOG_SIZE_MB", global = true)]
    pub size_mb: Option<u64>,

    /// Rotate once the file reaches this many lines
    #[arg(long, env = "SLOG_MAX_LINES", global = true)]
    pub max_lines: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append one line to the log
    Write(WriteArgs),

    /// Show the last lines of the log or a rotated generation
    Tail(TailArgs),

    /// Show the log file and its rotated generations
    Status,
}

#[derive(Args)]
pub struct WriteArgs {
    /// Severity (emerg, alert, crit, err, warning, notice, info, debug)
    #[arg(value_parser = parse_severity)]
    pub severity: Severity,

    /// Message words, joined with spaces
    #[arg(required = true)]
    pub message: Vec<String>,

    /// Do not terminate the line with a newline
    #[arg(long)]
    pub no_newline: bool,
}

#[derive(Args)]
pub struct TailArgs {
    /// Number of lines to show
    #[arg(short = 'n', long, default_value = "20")]
    pub lines: usize,

    /// Generation to read (0 is the active file)
    #[arg(short, long, default_value = "0")]
    pub generation: u32,

    /// Print lines exactly as stored
    #[arg(long)]
    pub raw: bool,
}

fn parse_severity(s: &str) -> Result<Severity, String> {
    s.parse().map_err(|e: slog_core::Error| e.to_string())
}
