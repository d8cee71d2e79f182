// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `trsync-fleet`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "trsync-fleet",
    version,
    about = "Start and supervise multiple trsync workers from one config file.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the fleet config file (TOML).
    #[arg(value_name = "CONFIG_FILE_PATH")]
    pub config_file_path: PathBuf,

    /// Parse + validate the config and print the planned jobs,
    /// without prompting for passwords or launching anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TRSYNC_FLEET_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
