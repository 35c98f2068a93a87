// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `watchmon`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "watchmon",
    version,
    about = "Watch declared paths and run command pipelines when they change.",
    long_about = None
)]
pub struct CliArgs {
    /// One or more YAML monitor files.
    ///
    /// Each file maps a monitor name to its command hooks and searches;
    /// the reserved `__defaults__` entry supplies per-file fallbacks.
    #[arg(value_name = "PATHS", required = true)]
    pub paths: Vec<String>,

    /// After a cycle's commands finish, pause one second and watch again.
    #[arg(short, long)]
    pub repeat: bool,

    /// Treat configuration and watch-registration problems as fatal.
    #[arg(short = 'e', long)]
    pub exit_on_error: bool,

    /// When a change is detected and this file exists, run each triggered
    /// monitor's `skipped` commands instead of its `commands`.
    #[arg(short, long, value_name = "PATH")]
    pub skip_file: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WATCHMON_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the monitors, but don't watch or execute.
    #[arg(long)]
    pub dry_run: bool,
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
