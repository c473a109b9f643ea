//! Command-line interface for notetab.
//!
//! Parses startup arguments: files to open and logging overrides.

use clap::Parser;
use std::path::PathBuf;

/// notetab - a multi-document notes editor for the terminal
#[derive(Parser, Debug)]
#[command(name = "notetab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files to open in tabs at startup
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,

    /// Use this config file instead of ~/.config/notetab/config.yaml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    /// Files to open, in order
    pub files: Vec<PathBuf>,
    /// Log level override from CLI
    pub log_level: Option<log::LevelFilter>,
    /// Explicit config file
    pub config_path: Option<PathBuf>,
}

impl From<Cli> for RuntimeOptions {
    fn from(cli: Cli) -> Self {
        Self {
            files: cli.files,
            log_level: cli.log_level.map(LogLevelArg::to_level_filter),
            config_path: cli.config,
        }
    }
}

/// Parse process arguments (exits on `--help`, `--version` or bad input)
pub fn process_cli() -> RuntimeOptions {
    Cli::parse().into()
}
