//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use depcheck_core::types::Severity;

/// depcheck -- turn OWASP Dependency-Check reports into issues and risk metrics.
///
/// Use `depcheck <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "depcheck", version, about, long_about = None)]
pub struct Cli {
    /// Path to the depcheck.toml configuration file.
    #[arg(short, long, default_value = "depcheck.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process a Dependency-Check report for a project directory.
    Scan(ScanArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- scan ----

/// Process a Dependency-Check report and print issues and metrics.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Project base directory (default: `[report].base_dir` from config).
    pub base_dir: Option<PathBuf>,

    /// Report path, relative to the base directory.
    #[arg(long)]
    pub report: Option<String>,

    /// HTML report path to attach; pass an empty string to disable.
    #[arg(long)]
    pub html_report: Option<String>,

    /// CVSS score at or above which an issue is critical.
    #[arg(long)]
    pub critical: Option<f64>,

    /// CVSS score at or above which an issue is major.
    #[arg(long)]
    pub major: Option<f64>,

    /// Exit with code 4 when an issue at or above this severity is found
    /// (minor/low, major/medium, critical/high).
    #[arg(long, value_parser = parse_severity)]
    pub fail_on: Option<Severity>,
}

fn parse_severity(s: &str) -> Result<Severity, String> {
    Severity::from_str_loose(s)
        .ok_or_else(|| format!("unknown severity '{s}', expected minor, major or critical"))
}

// ---- config ----

/// Manage depcheck configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, report).
        #[arg(long)]
        section: Option<String>,
    },
}
