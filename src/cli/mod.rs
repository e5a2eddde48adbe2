//! Command-line interface definitions for bannergrab.
//!
//! Uses `clap` derive macros for declarative argument parsing.

mod scan;

pub use scan::run;

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Grab service banners from TCP ports using protocol-aware probes.
///
/// Ports are visited one at a time in ascending order. Each port is
/// reported as OPEN (with its banner), CLOSED, FILTERED or ERROR.
#[derive(Parser, Debug)]
#[command(name = "bannergrab")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Protocol-aware TCP banner grabber", long_about = None)]
#[command(after_help = "Only scan systems you are authorized to test.")]
pub struct Cli {
    /// Target IP address or hostname
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Show the full banner for open ports and the reason for the others
    #[arg(short, long)]
    pub verbose: bool,

    /// Ports to scan (e.g. "22,80,443" or "20-25,8080") [default: 80,443]
    #[arg(short, long, value_name = "PORTS")]
    pub ports: Option<String>,

    /// Save a plain-text report to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Connect/read timeout in seconds [default: 2]
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<f64>,

    /// Console output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Only print results; no header, progress or footer
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to a settings file
    #[arg(long, value_name = "PATH", env = "BANNERGRAB_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format for results.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_are_unset() {
        let cli = Cli::try_parse_from(["bannergrab", "192.168.1.1"]).unwrap();
        assert_eq!(cli.target, "192.168.1.1");
        assert!(!cli.verbose);
        assert!(cli.ports.is_none());
        assert!(cli.output.is_none());
        assert!(cli.timeout.is_none());
        assert!(cli.format.is_none());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "bannergrab",
            "example.com",
            "-v",
            "-p",
            "22,80",
            "-o",
            "report.txt",
            "-t",
            "1.5",
            "-f",
            "json",
            "-q",
        ])
        .unwrap();
        assert!(cli.verbose && cli.quiet);
        assert_eq!(cli.ports.as_deref(), Some("22,80"));
        assert_eq!(cli.output, Some(PathBuf::from("report.txt")));
        assert_eq!(cli.timeout, Some(1.5));
        assert_eq!(cli.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_target_is_required() {
        assert!(Cli::try_parse_from(["bannergrab"]).is_err());
    }
}
