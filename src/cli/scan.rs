//! Scan command implementation.
//!
//! Merges flags with saved settings, resolves the target, drives the scan
//! and hands the finished summary to the console and the report sink.

use crate::cli::{Cli, OutputFormat};
use crate::config::{seconds_to_duration, AppSettings};
use crate::error::CliResult;
use crate::output;
use crate::scanner::{run_scan, PortResult, TcpBannerScanner};
use crate::storage::{save_report, FileReportSink, ReportSink};
use crate::types::{PortError, PortSpec, ScanTarget, TargetSpec};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, warn};

/// Effective options after applying settings under command-line flags.
#[derive(Debug)]
struct ScanOptions {
    ports: PortSpec,
    timeout: Duration,
    verbose: bool,
    format: OutputFormat,
}

impl ScanOptions {
    fn resolve(cli: &Cli, settings: &AppSettings) -> CliResult<Self> {
        let ports = match cli.ports.as_deref().map(str::parse::<PortSpec>) {
            Some(Err(PortError::Empty)) => {
                output::print_warning(&format!(
                    "no ports given, scanning the defaults ({})",
                    settings.default_ports
                ));
                settings.default_ports.parse::<PortSpec>()?
            }
            Some(parsed) => parsed?,
            None => settings.default_ports.parse::<PortSpec>()?,
        };
        let timeout = seconds_to_duration(cli.timeout.unwrap_or(settings.default_timeout_secs))?;

        Ok(Self {
            ports,
            timeout,
            verbose: cli.verbose || settings.verbose,
            format: cli.format.unwrap_or(settings.default_output_format),
        })
    }
}

/// Whether a result is echoed to the console as soon as it arrives.
///
/// Open ports always are. Closed, filtered and failed ports only show up
/// in verbose mode.
fn echo_result(result: &PortResult, verbose: bool) -> bool {
    verbose || result.is_open()
}

/// Execute a scan as described by the command line.
pub async fn run(cli: &Cli) -> CliResult<()> {
    let settings = match &cli.config {
        Some(path) => AppSettings::load_from(path)?,
        None => AppSettings::load()?,
    };
    let options = ScanOptions::resolve(cli, &settings)?;
    debug!(?options, "effective scan options");

    // Resolution failures abort before any connection is attempted.
    let host = cli.target.trim();
    let ip = TargetSpec::parse(host)?.resolve().await?;
    let target = ScanTarget::new(host, ip, &options.ports);

    let plain = options.format == OutputFormat::Plain;
    if plain && !cli.quiet {
        output::print_scan_header(&target, options.timeout);
    }

    let progress = (plain && !options.verbose && !cli.quiet)
        .then(|| scan_progress(target.ports.len() as u64));

    let scanner = TcpBannerScanner::for_target(&target, options.timeout);
    let summary = run_scan(&scanner, &target, |result| {
        if !plain {
            return;
        }
        if let Some(pb) = &progress {
            pb.inc(1);
        }
        if !echo_result(result, options.verbose) {
            return;
        }
        let print = || output::print_port(result, options.verbose);
        let printed = match &progress {
            Some(pb) => pb.suspend(print),
            None => print(),
        };
        if let Err(e) = printed {
            warn!(error = %e, "failed to print result");
        }
    })
    .await;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if !(plain && cli.quiet) {
        output::format_results(&summary, options.format)?;
    }

    if let Some(path) = &cli.output {
        let sink = FileReportSink::new(path);
        match save_report(&sink, &summary) {
            Ok(()) if plain && !cli.quiet => {
                output::print_success(&format!("Results saved to {}", sink.describe()));
            }
            Ok(()) => {}
            // Console results already printed stay valid.
            Err(e) => output::print_warning(&e.to_string()),
        }
    }

    Ok(())
}

fn scan_progress(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
    {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bannergrab").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_options_fall_back_to_settings() {
        let settings = AppSettings {
            default_timeout_secs: 0.25,
            default_ports: "22,21".to_string(),
            verbose: true,
            default_output_format: OutputFormat::Csv,
        };
        let options = ScanOptions::resolve(&cli(&["host"]), &settings).unwrap();

        assert_eq!(options.timeout, Duration::from_millis(250));
        assert_eq!(options.ports.to_ports().len(), 2);
        assert!(options.verbose);
        assert_eq!(options.format, OutputFormat::Csv);
    }

    #[test]
    fn test_flags_override_settings() {
        let options = ScanOptions::resolve(
            &cli(&["host", "-p", "8080", "-t", "3", "-f", "plain"]),
            &AppSettings::default(),
        )
        .unwrap();

        assert_eq!(options.ports.to_string(), "8080");
        assert_eq!(options.timeout, Duration::from_secs(3));
        assert_eq!(options.format, OutputFormat::Plain);
    }

    #[test]
    fn test_empty_port_list_uses_defaults() {
        let settings = AppSettings {
            default_ports: "21,22".to_string(),
            ..AppSettings::default()
        };
        for ports in ["", " , "] {
            let options = ScanOptions::resolve(&cli(&["host", "-p", ports]), &settings).unwrap();
            assert_eq!(options.ports.to_string(), "21,22");
        }
    }

    #[test]
    fn test_only_open_ports_echo_unless_verbose() {
        use crate::error::ScanError;
        use crate::types::Port;

        let port = Port::new(8080).unwrap();
        let open = PortResult::open(port, "HTTP-Alt", "HTTP/1.1 200 OK");
        let closed = PortResult::failed(port, "HTTP-Alt", &ScanError::ConnectionRefused);
        let filtered = PortResult::failed(
            port,
            "HTTP-Alt",
            &ScanError::Timeout { stage: "read banner" },
        );
        let error = PortResult::failed(
            port,
            "HTTP-Alt",
            &ScanError::from_io("connect", std::io::Error::other("no route")),
        );

        assert!(echo_result(&open, false));
        for failure in [&closed, &filtered, &error] {
            assert!(!echo_result(failure, false));
            assert!(echo_result(failure, true));
        }
    }

    #[test]
    fn test_bad_options_are_rejected() {
        let settings = AppSettings::default();
        assert!(ScanOptions::resolve(&cli(&["host", "-p", "http"]), &settings).is_err());
        assert!(ScanOptions::resolve(&cli(&["host", "-t", "0"]), &settings).is_err());
    }

    #[tokio::test]
    async fn test_invalid_host_fails_before_scanning() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("report.txt");
        let config = dir.path().join("settings.json");
        std::fs::write(&config, "{}").unwrap();

        let cli = cli(&[
            "not a host!",
            "-q",
            "--config",
            config.to_str().unwrap(),
            "-o",
            report.to_str().unwrap(),
        ]);
        let err = run(&cli).await.unwrap_err();

        assert_eq!(err.exit_status(), 3);
        assert!(!report.exists());
    }
}
