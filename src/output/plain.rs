//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::scanner::{PortResult, PortStatus};
use crate::summary::{summary_line, ScanSummary};
use crate::types::ScanTarget;
use console::{style, Style};
use std::io::{self, Write};
use std::time::Duration;

const BANNER_RULE: &str = "--------------------------------------------------";

fn status_style(status: PortStatus) -> Style {
    match status {
        PortStatus::Open => Style::new().green().bold(),
        PortStatus::Closed => Style::new().red(),
        PortStatus::Filtered => Style::new().yellow(),
        PortStatus::Error => Style::new().magenta(),
    }
}

/// Compact rendering: the fixed-width summary line, coloured by status.
pub fn write_port_line<W: Write>(out: &mut W, result: &PortResult) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        status_style(result.status).apply_to(summary_line(result))
    )
}

/// Detailed rendering: the full banner for open ports, the failure reason
/// for everything else.
pub fn write_port_verbose<W: Write>(out: &mut W, result: &PortResult) -> io::Result<()> {
    let paint = status_style(result.status);
    let detail = result.error_detail.as_deref().unwrap_or("");

    match result.status {
        PortStatus::Open => {
            writeln!(
                out,
                "{} Port {} {} - {}",
                paint.apply_to("[+]"),
                result.port,
                paint.apply_to("OPEN"),
                result.protocol
            )?;
            writeln!(out, "    [BANNER]:")?;
            writeln!(out, "{}", result.banner)?;
            writeln!(out, "{}", style(BANNER_RULE).dim())
        }
        PortStatus::Closed => writeln!(
            out,
            "{} Port {:>5} | {:<12} | {}",
            paint.apply_to("[-]"),
            result.port,
            result.protocol,
            paint.apply_to("CLOSED")
        ),
        PortStatus::Filtered => writeln!(
            out,
            "{} Port {:>5} | {:<12} | {} ({})",
            paint.apply_to("[-]"),
            result.port,
            result.protocol,
            paint.apply_to("FILTERED"),
            detail
        ),
        PortStatus::Error => writeln!(
            out,
            "{} Port {:>5} | {:<12} | {}: {}",
            paint.apply_to("[!]"),
            result.port,
            result.protocol,
            paint.apply_to("ERROR"),
            detail
        ),
    }
}

/// Print one port result to stdout in compact or verbose form.
pub fn print_port(result: &PortResult, verbose: bool) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if verbose {
        write_port_verbose(&mut out, result)
    } else {
        write_port_line(&mut out, result)
    }
}

/// Print a scan header before scanning begins.
pub fn print_scan_header(target: &ScanTarget, timeout: Duration) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("bannergrab").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{} Target: {}", style("•").dim(), style(target).white().bold());
    println!(
        "{} Scanning {} ports (timeout {:.1}s)...",
        style("•").dim(),
        style(target.ports.len()).white().bold(),
        timeout.as_secs_f64()
    );
    println!();
}

/// Print the closing summary after the last port.
pub fn print_plain(summary: &ScanSummary) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out)?;
    writeln!(
        out,
        "Scan complete in {:.2}s. {} of {} port(s) open ({} closed, {} filtered, {} error).",
        summary.duration_ms as f64 / 1000.0,
        style(summary.open_count).green().bold(),
        summary.total_ports,
        style(summary.count(PortStatus::Closed)).red(),
        style(summary.count(PortStatus::Filtered)).yellow(),
        style(summary.count(PortStatus::Error)).magenta()
    )
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}
