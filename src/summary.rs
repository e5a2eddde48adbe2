//! Aggregation of per-port results into a scan summary and text report.

use crate::banner::first_line;
use crate::scanner::{PortResult, PortStatus};
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::time::Duration;
use tracing::warn;

/// Longest banner excerpt shown on a summary line.
pub const SUMMARY_BANNER_CHARS: usize = 70;

/// Shown instead of a banner when the service sent nothing.
pub const EMPTY_BANNER: &str = "(empty)";

const REPORT_RULE_WIDTH: usize = 80;

/// Everything learned about one host, built up as results arrive.
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    /// Host as given by the operator.
    pub host: String,
    /// Number of distinct ports requested.
    pub total_ports: usize,
    /// Number of results with status OPEN.
    pub open_count: usize,
    /// Wall time of the scan in milliseconds.
    pub duration_ms: u64,
    /// Per-port results, ascending by port.
    pub results: Vec<PortResult>,
    /// One summary line per result, same order as `results`.
    #[serde(skip)]
    pub result_lines: Vec<String>,
}

impl ScanSummary {
    /// Start an empty summary for `host`.
    pub fn new(host: impl Into<String>, total_ports: usize) -> Self {
        Self {
            host: host.into(),
            total_ports,
            open_count: 0,
            duration_ms: 0,
            results: Vec::with_capacity(total_ports),
            result_lines: Vec::with_capacity(total_ports),
        }
    }

    /// Add one result, keeping ascending port order.
    ///
    /// A second result for a port already recorded is dropped; returns
    /// whether the result was kept.
    pub fn record(&mut self, result: PortResult) -> bool {
        let idx = match self.results.binary_search_by_key(&result.port, |r| r.port) {
            Ok(_) => {
                warn!(port = %result.port, "duplicate result ignored");
                return false;
            }
            Err(idx) => idx,
        };

        if result.is_open() {
            self.open_count += 1;
        }
        self.result_lines.insert(idx, summary_line(&result));
        self.results.insert(idx, result);
        true
    }

    /// Mark the summary complete.
    pub fn finish(&mut self, elapsed: Duration) {
        self.duration_ms = elapsed.as_millis() as u64;
    }

    /// Count of results with a given status.
    pub fn count(&self, status: PortStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Render the full text report: header lines, a rule, then one detail
    /// block per port separated by blank lines.
    pub fn render_report<Tz>(&self, at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "Banner Grabber - Results for {}", self.host);
        let _ = writeln!(out, "Date: {}", at.format("%Y-%m-%d %H:%M:%S"));
        let _ = writeln!(
            out,
            "Ports scanned: {} | Ports open: {}",
            self.total_ports, self.open_count
        );
        let _ = writeln!(out, "{}", "=".repeat(REPORT_RULE_WIDTH));
        out.push('\n');

        for result in &self.results {
            let _ = writeln!(out, "{}", detail_block(result));
            out.push('\n');
        }
        out
    }
}

/// Fixed-width one-line rendering of a result.
///
/// `Port    80 | HTTP         | OPEN     | HTTP/1.1 200 OK`
pub fn summary_line(result: &PortResult) -> String {
    let excerpt = first_line(&result.banner, SUMMARY_BANNER_CHARS);
    let excerpt = if excerpt.is_empty() { EMPTY_BANNER } else { excerpt };
    format!(
        "Port {:>5} | {:<12} | {:<8} | {}",
        result.port, result.protocol, result.status, excerpt
    )
}

/// Summary line followed by the untruncated banner and any error detail.
pub fn detail_block(result: &PortResult) -> String {
    let mut block = summary_line(result);
    let _ = write!(block, "\n    Full banner: {}", result.banner);
    if let Some(detail) = &result.error_detail {
        let _ = write!(block, "\n    Error: {}", detail);
    }
    block
}
