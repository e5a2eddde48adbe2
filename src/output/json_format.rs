//! JSON output formatting.

use crate::summary::ScanSummary;
use std::io::{self, Write};

/// Write the summary as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(summary: &ScanSummary, mut out: W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut out, summary)?;
    writeln!(out)
}

/// Print results in JSON format.
pub fn print_json(summary: &ScanSummary) -> io::Result<()> {
    write_json(summary, io::stdout().lock())
}
