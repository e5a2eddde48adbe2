//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV output of scan results.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::{print_csv, write_csv};
pub use json_format::{print_json, write_json};
pub use plain::{
    print_error, print_port, print_scan_header, print_success, print_warning, write_port_line,
    write_port_verbose,
};

use crate::cli::OutputFormat;
use crate::summary::ScanSummary;
use std::io;

/// Print the finished summary according to the specified format.
pub fn format_results(summary: &ScanSummary, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_plain(summary),
        OutputFormat::Json => json_format::print_json(summary),
        OutputFormat::Csv => csv_format::print_csv(summary),
    }
}
