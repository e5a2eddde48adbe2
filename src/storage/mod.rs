//! Scan report persistence.

mod report_file;

pub use report_file::{save_report, FileReportSink, ReportSink};
