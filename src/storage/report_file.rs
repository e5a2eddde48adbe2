//! Plain-text report persistence.
//!
//! The scan summary is rendered once and handed to a sink as a finished
//! blob. Sinks never see partial scans.

use crate::error::{StorageError, StorageResult};
use crate::summary::ScanSummary;
use chrono::Local;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Destination for a finished scan report.
pub trait ReportSink {
    /// Persist the complete report text.
    fn persist(&self, report: &str) -> StorageResult<()>;

    /// Human-readable location, used in operator messages.
    fn describe(&self) -> String;
}

/// Writes the report to a file, replacing any previous content.
#[derive(Debug, Clone)]
pub struct FileReportSink {
    path: PathBuf,
}

impl FileReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for FileReportSink {
    fn persist(&self, report: &str) -> StorageResult<()> {
        fs::write(&self.path, report).map_err(|source| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = report.len(), "report written");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Render `summary` stamped with the current local time and persist it.
pub fn save_report(sink: &dyn ReportSink, summary: &ScanSummary) -> StorageResult<()> {
    sink.persist(&summary.render_report(&Local::now()))
}
