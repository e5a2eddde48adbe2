//! Error types for bannergrab.
//!
//! Uses `thiserror` for ergonomic error definitions. Per-port faults
//! ([`ScanError`]) never escape the scan loop; they are classified into a
//! [`PortStatus`]. Everything else bubbles up to the CLI as a [`CliError`].

use crate::scanner::PortStatus;
use crate::types::{PortError, TargetError};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Fault raised while probing a single port.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{stage} timed out")]
    Timeout { stage: &'static str },

    #[error("connection refused")]
    ConnectionRefused,

    #[error("{stage} failed: {source}")]
    Transport {
        stage: &'static str,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Map a failed connect or exchange onto the port status it implies.
    pub fn classify(&self) -> PortStatus {
        match self {
            Self::Timeout { .. } => PortStatus::Filtered,
            Self::ConnectionRefused => PortStatus::Closed,
            Self::Transport { .. } => PortStatus::Error,
        }
    }

    /// Build a scan error from an I/O failure during `stage`.
    pub fn from_io(stage: &'static str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => Self::ConnectionRefused,
            io::ErrorKind::TimedOut => Self::Timeout { stage },
            _ => Self::Transport { stage, source: err },
        }
    }
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors raised while loading application settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine a configuration directory for this platform")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),

    #[error("invalid setting: {0}")]
    InvalidValue(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by a report sink.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to write report to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Top-level error surfaced by the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Port(#[from] PortError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("output error: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    /// Process exit status for this error.
    ///
    /// Host resolution failures get their own code so wrappers can tell
    /// "bad target" apart from "bad invocation". Exit status 2 belongs to
    /// clap's usage errors.
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Target(_) => 3,
            _ => 1,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

pub type CliResult<T> = Result<T, CliError>;
