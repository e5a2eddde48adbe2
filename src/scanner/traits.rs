//! Scanner trait abstraction.
//!
//! Defines the per-port result types and the interface a scanner exposes,
//! so the aggregation and output layers never depend on sockets.

use crate::error::ScanError;
use crate::types::Port;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

/// Status of a scanned port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    /// Connection accepted and a response (possibly empty) was read.
    Open,
    /// Connection actively refused.
    Closed,
    /// No answer within the timeout, typically a firewall drop.
    Filtered,
    /// Any other transport or OS level failure.
    Error,
}

impl PortStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Filtered => "FILTERED",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Result of scanning a single port. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortResult {
    /// The port number that was scanned.
    pub port: Port,
    /// Protocol label from the protocol table.
    pub protocol: String,
    /// Status determined by the scan.
    pub status: PortStatus,
    /// Captured banner. Empty unless the port is open.
    pub banner: String,
    /// Why the port is not open, when it isn't.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl PortResult {
    /// An open port with the banner it returned.
    pub fn open(port: Port, protocol: impl Into<String>, banner: impl Into<String>) -> Self {
        Self {
            port,
            protocol: protocol.into(),
            status: PortStatus::Open,
            banner: banner.into(),
            error_detail: None,
        }
    }

    /// A port whose connect or exchange failed.
    pub fn failed(port: Port, protocol: impl Into<String>, error: &ScanError) -> Self {
        Self {
            port,
            protocol: protocol.into(),
            status: error.classify(),
            banner: String::new(),
            error_detail: Some(error.to_string()),
        }
    }

    /// Check if the port is open.
    pub fn is_open(&self) -> bool {
        self.status == PortStatus::Open
    }
}

/// Trait for port scanner implementations.
///
/// A scanner owns the target address and timeout policy; callers hand it
/// one port at a time and always get a classified result back. Per-port
/// faults are folded into the result, never returned as errors.
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Scan a single port.
    async fn scan_port(&self, port: Port) -> PortResult;
}
