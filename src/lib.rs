//! # bannergrab - Protocol-Aware TCP Banner Grabber
//!
//! bannergrab connects to a list of TCP ports on one host, sends each
//! service a probe it is likely to answer (or waits, for services that
//! speak first), and records what comes back.
//!
//! ## Features
//!
//! - **Protocol table**: FTP, SSH, Telnet, SMTP, DNS, HTTP(S), POP3(S),
//!   IMAP(S), MySQL, PostgreSQL and RDP probes, HTTP fallback elsewhere
//! - **Classification**: every port ends OPEN, CLOSED, FILTERED or ERROR
//! - **Deterministic output**: ports are visited one at a time, ascending
//! - **Reports**: plain text console output, JSON, CSV and a text report file
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use bannergrab::scanner::scan;
//! use bannergrab::types::{PortSpec, ScanTarget};
//! use std::time::Duration;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let ports: PortSpec = "22,80".parse().unwrap();
//!     let target = ScanTarget::new("127.0.0.1", "127.0.0.1".parse().unwrap(), &ports);
//!
//!     for result in scan(&target, Duration::from_secs(2)).await {
//!         println!("{} {} {}", result.port, result.status, result.banner);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`protocols`] - Port to protocol/probe table
//! - [`scanner`] - Connection, probe exchange and classification
//! - [`banner`] - Bounded banner reads and decoding
//! - [`summary`] - Result aggregation and report rendering
//! - [`storage`] - Report persistence
//! - [`types`] - Port and target types
//! - [`config`] - Saved settings
//! - [`error`] - Error types

pub mod banner;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod protocols;
pub mod scanner;
pub mod storage;
pub mod summary;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ScanError};
pub use protocols::{lookup, Probe};
pub use scanner::{PortResult, PortStatus, Scanner, TcpBannerScanner};
pub use summary::ScanSummary;
pub use types::{Port, PortSpec, ScanTarget, TargetSpec};
