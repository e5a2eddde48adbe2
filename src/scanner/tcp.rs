//! TCP banner scanner implementation.
//!
//! Completes a full TCP handshake per port using the operating system's
//! socket API, then runs a single probe/response exchange on the stream.

use crate::banner;
use crate::error::{ScanError, ScanResult};
use crate::protocols::{self, Probe};
use crate::scanner::traits::{PortResult, Scanner};
use crate::types::{Port, ScanTarget};
use async_trait::async_trait;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// TCP connect scanner with protocol-aware banner capture.
///
/// Every port gets its own connection; the stream lives only as long as
/// the exchange and is closed on every path out of [`grab`](Self::grab).
/// Does not require elevated privileges.
pub struct TcpBannerScanner {
    target: IpAddr,
    host: String,
    timeout: Duration,
}

impl TcpBannerScanner {
    /// Create a new scanner.
    ///
    /// # Arguments
    /// * `target` - Target IP address to connect to
    /// * `host` - Host name as given by the operator, substituted into probes
    /// * `timeout` - Bound applied separately to connect, write and read
    pub fn new(target: IpAddr, host: impl Into<String>, timeout: Duration) -> Self {
        Self {
            target,
            host: host.into(),
            timeout,
        }
    }

    /// Create a scanner for a resolved scan target.
    pub fn for_target(target: &ScanTarget, timeout: Duration) -> Self {
        Self::new(target.ip, target.host.clone(), timeout)
    }

    /// Attempt to connect to the target address.
    async fn attempt_connect(&self, addr: SocketAddr) -> ScanResult<TcpStream> {
        match timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(ScanError::from_io("connect", e)),
            Err(_) => Err(ScanError::Timeout { stage: "connect" }),
        }
    }

    /// Connect to `addr`, run `probe` and return the captured banner.
    pub async fn grab(&self, addr: SocketAddr, probe: &Probe) -> ScanResult<String> {
        let mut stream = self.attempt_connect(addr).await?;
        debug!(%addr, protocol = probe.protocol, passive = probe.is_passive(), "connected");

        banner::exchange(&mut stream, probe, self.timeout).await
    }
}

#[async_trait]
impl Scanner for TcpBannerScanner {
    async fn scan_port(&self, port: Port) -> PortResult {
        let port_num = port.as_u16();
        let addr = SocketAddr::new(self.target, port_num);
        let probe = protocols::lookup(port_num, &self.host);

        let result = match self.grab(addr, &probe).await {
            Ok(banner) => PortResult::open(port, probe.protocol, banner),
            Err(e) => PortResult::failed(port, probe.protocol, &e),
        };

        debug!(
            port = port_num,
            status = %result.status,
            detail = result.error_detail.as_deref().unwrap_or(""),
            "port classified"
        );
        result
    }
}
