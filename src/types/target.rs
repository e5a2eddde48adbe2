//! Target types: what to scan and where it lives.
//!
//! Provides target parsing supporting:
//! - Single IP addresses (IPv4 and IPv6)
//! - Hostnames (example.com), resolved through DNS

use super::port::{Port, PortSpec};
use serde::Serialize;
use std::fmt;
use std::net::IpAddr;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// A resolved host together with the ports to visit on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanTarget {
    /// The host as the operator typed it. Substituted into probe templates.
    pub host: String,
    /// The resolved IP address.
    pub ip: IpAddr,
    /// Ports to visit, ascending and free of duplicates.
    pub ports: Vec<Port>,
}

impl ScanTarget {
    /// Create a new scan target.
    pub fn new(host: impl Into<String>, ip: IpAddr, ports: &PortSpec) -> Self {
        Self {
            host: host.into(),
            ip,
            ports: ports.to_ports(),
        }
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host == self.ip.to_string() {
            write!(f, "{}", self.ip)
        } else {
            write!(f, "{} ({})", self.host, self.ip)
        }
    }
}

/// Host resolution or validation failure. Fatal for the whole run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TargetError {
    #[error("invalid host: '{0}' is neither an IP address nor a valid hostname")]
    InvalidFormat(String),
    #[error("failed to resolve hostname '{0}': {1}")]
    DnsResolutionFailed(String, String),
    #[error("no IP addresses found for hostname '{0}'")]
    NoAddressesFound(String),
}

/// A parsed, not yet resolved, target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// A literal IP address.
    Single(IpAddr),
    /// A hostname to be resolved.
    Hostname(String),
}

impl TargetSpec {
    /// Parse a target specification from a string.
    pub fn parse(s: &str) -> Result<Self, TargetError> {
        let s = s.trim();

        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(Self::Single(ip));
        }

        if is_valid_hostname(s) {
            return Ok(Self::Hostname(s.to_string()));
        }

        Err(TargetError::InvalidFormat(s.to_string()))
    }

    /// Resolve this target to a single IP address.
    ///
    /// Hostnames go through the system resolver configuration (hosts file
    /// included); if that cannot be loaded the resolver's built-in upstream
    /// servers are used. The first address returned wins.
    pub async fn resolve(&self) -> Result<IpAddr, TargetError> {
        match self {
            Self::Single(ip) => Ok(*ip),

            Self::Hostname(hostname) => {
                let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
                    debug!(error = %e, "system resolver config unavailable, using defaults");
                    TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
                });

                let response = resolver.lookup_ip(hostname.as_str()).await.map_err(|e| {
                    TargetError::DnsResolutionFailed(hostname.clone(), e.to_string())
                })?;

                let ip = response
                    .iter()
                    .next()
                    .ok_or_else(|| TargetError::NoAddressesFound(hostname.clone()))?;

                debug!(%hostname, %ip, "resolved target");
                Ok(ip)
            }
        }
    }
}

/// Check if a string is a valid hostname.
fn is_valid_hostname(s: &str) -> bool {
    if s.is_empty() || s.len() > 253 {
        return false;
    }

    // Each label must be 1-63 characters
    for label in s.split('.') {
        if label.is_empty() || label.len() > 63 {
            return false;
        }
        // Must start and end with alphanumeric
        if !label.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        if !label.chars().last().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return false;
        }
    }

    true
}
