//! Scanner module - drives the per-port scan loop.
//!
//! Ports are visited one at a time in ascending order: each port reaches a
//! terminal status before the next connection is opened.

pub mod tcp;
pub mod traits;

use crate::summary::ScanSummary;
use crate::types::ScanTarget;
use std::time::{Duration, Instant};
use tracing::info;

pub use tcp::TcpBannerScanner;
pub use traits::{PortResult, PortStatus, Scanner};

/// Scan every port of `target`, feeding each result to `on_result` as soon
/// as it is classified.
pub async fn run_scan<S, F>(scanner: &S, target: &ScanTarget, mut on_result: F) -> ScanSummary
where
    S: Scanner + ?Sized,
    F: FnMut(&PortResult),
{
    let start_time = Instant::now();
    let mut summary = ScanSummary::new(&target.host, target.ports.len());

    for &port in &target.ports {
        let result = scanner.scan_port(port).await;
        on_result(&result);
        summary.record(result);
    }

    summary.finish(start_time.elapsed());
    info!(
        host = %target,
        ports = summary.total_ports,
        open = summary.open_count,
        duration_ms = summary.duration_ms,
        "scan complete"
    );
    summary
}

/// Scan `target` over plain TCP and return the results in port order.
pub async fn scan(target: &ScanTarget, timeout: Duration) -> Vec<PortResult> {
    let scanner = TcpBannerScanner::for_target(target, timeout);
    run_scan(&scanner, target, |_| {}).await.results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use crate::types::{Port, PortSpec};
    use async_trait::async_trait;
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Mutex;

    /// Scanner that answers from a script and records the visit order.
    struct ScriptedScanner {
        visited: Mutex<Vec<u16>>,
    }

    #[async_trait]
    impl Scanner for ScriptedScanner {
        async fn scan_port(&self, port: Port) -> PortResult {
            self.visited.lock().unwrap().push(port.as_u16());
            match port.as_u16() % 4 {
                0 => PortResult::open(port, "Unknown", format!("hello from {port}")),
                1 => PortResult::failed(port, "Unknown", &ScanError::ConnectionRefused),
                2 => PortResult::failed(
                    port,
                    "Unknown",
                    &ScanError::Timeout { stage: "connect" },
                ),
                _ => PortResult::failed(
                    port,
                    "Unknown",
                    &ScanError::from_io("connect", std::io::Error::other("no route")),
                ),
            }
        }
    }

    fn target(ports: &str) -> ScanTarget {
        let spec: PortSpec = ports.parse().unwrap();
        ScanTarget::new("localhost", IpAddr::V4(Ipv4Addr::LOCALHOST), &spec)
    }

    #[tokio::test]
    async fn test_run_scan_visits_ports_in_order_once() {
        let scanner = ScriptedScanner {
            visited: Mutex::new(Vec::new()),
        };
        let target = target("107,100,103,100,101,102,107");
        let mut streamed = Vec::new();

        let summary = run_scan(&scanner, &target, |r| streamed.push(r.port.as_u16())).await;

        let expected = vec![100, 101, 102, 103, 107];
        assert_eq!(*scanner.visited.lock().unwrap(), expected);
        assert_eq!(streamed, expected);
        assert_eq!(summary.results.len(), 5);
        assert_eq!(summary.total_ports, 5);
    }

    #[tokio::test]
    async fn test_run_scan_counts_only_open_ports() {
        let scanner = ScriptedScanner {
            visited: Mutex::new(Vec::new()),
        };
        let summary = run_scan(&scanner, &target("100-111"), |_| {}).await;

        let open = summary.results.iter().filter(|r| r.is_open()).count();
        assert_eq!(summary.open_count, open);
        assert_eq!(summary.open_count, 3);
        assert!(summary.open_count <= summary.total_ports);

        let statuses: Vec<PortStatus> = summary.results[..4].iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                PortStatus::Open,
                PortStatus::Closed,
                PortStatus::Filtered,
                PortStatus::Error
            ]
        );
    }
}
